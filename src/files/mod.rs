//! Host capabilities: file system access, confirmation dialogs and the
//! bundle handed to services.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use crate::models::config::Platform;
use crate::repository::ClientStore;

pub mod documents;

/// Metadata of a directory entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub is_file: bool,
    pub created: Option<SystemTime>,
    pub modified: Option<SystemTime>,
}

/// File operations relative to a capability-specific root.
pub trait FileSystem: Send + Sync {
    /// Absolute location of `relative`.
    fn resolve(&self, relative: &Path) -> io::Result<PathBuf>;
    fn exists(&self, relative: &Path) -> io::Result<bool>;
    fn create_dir_all(&self, relative: &Path) -> io::Result<()>;
    fn read_dir(&self, relative: &Path) -> io::Result<Vec<DirEntry>>;
    fn write(&self, relative: &Path, contents: &[u8]) -> io::Result<()>;
    fn remove_file(&self, relative: &Path) -> io::Result<()>;
}

/// Local disk rooted at a base directory, normally the user's documents.
#[derive(Clone, Debug)]
pub struct LocalFileSystem {
    base: PathBuf,
}

impl LocalFileSystem {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }
}

impl FileSystem for LocalFileSystem {
    fn resolve(&self, relative: &Path) -> io::Result<PathBuf> {
        Ok(self.base.join(relative))
    }

    fn exists(&self, relative: &Path) -> io::Result<bool> {
        self.base.join(relative).try_exists()
    }

    fn create_dir_all(&self, relative: &Path) -> io::Result<()> {
        fs::create_dir_all(self.base.join(relative))
    }

    fn read_dir(&self, relative: &Path) -> io::Result<Vec<DirEntry>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(self.base.join(relative))? {
            let entry = entry?;
            let metadata = entry.metadata()?;
            entries.push(DirEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                is_file: metadata.is_file(),
                created: metadata.created().ok(),
                modified: metadata.modified().ok(),
            });
        }
        Ok(entries)
    }

    fn write(&self, relative: &Path, contents: &[u8]) -> io::Result<()> {
        fs::write(self.base.join(relative), contents)
    }

    fn remove_file(&self, relative: &Path) -> io::Result<()> {
        fs::remove_file(self.base.join(relative))
    }
}

/// File system of the web platform: every call fails with `Unsupported`.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnavailableFileSystem;

fn unsupported<T>() -> io::Result<T> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "file system is not available on this platform",
    ))
}

impl FileSystem for UnavailableFileSystem {
    fn resolve(&self, _relative: &Path) -> io::Result<PathBuf> {
        unsupported()
    }

    fn exists(&self, _relative: &Path) -> io::Result<bool> {
        unsupported()
    }

    fn create_dir_all(&self, _relative: &Path) -> io::Result<()> {
        unsupported()
    }

    fn read_dir(&self, _relative: &Path) -> io::Result<Vec<DirEntry>> {
        unsupported()
    }

    fn write(&self, _relative: &Path, _contents: &[u8]) -> io::Result<()> {
        unsupported()
    }

    fn remove_file(&self, _relative: &Path) -> io::Result<()> {
        unsupported()
    }
}

/// Asks the user to confirm a destructive action.
pub trait DialogHost: Send + Sync {
    fn confirm(&self, title: &str, message: &str) -> bool;
}

/// Answer decided before the operation ran, e.g. an HTTP `confirm=true`
/// flag or a `--yes` command line switch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PresetAnswer(pub bool);

impl DialogHost for PresetAnswer {
    fn confirm(&self, title: &str, message: &str) -> bool {
        log::debug!("{title}: {message} -> {}", self.0);
        self.0
    }
}

/// Prompts on the controlling terminal. Anything but `y`/`yes` declines.
#[derive(Clone, Copy, Debug, Default)]
pub struct TerminalDialog;

impl DialogHost for TerminalDialog {
    fn confirm(&self, title: &str, message: &str) -> bool {
        let mut stdout = io::stdout();
        if write!(stdout, "{title}\n{message} [y/N] ").and_then(|_| stdout.flush()).is_err() {
            return false;
        }
        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    }
}

/// Everything a request needs from the host, selected once at startup.
#[derive(Clone)]
pub struct Capabilities {
    pub store: Arc<dyn ClientStore>,
    pub files: Arc<dyn FileSystem>,
    pub platform: Platform,
    /// Folder, relative to the file system root, holding generated letters.
    pub letters_folder: PathBuf,
}

impl Capabilities {
    pub fn new(
        store: Arc<dyn ClientStore>,
        files: Arc<dyn FileSystem>,
        platform: Platform,
        letters_folder: impl Into<PathBuf>,
    ) -> Self {
        Self {
            store,
            files,
            platform,
            letters_folder: letters_folder.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_file_system_round_trips_files() {
        let dir = tempfile::tempdir().unwrap();
        let fs = LocalFileSystem::new(dir.path());
        let folder = Path::new("Suitability");

        assert!(!fs.exists(folder).unwrap());
        fs.create_dir_all(folder).unwrap();
        fs.write(&folder.join("a.pdf"), b"%PDF").unwrap();

        let entries = fs.read_dir(folder).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "a.pdf");
        assert!(entries[0].is_file);
        assert_eq!(
            fs.resolve(&folder.join("a.pdf")).unwrap(),
            dir.path().join("Suitability").join("a.pdf")
        );

        fs.remove_file(&folder.join("a.pdf")).unwrap();
        assert!(fs.read_dir(folder).unwrap().is_empty());
    }

    #[test]
    fn unavailable_file_system_is_unsupported() {
        let err = UnavailableFileSystem.read_dir(Path::new(".")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::Unsupported);
    }

    #[test]
    fn preset_answer_is_returned() {
        assert!(PresetAnswer(true).confirm("t", "m"));
        assert!(!PresetAnswer(false).confirm("t", "m"));
    }
}
