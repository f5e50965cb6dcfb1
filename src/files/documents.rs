//! Listing and housekeeping of generated letters.

use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::document::FileData;
use crate::files::{DialogHost, FileSystem};

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("invalid document name: {0}")]
    InvalidName(String),

    #[error("document not found: {0}")]
    NotFound(String),

    #[error("file system error: {0}")]
    Io(#[from] io::Error),
}

/// Result of a delete request.
#[derive(Debug, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The file is gone; carries the refreshed listing.
    Deleted(Vec<FileData>),
    /// The user said no; carries the prompt that was shown.
    Declined(String),
}

fn is_pdf(name: &str) -> bool {
    Path::new(name)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

/// Rejects names that could escape the letters folder. Names are used as
/// listed, surrounding spaces included.
pub fn validate_name(name: &str) -> Result<&str, DocumentError> {
    if name.is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\', '\0'])
    {
        return Err(DocumentError::InvalidName(name.to_string()));
    }
    Ok(name)
}

fn read_documents(files: &dyn FileSystem, folder: &Path) -> io::Result<Vec<FileData>> {
    if !files.exists(folder)? {
        files.create_dir_all(folder)?;
    }

    let mut documents: Vec<FileData> = files
        .read_dir(folder)?
        .into_iter()
        .filter(|entry| entry.is_file && is_pdf(&entry.name))
        .map(|entry| FileData {
            created: entry
                .created
                .or(entry.modified)
                .map(DateTime::<Utc>::from)
                .unwrap_or_else(Utc::now),
            name: entry.name,
        })
        .collect();

    documents.sort_by(|a, b| b.created.cmp(&a.created).then_with(|| a.name.cmp(&b.name)));
    Ok(documents)
}

/// PDF files in `folder`, newest first. The folder is created when absent.
/// Failures are logged and produce an empty list.
pub fn list_documents(files: &dyn FileSystem, folder: &Path) -> Vec<FileData> {
    match read_documents(files, folder) {
        Ok(documents) => documents,
        Err(err) => {
            log::error!("Failed to list documents in {}: {err}", folder.display());
            Vec::new()
        }
    }
}

/// Deletes `name` from `folder` after confirmation.
pub fn delete_document(
    files: &dyn FileSystem,
    dialog: &dyn DialogHost,
    folder: &Path,
    name: &str,
) -> Result<DeleteOutcome, DocumentError> {
    let name = validate_name(name)?;
    let path = folder.join(name);
    if !files.exists(&path)? {
        return Err(DocumentError::NotFound(name.to_string()));
    }

    let prompt = format!("Are you sure you want to delete {name}?");
    if !dialog.confirm("Delete Document", &prompt) {
        log::info!("Deletion of {name} declined");
        return Ok(DeleteOutcome::Declined(prompt));
    }

    files.remove_file(&path)?;
    log::info!("Deleted document {name}");
    Ok(DeleteOutcome::Deleted(list_documents(files, folder)))
}

/// Absolute path of a stored letter, for the viewer.
pub fn open_document(
    files: &dyn FileSystem,
    folder: &Path,
    name: &str,
) -> Result<PathBuf, DocumentError> {
    let name = validate_name(name)?;
    let path = folder.join(name);
    if !is_pdf(name) || !files.exists(&path)? {
        return Err(DocumentError::NotFound(name.to_string()));
    }
    Ok(files.resolve(&path)?)
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::time::{Duration, UNIX_EPOCH};

    use super::*;
    use crate::files::{DirEntry, LocalFileSystem, PresetAnswer, UnavailableFileSystem};

    #[test]
    fn listing_creates_missing_folder() {
        let dir = tempfile::tempdir().unwrap();
        let files = LocalFileSystem::new(dir.path());

        assert!(list_documents(&files, Path::new("Suitability")).is_empty());
        assert!(dir.path().join("Suitability").is_dir());
    }

    #[test]
    fn listing_keeps_only_pdf_files() {
        let dir = tempfile::tempdir().unwrap();
        let folder = dir.path().join("Suitability");
        fs::create_dir_all(folder.join("nested.pdf")).unwrap();
        fs::write(folder.join("a.pdf"), b"%PDF").unwrap();
        fs::write(folder.join("B.PDF"), b"%PDF").unwrap();
        fs::write(folder.join("notes.txt"), b"x").unwrap();

        let files = LocalFileSystem::new(dir.path());
        let mut names: Vec<_> = list_documents(&files, Path::new("Suitability"))
            .into_iter()
            .map(|d| d.name)
            .collect();
        names.sort();
        assert_eq!(names, vec!["B.PDF", "a.pdf"]);
    }

    #[test]
    fn listing_failure_yields_empty_list() {
        assert!(list_documents(&UnavailableFileSystem, Path::new("Suitability")).is_empty());
    }

    #[test]
    fn names_with_separators_are_rejected() {
        for name in ["../secret.pdf", "a/b.pdf", "a\\b.pdf", "", ".", "..", "a\0.pdf"] {
            assert!(matches!(
                validate_name(name),
                Err(DocumentError::InvalidName(_))
            ));
        }
        assert_eq!(validate_name(" letter.pdf ").unwrap(), " letter.pdf ");
        assert_eq!(
            validate_name("Jane Doe - Sale of Acme Inc.. 05-03-2025.pdf").unwrap(),
            "Jane Doe - Sale of Acme Inc.. 05-03-2025.pdf"
        );
    }

    #[test]
    fn generated_names_with_dots_can_be_deleted() {
        let dir = tempfile::tempdir().unwrap();
        let folder = dir.path().join("Suitability");
        fs::create_dir_all(&folder).unwrap();
        let name = "Jane Doe - Sale of Acme Inc.. 05-03-2025.pdf";
        fs::write(folder.join(name), b"%PDF").unwrap();

        let files = LocalFileSystem::new(dir.path());
        let outcome =
            delete_document(&files, &PresetAnswer(true), Path::new("Suitability"), name).unwrap();

        assert_eq!(outcome, DeleteOutcome::Deleted(Vec::new()));
        assert!(!folder.join(name).exists());
    }

    /// Serves a fixed directory listing.
    struct ListingFileSystem {
        entries: Vec<DirEntry>,
    }

    impl FileSystem for ListingFileSystem {
        fn resolve(&self, relative: &Path) -> io::Result<PathBuf> {
            Ok(relative.to_path_buf())
        }

        fn exists(&self, _relative: &Path) -> io::Result<bool> {
            Ok(true)
        }

        fn create_dir_all(&self, _relative: &Path) -> io::Result<()> {
            Ok(())
        }

        fn read_dir(&self, _relative: &Path) -> io::Result<Vec<DirEntry>> {
            Ok(self.entries.clone())
        }

        fn write(&self, _relative: &Path, _contents: &[u8]) -> io::Result<()> {
            Ok(())
        }

        fn remove_file(&self, _relative: &Path) -> io::Result<()> {
            Ok(())
        }
    }

    fn entry(name: &str, created: Option<u64>, modified: Option<u64>) -> DirEntry {
        let at = |secs| UNIX_EPOCH + Duration::from_secs(secs);
        DirEntry {
            name: name.to_string(),
            is_file: true,
            created: created.map(at),
            modified: modified.map(at),
        }
    }

    #[test]
    fn listing_is_newest_first_with_ties_by_name() {
        let files = ListingFileSystem {
            entries: vec![
                entry("old.pdf", Some(1_000), Some(9_000)),
                entry("b-tied.pdf", Some(5_000), None),
                entry("modified-only.pdf", None, Some(7_000)),
                entry("a-tied.pdf", Some(5_000), Some(1)),
                entry("newest.pdf", Some(8_000), None),
            ],
        };

        let documents = list_documents(&files, Path::new("Suitability"));

        let names: Vec<_> = documents.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "newest.pdf",
                "modified-only.pdf",
                "a-tied.pdf",
                "b-tied.pdf",
                "old.pdf"
            ]
        );
        assert_eq!(documents[1].created.timestamp(), 7_000);
        assert_eq!(documents[4].created.timestamp(), 1_000);
    }

    #[test]
    fn declined_delete_keeps_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let folder = dir.path().join("Suitability");
        fs::create_dir_all(&folder).unwrap();
        fs::write(folder.join("a.pdf"), b"%PDF").unwrap();

        let files = LocalFileSystem::new(dir.path());
        let outcome =
            delete_document(&files, &PresetAnswer(false), Path::new("Suitability"), "a.pdf")
                .unwrap();

        assert_eq!(
            outcome,
            DeleteOutcome::Declined("Are you sure you want to delete a.pdf?".to_string())
        );
        assert!(folder.join("a.pdf").exists());
    }

    #[test]
    fn open_resolves_existing_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let folder = dir.path().join("Suitability");
        fs::create_dir_all(&folder).unwrap();
        fs::write(folder.join("a.pdf"), b"%PDF").unwrap();

        let files = LocalFileSystem::new(dir.path());
        assert_eq!(
            open_document(&files, Path::new("Suitability"), "a.pdf").unwrap(),
            folder.join("a.pdf")
        );
        assert!(matches!(
            open_document(&files, Path::new("Suitability"), "b.pdf"),
            Err(DocumentError::NotFound(_))
        ));
    }
}
