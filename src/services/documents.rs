//! Generated letter listing, viewing and deletion.

use std::path::PathBuf;

use crate::domain::document::FileData;
use crate::files::documents::{self, DeleteOutcome};
use crate::files::{Capabilities, DialogHost};
use crate::models::config::Platform;
use crate::services::{ServiceError, ServiceResult};

fn ensure_desktop(caps: &Capabilities) -> ServiceResult<()> {
    match caps.platform {
        Platform::Desktop => Ok(()),
        Platform::Web => Err(ServiceError::Unavailable(
            "Documents are only available in the desktop app".to_string(),
        )),
    }
}

/// Letters in the letters folder, newest first.
pub fn list_documents(caps: &Capabilities) -> ServiceResult<Vec<FileData>> {
    ensure_desktop(caps)?;
    Ok(documents::list_documents(caps.files.as_ref(), &caps.letters_folder))
}

/// Deletes a letter once `dialog` confirms and returns the refreshed listing.
pub fn delete_document(
    caps: &Capabilities,
    dialog: &dyn DialogHost,
    name: &str,
) -> ServiceResult<Vec<FileData>> {
    ensure_desktop(caps)?;
    match documents::delete_document(caps.files.as_ref(), dialog, &caps.letters_folder, name)? {
        DeleteOutcome::Deleted(listing) => Ok(listing),
        DeleteOutcome::Declined(prompt) => Err(ServiceError::Declined(prompt)),
    }
}

/// Absolute path of a letter for the viewer.
pub fn open_document(caps: &Capabilities, name: &str) -> ServiceResult<PathBuf> {
    ensure_desktop(caps)?;
    Ok(documents::open_document(
        caps.files.as_ref(),
        &caps.letters_folder,
        name,
    )?)
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;
    use std::sync::Arc;

    use super::*;
    use crate::files::{LocalFileSystem, PresetAnswer, UnavailableFileSystem};
    use crate::repository::MemoryClientStore;

    fn desktop(root: &Path) -> Capabilities {
        Capabilities::new(
            Arc::new(MemoryClientStore::new()),
            Arc::new(LocalFileSystem::new(root)),
            Platform::Desktop,
            "Suitability",
        )
    }

    #[test]
    fn web_platform_has_no_documents() {
        let caps = Capabilities::new(
            Arc::new(MemoryClientStore::new()),
            Arc::new(UnavailableFileSystem),
            Platform::Web,
            "Suitability",
        );
        assert!(matches!(list_documents(&caps), Err(ServiceError::Unavailable(_))));
    }

    #[test]
    fn confirmed_delete_returns_fresh_listing() {
        let dir = tempfile::tempdir().unwrap();
        let folder = dir.path().join("Suitability");
        fs::create_dir_all(&folder).unwrap();
        fs::write(folder.join("a.pdf"), b"%PDF").unwrap();
        fs::write(folder.join("b.pdf"), b"%PDF").unwrap();
        let caps = desktop(dir.path());

        let listing = delete_document(&caps, &PresetAnswer(true), "a.pdf").unwrap();

        assert_eq!(listing.len(), 1);
        assert_eq!(listing[0].name, "b.pdf");
        assert!(!folder.join("a.pdf").exists());
    }

    #[test]
    fn declined_delete_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let folder = dir.path().join("Suitability");
        fs::create_dir_all(&folder).unwrap();
        fs::write(folder.join("a.pdf"), b"%PDF").unwrap();

        assert!(matches!(
            delete_document(&desktop(dir.path()), &PresetAnswer(false), "a.pdf"),
            Err(ServiceError::Declined(_))
        ));
        assert!(folder.join("a.pdf").exists());
    }

    #[test]
    fn traversal_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            open_document(&desktop(dir.path()), "../etc/passwd"),
            Err(ServiceError::Form(_))
        ));
    }
}
