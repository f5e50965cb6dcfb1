#![allow(dead_code)]

use std::path::{Path, PathBuf};

use tempfile::TempDir;
use wealth_crm::db::DbPool;
use wealth_crm::repository::DieselRepository;

/// Migrated SQLite database in a temporary directory, removed on drop.
pub struct TestDb {
    _dir: TempDir,
    path: PathBuf,
    repo: DieselRepository,
}

impl TestDb {
    pub fn new(name: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join(name);
        let repo = DieselRepository::open(path.to_str().expect("utf-8 temp path"))
            .expect("open test database");
        Self {
            _dir: dir,
            path,
            repo,
        }
    }

    pub fn pool(&self) -> &DbPool {
        self.repo.pool()
    }

    pub fn repo(&self) -> &DieselRepository {
        &self.repo
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
