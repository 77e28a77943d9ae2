#![allow(dead_code)]

use institute_crm::db::{self, ConnectionOptions, DbConnection, DbPool};
use institute_crm::repository::DieselRepository;
use tempfile::TempDir;

/// A freshly initialised database file that is removed on drop.
pub struct TestDb {
    pool: DbPool,
    _dir: TempDir,
}

impl TestDb {
    pub fn new(name: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join(name);
        let url = path.to_str().expect("utf-8 temp path");

        let pool = db::initialize(url, ConnectionOptions::default()).expect("initialise database");

        Self { pool, _dir: dir }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }

    pub fn repo(&self) -> DieselRepository {
        DieselRepository::new(self.pool())
    }

    pub fn conn(&self) -> DbConnection {
        self.pool.get().expect("pooled connection")
    }
}
