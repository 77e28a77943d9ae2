//! Database connection helpers.
//!
//! This module wraps the Diesel connection pool used by the repository and
//! applies the per-connection settings the schema relies on. SQLite only
//! enforces foreign keys, and therefore cascade deletes, when
//! `PRAGMA foreign_keys` is enabled on the connection.

use std::time::Duration;

use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool, PoolError, PooledConnection};
use diesel::sqlite::SqliteConnection;
use log::error;
use thiserror::Error;

use crate::registry;

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;
pub type DbConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

#[derive(Debug, Clone)]
/// Options that are applied each time a connection is acquired from the pool.
pub struct ConnectionOptions {
    /// Enable Write Ahead Logging mode for SQLite.
    pub enable_wal: bool,
    /// Enforce foreign key checks for SQLite.
    pub enable_foreign_keys: bool,
    /// Timeout to wait for a locked database.
    pub busy_timeout: Option<Duration>,
}

impl Default for ConnectionOptions {
    fn default() -> Self {
        Self {
            enable_wal: true,
            enable_foreign_keys: true,
            busy_timeout: Some(Duration::from_secs(30)),
        }
    }
}

impl ConnectionOptions {
    /// The `PRAGMA` batch run on every freshly acquired connection.
    fn pragmas(&self) -> String {
        let mut pragmas = String::new();
        if self.enable_wal {
            pragmas.push_str("PRAGMA journal_mode = WAL; PRAGMA synchronous = NORMAL;");
        }
        if self.enable_foreign_keys {
            pragmas.push_str("PRAGMA foreign_keys = ON;");
        }
        if let Some(timeout) = self.busy_timeout {
            pragmas.push_str(&format!("PRAGMA busy_timeout = {};", timeout.as_millis()));
        }
        pragmas
    }
}

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionOptions {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        conn.batch_execute(&self.pragmas())
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Errors raised while preparing the database at start-up.
#[derive(Debug, Error)]
pub enum InitError {
    #[error("failed to build connection pool: {0}")]
    Pool(#[from] PoolError),
    #[error("failed to apply schema: {0}")]
    Schema(#[from] diesel::result::Error),
}

/// Builds the pool; `options` run on every connection it hands out.
pub fn establish_connection_pool(
    database_url: &str,
    options: ConnectionOptions,
) -> Result<DbPool, PoolError> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    Pool::builder()
        .connection_customizer(Box::new(options))
        .build(manager)
}

/// Checks a connection out of the pool, logging when none is available.
pub fn get_connection(pool: &DbPool) -> Result<DbConnection, PoolError> {
    pool.get().inspect_err(|err| error!("Failed to get connection from pool: {err}"))
}

/// Opens the pool and creates every table of the schema registry.
pub fn initialize(database_url: &str, options: ConnectionOptions) -> Result<DbPool, InitError> {
    let pool = establish_connection_pool(database_url, options)?;
    let mut conn = get_connection(&pool)?;
    registry::apply_schema(&mut conn)?;
    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_enable_wal_and_foreign_keys() {
        let pragmas = ConnectionOptions::default().pragmas();
        assert!(pragmas.contains("journal_mode = WAL"));
        assert!(pragmas.contains("foreign_keys = ON"));
        assert!(pragmas.ends_with("PRAGMA busy_timeout = 30000;"));
    }

    #[test]
    fn disabled_options_produce_no_pragmas() {
        let options = ConnectionOptions {
            enable_wal: false,
            enable_foreign_keys: false,
            busy_timeout: None,
        };
        assert!(options.pragmas().is_empty());
    }
}
