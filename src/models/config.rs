//! Configuration model loaded from external sources.

use serde::Deserialize;

use crate::db::ConnectionOptions;

fn default_busy_timeout_ms() -> u64 {
    30_000
}

fn default_true() -> bool {
    true
}

#[derive(Clone, Debug, Deserialize)]
/// Settings read by the bootstrap binary.
pub struct ServerConfig {
    pub database_url: String,
    /// How long a writer waits on a locked database.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
    #[serde(default = "default_true")]
    pub enable_wal: bool,
}

impl ServerConfig {
    /// Connection settings derived from this configuration. Foreign keys are
    /// always enforced since cascade deletes depend on them.
    pub fn connection_options(&self) -> ConnectionOptions {
        ConnectionOptions {
            enable_wal: self.enable_wal,
            enable_foreign_keys: true,
            busy_timeout: Some(std::time::Duration::from_millis(self.busy_timeout_ms)),
        }
    }
}
