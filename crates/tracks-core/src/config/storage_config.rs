use serde::{Deserialize, Serialize};

use super::defaults;

/// Event store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    pub db_path: String,
    /// Number of read connections in the pool.
    pub read_pool_size: usize,
    /// Busy timeout in milliseconds. Bounds how long any operation waits on
    /// a locked database.
    pub busy_timeout_ms: u32,
    /// Events handed to the dispatch client per drain cycle.
    pub default_batch_size: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: defaults::DEFAULT_DB_FILENAME.to_string(),
            read_pool_size: defaults::DEFAULT_READ_POOL_SIZE,
            busy_timeout_ms: defaults::DEFAULT_BUSY_TIMEOUT_MS,
            default_batch_size: defaults::DEFAULT_BATCH_SIZE,
        }
    }
}
