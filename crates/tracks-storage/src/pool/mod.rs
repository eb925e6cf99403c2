//! Connection pool managing read/write connections.

pub mod pragmas;
pub mod read_pool;
pub mod write_connection;

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracks_core::errors::TracksResult;

pub use read_pool::ReadPool;
pub use write_connection::WriteConnection;

/// Manages the single write connection and, for file-backed stores, the
/// read connection pool.
pub struct ConnectionPool {
    pub(crate) writer: WriteConnection,
    /// `None` for in-memory stores: a second in-memory connection would be a
    /// separate, empty database.
    pub(crate) readers: Option<ReadPool>,
    pub(crate) db_path: Option<PathBuf>,
}

impl ConnectionPool {
    /// Open the writer, run `init` on it (migrations), then open readers.
    /// Readers open read-only, so the schema must exist before they do.
    pub fn open<F>(
        path: &Path,
        read_pool_size: usize,
        busy_timeout: Duration,
        init: F,
    ) -> TracksResult<Self>
    where
        F: FnOnce(&rusqlite::Connection) -> TracksResult<()>,
    {
        let writer = WriteConnection::open(path, busy_timeout)?;
        writer.with_conn(init)?;
        let readers = ReadPool::open(path, read_pool_size, busy_timeout)?;
        Ok(Self {
            writer,
            readers: Some(readers),
            db_path: Some(path.to_path_buf()),
        })
    }

    /// Open an in-memory pool (for testing).
    pub fn open_in_memory<F>(init: F) -> TracksResult<Self>
    where
        F: FnOnce(&rusqlite::Connection) -> TracksResult<()>,
    {
        let writer = WriteConnection::open_in_memory()?;
        writer.with_conn(init)?;
        Ok(Self {
            writer,
            readers: None,
            db_path: None,
        })
    }
}
