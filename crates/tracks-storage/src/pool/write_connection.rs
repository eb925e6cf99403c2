//! Single write connection behind a mutex. Every mutation is serialized and
//! runs in its own `BEGIN IMMEDIATE` transaction.

use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

use rusqlite::{Connection, Transaction, TransactionBehavior};

use tracks_core::config::defaults::DEFAULT_BUSY_TIMEOUT_MS;
use tracks_core::errors::TracksResult;

use super::pragmas::apply_pragmas;
use crate::{classify, to_storage_err};

/// A single write connection protected by a mutex.
pub struct WriteConnection {
    conn: Mutex<Connection>,
}

impl WriteConnection {
    /// Open a new write connection to the given database path.
    pub fn open(path: &Path, busy_timeout: Duration) -> TracksResult<Self> {
        let conn = Connection::open(path).map_err(|e| classify("open write connection", e))?;
        apply_pragmas(&conn, busy_timeout)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> TracksResult<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| classify("open in-memory connection", e))?;
        apply_pragmas(&conn, Duration::from_millis(u64::from(DEFAULT_BUSY_TIMEOUT_MS)))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Acquire the write lock and execute a closure with the connection.
    pub fn with_conn<F, T>(&self, f: F) -> TracksResult<T>
    where
        F: FnOnce(&Connection) -> TracksResult<T>,
    {
        let guard = self
            .conn
            .lock()
            .map_err(|e| to_storage_err(format!("write lock poisoned: {e}")))?;
        f(&guard)
    }

    /// Acquire the write lock and run `f` inside a `BEGIN IMMEDIATE`
    /// transaction. Commits on `Ok`; the transaction rolls back on drop when
    /// `f` fails, so a failed operation leaves no partial rows behind.
    pub fn with_immediate_transaction<F, T>(&self, f: F) -> TracksResult<T>
    where
        F: FnOnce(&Transaction<'_>) -> TracksResult<T>,
    {
        self.with_conn(|conn| {
            let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate)
                .map_err(|e| classify("begin immediate transaction", e))?;
            let result = f(&tx)?;
            tx.commit().map_err(|e| classify("commit", e))?;
            Ok(result)
        })
    }
}
