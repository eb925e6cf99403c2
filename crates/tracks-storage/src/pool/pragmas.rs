//! PRAGMA configuration applied to every SQLite connection.
//!
//! WAL mode, FULL sync (an append is durable once it returns), 16MB cache,
//! configurable busy timeout.

use std::time::Duration;

use rusqlite::Connection;

use tracks_core::errors::TracksResult;

use crate::classify;

/// Apply write-side pragmas.
pub fn apply_pragmas(conn: &Connection, busy_timeout: Duration) -> TracksResult<()> {
    conn.busy_timeout(busy_timeout)
        .map_err(|e| classify("set busy_timeout", e))?;
    conn.execute_batch(
        "
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = FULL;
        PRAGMA cache_size = -16000;
        PRAGMA foreign_keys = ON;
        ",
    )
    .map_err(|e| classify("apply pragmas", e))?;
    Ok(())
}

/// Apply read-only pragmas to a read connection.
/// Skips write-side settings (journal_mode, synchronous).
pub fn apply_read_pragmas(conn: &Connection, busy_timeout: Duration) -> TracksResult<()> {
    conn.busy_timeout(busy_timeout)
        .map_err(|e| classify("set busy_timeout", e))?;
    conn.execute_batch(
        "
        PRAGMA query_only = ON;
        PRAGMA cache_size = -16000;
        PRAGMA temp_store = MEMORY;
        ",
    )
    .map_err(|e| classify("apply read pragmas", e))?;
    Ok(())
}

/// Verify that WAL mode is active on a connection.
pub fn verify_wal_mode(conn: &Connection) -> TracksResult<bool> {
    let mode: String = conn
        .pragma_query_value(None, "journal_mode", |row| row.get(0))
        .map_err(|e| classify("read journal_mode", e))?;
    Ok(mode.eq_ignore_ascii_case("wal"))
}
