//! Checkpoint, integrity check, schema reset.

use rusqlite::Connection;

use tracks_core::errors::TracksResult;

use crate::{classify, migrations};

/// WAL checkpoint.
pub fn wal_checkpoint(conn: &Connection) -> TracksResult<()> {
    conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE)")
        .map_err(|e| classify("wal_checkpoint", e))?;
    Ok(())
}

/// Run integrity check. Returns `Ok(None)` if the database is OK, otherwise
/// the first problem SQLite reported.
pub fn integrity_check(conn: &Connection) -> TracksResult<Option<String>> {
    let result: String = conn
        .query_row("PRAGMA integrity_check", [], |row| row.get(0))
        .map_err(|e| classify("integrity_check", e))?;
    Ok(if result == "ok" { None } else { Some(result) })
}

/// Drop the pending collection and rebuild the schema from scratch.
pub fn reset_schema(conn: &Connection) -> TracksResult<()> {
    conn.execute_batch(
        "
        DROP TABLE IF EXISTS pending_events;
        PRAGMA user_version = 0;
        ",
    )
    .map_err(|e| classify("reset_schema", e))?;
    migrations::run_migrations(conn)
}
