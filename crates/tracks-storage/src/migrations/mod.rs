//! Schema migrations using PRAGMA user_version.

pub mod v001_pending_events;

use rusqlite::Connection;

use tracks_core::errors::{TracksError, TracksResult};

use crate::classify;

/// Latest schema version.
pub const LATEST_VERSION: u32 = 1;

/// Run all pending migrations.
pub fn run_migrations(conn: &Connection) -> TracksResult<()> {
    let current = current_version(conn)?;
    if current > LATEST_VERSION {
        return Err(TracksError::corruption(format!(
            "schema version {current} is newer than supported version {LATEST_VERSION}"
        )));
    }

    let migrations: &[(&str, u32)] = &[(v001_pending_events::MIGRATION_SQL, 1)];

    for (sql, version) in migrations {
        if current < *version {
            conn.execute_batch(sql)
                .map_err(|e| classify(&format!("migration v{version:03}"), e))?;
            conn.pragma_update(None, "user_version", version)
                .map_err(|e| classify(&format!("record migration v{version:03}"), e))?;
            tracing::info!(version = version, "applied migration");
        }
    }

    Ok(())
}

/// Get the current schema version.
pub fn current_version(conn: &Connection) -> TracksResult<u32> {
    conn.pragma_query_value(None, "user_version", |row| row.get(0))
        .map_err(|e| classify("read user_version", e))
}
