//! Insert, list, count, and delete pending events.

use rusqlite::{params, Connection, Row};

use tracks_core::errors::{TracksError, TracksResult};
use tracks_core::event::{Event, EventId, EventRecord};

use crate::{classify, classify_read, is_unique_violation};

const SELECT_COLUMNS: &str = "SELECT id, name, username, user_id, user_agent, user_type,
        event_date, anonymous_username, properties
 FROM pending_events";

/// Insert one event at the end of the pending collection.
/// Fails with `InvalidArgument` if an event with the same id is already pending.
pub fn insert_event(conn: &Connection, record: &EventRecord) -> TracksResult<()> {
    conn.execute(
        "INSERT INTO pending_events (
            id, name, username, user_id, user_agent, user_type,
            event_date, anonymous_username, properties
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            record.id,
            record.name,
            record.username,
            record.user_id,
            record.user_agent,
            record.user_type,
            record.event_date,
            record.anonymous_username,
            record.properties,
        ],
    )
    .map_err(|e| {
        if is_unique_violation(&e) {
            TracksError::invalid_argument("event", format!("event {} is already pending", record.id))
        } else {
            classify("insert_event", e)
        }
    })?;
    Ok(())
}

/// Pending events in insertion order. `limit = None` returns all of them.
pub fn list_events(conn: &Connection, limit: Option<usize>) -> TracksResult<Vec<Event>> {
    // SQLite treats a negative LIMIT as "no limit".
    let limit = limit.map_or(-1, |n| i64::try_from(n).unwrap_or(i64::MAX));

    let mut stmt = conn
        .prepare(&format!("{SELECT_COLUMNS} ORDER BY seq ASC LIMIT ?1"))
        .map_err(|e| classify_read("list_events prepare", e))?;
    let records = stmt
        .query_map(params![limit], row_to_record)
        .map_err(|e| classify_read("list_events query", e))?;

    let mut events = Vec::new();
    for record in records {
        let record = record.map_err(|e| classify_read("list_events row", e))?;
        events.push(record.into_event()?);
    }
    Ok(events)
}

/// Number of pending events.
pub fn count_events(conn: &Connection) -> TracksResult<usize> {
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM pending_events", [], |row| row.get(0))
        .map_err(|e| classify_read("count_events", e))?;
    usize::try_from(count)
        .map_err(|_| TracksError::corruption(format!("negative event count {count}")))
}

/// Delete the pending events with the given ids. Ids that are not pending
/// are skipped. Returns the number of rows deleted.
pub fn delete_events(conn: &Connection, ids: &[EventId]) -> TracksResult<usize> {
    if ids.is_empty() {
        return Ok(0);
    }
    let mut stmt = conn
        .prepare_cached("DELETE FROM pending_events WHERE id = ?1")
        .map_err(|e| classify("delete_events prepare", e))?;
    let mut deleted = 0;
    for id in ids {
        deleted += stmt
            .execute(params![id.to_string()])
            .map_err(|e| classify("delete_events", e))?;
    }
    Ok(deleted)
}

/// Delete every pending event. Returns the number of rows deleted.
pub fn delete_all(conn: &Connection) -> TracksResult<usize> {
    conn.execute("DELETE FROM pending_events", [])
        .map_err(|e| classify("delete_all", e))
}

fn row_to_record(row: &Row<'_>) -> rusqlite::Result<EventRecord> {
    Ok(EventRecord {
        id: row.get(0)?,
        name: row.get(1)?,
        username: row.get(2)?,
        user_id: row.get(3)?,
        user_agent: row.get(4)?,
        user_type: row.get(5)?,
        event_date: row.get(6)?,
        anonymous_username: row.get(7)?,
        properties: row.get(8)?,
    })
}
