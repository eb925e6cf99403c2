//! V001: pending_events.
//! `seq` carries insertion order; `id` is the removal key.

pub const MIGRATION_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS pending_events (
    seq                 INTEGER PRIMARY KEY AUTOINCREMENT,
    id                  TEXT NOT NULL UNIQUE,
    name                TEXT NOT NULL,
    username            TEXT,
    user_id             TEXT,
    user_agent          TEXT NOT NULL,
    user_type           TEXT NOT NULL,
    event_date          TEXT NOT NULL,
    anonymous_username  TEXT,
    properties          TEXT NOT NULL DEFAULT '{}',
    enqueued_at         TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
) STRICT;
"#;
