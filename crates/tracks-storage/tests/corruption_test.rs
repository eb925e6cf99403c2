//! Corrupt storage: detection, fail-fast poisoning, and both recovery paths.

use std::sync::Arc;

use chrono::Utc;
use rusqlite::Connection;
use tracks_core::errors::TracksErrorCode;
use tracks_core::{Event, EventFactory, IEventStorage, StaticContext, TracksError, UserType};
use tracks_storage::EventStore;

fn make_event(name: &str) -> Event {
    EventFactory::new(Arc::new(StaticContext::empty()))
        .create_event(name, None, None, "", UserType::Anonymous, Utc::now())
        .unwrap()
}

fn tamper(db_path: &std::path::Path, sql: &str) {
    let conn = Connection::open(db_path).unwrap();
    conn.busy_timeout(std::time::Duration::from_secs(5)).unwrap();
    conn.execute_batch(sql).unwrap();
}

fn assert_corruption(err: &TracksError) {
    assert!(
        matches!(err, TracksError::StorageCorruption { .. }),
        "expected corruption, got {err}"
    );
    assert_eq!(err.error_code(), "STORAGE_CORRUPTION");
}

#[test]
fn undecodable_row_poisons_the_store() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("tampered.db");
    let store = EventStore::open(&db_path).unwrap();
    store.append(&make_event("A")).unwrap();
    store.append(&make_event("B")).unwrap();

    tamper(&db_path, "UPDATE pending_events SET user_type = 'robot' WHERE name = 'B'");

    assert_corruption(&store.all_events().unwrap_err());
    assert!(store.is_poisoned());

    // Every operation now fails fast, including ones that would not read the
    // bad row.
    assert_corruption(&store.count().unwrap_err());
    assert_corruption(&store.append(&make_event("C")).unwrap_err());
    assert_corruption(&store.remove_ids(&[]).unwrap_err());
    assert_corruption(&store.pending_batch(0).unwrap_err());
    assert_corruption(&store.check_integrity().unwrap_err());
    assert_corruption(&store.schema_version().unwrap_err());
    assert_corruption(&store.is_wal_mode().unwrap_err());

    store.reinitialize().unwrap();
    assert_eq!(
        store.schema_version().unwrap(),
        tracks_storage::migrations::LATEST_VERSION
    );
}

#[test]
fn reinitialize_discards_pending_events_and_restores_service() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("reinit.db");
    let store = EventStore::open(&db_path).unwrap();
    store.append(&make_event("A")).unwrap();

    tamper(&db_path, "UPDATE pending_events SET properties = 'not json'");
    assert!(store.all_events().is_err());
    assert!(store.is_poisoned());

    store.reinitialize().unwrap();
    assert!(!store.is_poisoned());
    assert_eq!(store.count().unwrap(), 0);

    let fresh = make_event("after");
    store.append(&fresh).unwrap();
    assert_eq!(store.all_events().unwrap(), vec![fresh]);
}

#[test]
fn reinitialize_on_healthy_store_empties_it() {
    let store = EventStore::open_in_memory().unwrap();
    store.append(&make_event("A")).unwrap();
    store.reinitialize().unwrap();
    assert_eq!(store.count().unwrap(), 0);
    assert_eq!(store.schema_version().unwrap(), tracks_storage::migrations::LATEST_VERSION);
}

#[test]
fn garbage_file_fails_to_open_and_recreate_recovers() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("garbage.db");
    std::fs::write(&db_path, vec![0xA5u8; 8192]).unwrap();

    let err = EventStore::open(&db_path).unwrap_err();
    assert!(err.is_fatal(), "expected corruption, got {err}");

    let store = EventStore::recreate(&db_path).unwrap();
    assert_eq!(store.count().unwrap(), 0);
    store.append(&make_event("A")).unwrap();
    assert_eq!(store.count().unwrap(), 1);
}

#[test]
fn recreate_on_missing_file_just_opens() {
    let dir = tempfile::tempdir().unwrap();
    let store = EventStore::recreate(&dir.path().join("new.db")).unwrap();
    assert_eq!(store.count().unwrap(), 0);
}

#[test]
fn newer_schema_version_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("future.db");
    drop(EventStore::open(&db_path).unwrap());

    tamper(&db_path, "PRAGMA user_version = 99");

    let err = EventStore::open(&db_path).unwrap_err();
    assert_corruption(&err);
}

#[test]
fn duplicate_append_does_not_poison() {
    let store = EventStore::open_in_memory().unwrap();
    let event = make_event("A");
    store.append(&event).unwrap();
    assert!(store.append(&event).is_err());
    assert!(!store.is_poisoned());
    store.check_integrity().unwrap();
}
