//! # tracks-storage
//!
//! SQLite persistence for pending Tracks events. One serialized write
//! connection, a pool of read-only connections in WAL mode, schema
//! migrations via `PRAGMA user_version`, and integrity/recovery operations.

pub mod engine;
pub mod migrations;
pub(crate) mod pool;
pub(crate) mod queries;
pub mod recovery;

pub use engine::EventStore;

use rusqlite::ErrorCode;
use tracks_core::errors::TracksError;

/// Wrap a message as a transient persistence failure.
pub(crate) fn to_storage_err(message: impl Into<String>) -> TracksError {
    TracksError::persistence(message)
}

/// Map a SQLite error to the Tracks taxonomy: corrupt or non-database files
/// are fatal, everything else is a transient persistence failure.
pub(crate) fn classify(context: &str, e: rusqlite::Error) -> TracksError {
    if is_corruption(&e) {
        TracksError::corruption(format!("{context}: {e}"))
    } else {
        TracksError::persistence(format!("{context}: {e}"))
    }
}

/// Like [`classify`], but a row whose columns do not have the expected types
/// is also corruption.
pub(crate) fn classify_read(context: &str, e: rusqlite::Error) -> TracksError {
    match e {
        rusqlite::Error::FromSqlConversionFailure(..)
        | rusqlite::Error::InvalidColumnType(..)
        | rusqlite::Error::IntegralValueOutOfRange(..) => {
            TracksError::corruption(format!("{context}: {e}"))
        }
        other => classify(context, other),
    }
}

fn is_corruption(e: &rusqlite::Error) -> bool {
    matches!(
        e,
        rusqlite::Error::SqliteFailure(err, _)
            if matches!(err.code, ErrorCode::DatabaseCorrupt | ErrorCode::NotADatabase)
    )
}

pub(crate) fn is_unique_violation(e: &rusqlite::Error) -> bool {
    matches!(
        e,
        rusqlite::Error::SqliteFailure(err, _)
            if err.code == ErrorCode::ConstraintViolation
                && err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}
