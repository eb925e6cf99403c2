use super::config_error::ConfigError;
use super::error_code::{self, TracksErrorCode};

/// Top-level error for every Tracks operation.
#[derive(Debug, thiserror::Error)]
pub enum TracksError {
    /// Bad input to event construction or to the store.
    #[error("invalid argument `{field}`: {reason}")]
    InvalidArgument { field: String, reason: String },

    /// Local I/O failed while writing. Never retried internally.
    #[error("persistence failure: {reason}")]
    PersistenceFailure { reason: String },

    /// Storage is unreadable or inconsistent. The store refuses further
    /// operations until it is reinitialized.
    #[error("storage corruption: {details}")]
    StorageCorruption { details: String },

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl TracksError {
    pub fn invalid_argument(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn persistence(reason: impl Into<String>) -> Self {
        Self::PersistenceFailure {
            reason: reason.into(),
        }
    }

    pub fn corruption(details: impl Into<String>) -> Self {
        Self::StorageCorruption {
            details: details.into(),
        }
    }

    /// Whether this error leaves the store unusable.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::StorageCorruption { .. })
    }
}

impl TracksErrorCode for TracksError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidArgument { .. } => error_code::INVALID_ARGUMENT,
            Self::PersistenceFailure { .. } => error_code::PERSISTENCE_FAILURE,
            Self::StorageCorruption { .. } => error_code::STORAGE_CORRUPTION,
            Self::Config(e) => e.error_code(),
        }
    }
}

/// Convenience alias used throughout the workspace.
pub type TracksResult<T> = Result<T, TracksError>;
