//! TracksErrorCode trait for FFI and telemetry boundaries.

/// Stable, machine-readable error codes.
/// Every error enum implements this so host bindings can branch on the code
/// instead of parsing messages.
pub trait TracksErrorCode {
    /// Returns the error code string (e.g., "PERSISTENCE_FAILURE").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted boundary string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const INVALID_ARGUMENT: &str = "INVALID_ARGUMENT";
pub const PERSISTENCE_FAILURE: &str = "PERSISTENCE_FAILURE";
pub const STORAGE_CORRUPTION: &str = "STORAGE_CORRUPTION";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
