//! Error handling for Tracks.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod config_error;
pub mod error_code;
pub mod tracks_error;

pub use config_error::ConfigError;
pub use error_code::TracksErrorCode;
pub use tracks_error::{TracksError, TracksResult};
