//! Configuration system for Tracks.
//! TOML-based, resolution: env (`TRACKS_*`) > config file > defaults.

pub mod defaults;
pub mod observability_config;
pub mod storage_config;
pub mod tracks_config;

pub use observability_config::ObservabilityConfig;
pub use storage_config::StorageConfig;
pub use tracks_config::TracksConfig;
