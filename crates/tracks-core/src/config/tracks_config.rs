//! Top-level Tracks configuration.

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::defaults;
use super::{ObservabilityConfig, StorageConfig};
use crate::errors::ConfigError;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`TRACKS_*`)
/// 2. Config file passed to [`TracksConfig::load`]
/// 3. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TracksConfig {
    pub storage: StorageConfig,
    pub observability: ObservabilityConfig,
}

impl TracksConfig {
    /// Load from an optional TOML file, then apply env overrides and validate.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Apply `TRACKS_*` environment variables on top of the current values.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(path) = std::env::var("TRACKS_DB_PATH") {
            self.storage.db_path = path;
        }
        if let Some(size) = env_parse::<usize>("TRACKS_READ_POOL_SIZE")? {
            self.storage.read_pool_size = size;
        }
        if let Some(size) = env_parse::<usize>("TRACKS_BATCH_SIZE")? {
            self.storage.default_batch_size = size;
        }
        if let Ok(level) = std::env::var("TRACKS_LOG_LEVEL") {
            self.observability.log_level = level.to_ascii_lowercase();
        }
        Ok(())
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage.db_path.trim().is_empty() {
            return Err(ConfigError::ValidationFailed {
                field: "storage.db_path".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        if !(1..=defaults::MAX_READ_POOL_SIZE).contains(&self.storage.read_pool_size) {
            return Err(ConfigError::ValidationFailed {
                field: "storage.read_pool_size".to_string(),
                message: format!("must be between 1 and {}", defaults::MAX_READ_POOL_SIZE),
            });
        }
        if self.storage.busy_timeout_ms == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "storage.busy_timeout_ms".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if self.storage.default_batch_size == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "storage.default_batch_size".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if !LOG_LEVELS.contains(&self.observability.log_level.as_str()) {
            return Err(ConfigError::ValidationFailed {
                field: "observability.log_level".to_string(),
                message: format!("must be one of {}", LOG_LEVELS.join(", ")),
            });
        }
        Ok(())
    }
}

fn env_parse<T: FromStr>(key: &str) -> Result<Option<T>, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| ConfigError::InvalidValue {
                field: key.to_string(),
                message: e.to_string(),
            }),
        Err(_) => Ok(None),
    }
}
