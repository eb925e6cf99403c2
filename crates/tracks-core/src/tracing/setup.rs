//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::ObservabilityConfig;

static INIT: Once = Once::new();

const LOG_ENV: &str = "TRACKS_LOG";
const DEFAULT_FILTER: &str = "tracks=info";

/// Initialize the Tracks logging system with human-readable output.
///
/// Reads `TRACKS_LOG` for per-target log levels, e.g.
/// `TRACKS_LOG=tracks_storage=debug,tracks_core=info`.
/// Falls back to `tracks=info` if unset or invalid.
///
/// Idempotent: only the first call installs a subscriber.
pub fn init_tracing() {
    install(env_filter(DEFAULT_FILTER), false);
}

/// Same as [`init_tracing`] but emits one JSON object per line.
pub fn init_tracing_json() {
    install(env_filter(DEFAULT_FILTER), true);
}

/// Initialize from config. `TRACKS_LOG` still takes precedence over
/// `log_level`.
pub fn init_tracing_from_config(config: &ObservabilityConfig) {
    let fallback = format!("tracks_core={0},tracks_storage={0}", config.log_level);
    install(env_filter(&fallback), config.json_logs);
}

fn env_filter(fallback: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback))
}

fn install(filter: EnvFilter, json: bool) {
    INIT.call_once(|| {
        let registry = tracing_subscriber::registry().with(filter);
        let result = if json {
            registry
                .with(fmt::layer().json().with_target(true).with_thread_ids(true))
                .try_init()
        } else {
            registry
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_thread_ids(true)
                        .with_file(true)
                        .with_line_number(true),
                )
                .try_init()
        };
        // Another subscriber was installed by the host application.
        if result.is_err() {
            tracing::debug!("global tracing subscriber already set");
        }
    });
}
