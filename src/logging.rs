//! Logging System
//!
//! Structured logging built on the `tracing` crate. Initialization installs
//! an `EnvFilter` behind a reload handle so a `LogLevel` found in persisted
//! settings can raise or lower verbosity mid-run. Verbosity changes never
//! affect data flow.

use crate::error::StorageError;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use tracing::warn;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, reload, util::SubscriberInitExt, EnvFilter, Registry,
};

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error, off
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format: json, text (default: text)
    #[serde(default = "default_format")]
    pub format: String,

    /// Enable colored output (text format only)
    #[serde(default = "default_true")]
    pub color: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "text".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_format(),
            color: default_true(),
        }
    }
}

/// Reload handle for the active filter, installed by `init_logging`.
static FILTER_HANDLE: OnceLock<reload::Handle<EnvFilter, Registry>> = OnceLock::new();

/// Initialize the logging system
///
/// Priority order (highest to lowest):
/// 1. Environment variables (LAYERSTORE_LOG, LAYERSTORE_LOG_FORMAT)
/// 2. Configuration
/// 3. Defaults
pub fn init_logging(config: Option<&LoggingConfig>) -> Result<(), StorageError> {
    let filter = build_env_filter(config)?;
    let (filter, handle) = reload::Layer::new(filter);

    let format = determine_format(config)?;
    let use_color = config.map(|c| c.color).unwrap_or(true);

    let base_subscriber = Registry::default().with(filter);

    if format == "json" {
        base_subscriber
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(std::io::stdout),
            )
            .init();
    } else {
        base_subscriber
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(use_color)
                    .with_writer(std::io::stdout),
            )
            .init();
    }

    let _ = FILTER_HANDLE.set(handle);
    Ok(())
}

/// Apply a host-style log level (`OFF`/`ERROR`/`WARN`/`INFO`/`DEBUG`/`ALL`)
/// to the active subscriber.
///
/// A no-op when logging was never initialized; an unrecognized level leaves
/// the current filter in place.
pub fn apply_log_level(level: &str) {
    let Some(filter) = level_filter_for(level) else {
        warn!(level, "unrecognized log level, keeping current verbosity");
        return;
    };
    if let Some(handle) = FILTER_HANDLE.get() {
        if handle.reload(EnvFilter::new(filter.to_string())).is_err() {
            warn!(level, "failed to reload log filter");
        }
    }
}

/// Map a host-style level token onto a tracing level filter.
///
/// `ALL` maps to TRACE; the token is matched case-insensitively since hosts
/// disagree on casing.
fn level_filter_for(level: &str) -> Option<LevelFilter> {
    match level.to_ascii_uppercase().as_str() {
        "OFF" => Some(LevelFilter::OFF),
        "ERROR" => Some(LevelFilter::ERROR),
        "WARN" | "WARNING" => Some(LevelFilter::WARN),
        "INFO" => Some(LevelFilter::INFO),
        "DEBUG" => Some(LevelFilter::DEBUG),
        "ALL" | "TRACE" => Some(LevelFilter::TRACE),
        _ => None,
    }
}

/// Build environment filter from config or environment variables
fn build_env_filter(config: Option<&LoggingConfig>) -> Result<EnvFilter, StorageError> {
    if let Ok(filter) = EnvFilter::try_from_env("LAYERSTORE_LOG") {
        return Ok(filter);
    }

    let level = config.map(|c| c.level.as_str()).unwrap_or("info");
    if level == "off" {
        return Ok(EnvFilter::new("off"));
    }

    level
        .parse::<LevelFilter>()
        .map_err(|e| StorageError::LoggingConfig(format!("Invalid log level '{}': {}", level, e)))?;
    Ok(EnvFilter::new(level))
}

/// Determine output format from config or environment
fn determine_format(config: Option<&LoggingConfig>) -> Result<String, StorageError> {
    if let Ok(format) = std::env::var("LAYERSTORE_LOG_FORMAT") {
        if format == "json" || format == "text" {
            return Ok(format);
        }
    }

    let format = config.map(|c| c.format.as_str()).unwrap_or("text");
    if format != "json" && format != "text" {
        return Err(StorageError::LoggingConfig(format!(
            "Invalid log format '{}': expected 'json' or 'text'",
            format
        )));
    }
    Ok(format.to_string())
}
