//! Error types for the layered storage and configuration-resolution system.

use thiserror::Error;

/// Storage-related errors
///
/// Most storage failures degrade locally (empty-object fallback on bad JSON,
/// boolean `false` for unsupported operations) and never surface here. The
/// one caller contract violation that does propagate is a malformed
/// `@key.path` storage key.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Malformed path key '{0}': expected '@key' or '@key.path' with a non-empty, dot-free key")]
    MalformedPathKey(String),

    #[error("Logging configuration error: {0}")]
    LoggingConfig(String),
}
