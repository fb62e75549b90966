//! Error types.
//!
//! Scheduling and workflow outcomes are never errors: unknown ids,
//! refused transitions and unplaceable sessions come back as
//! `Option`/`bool`/partial results. `Error` covers the infrastructure
//! around the engine only: storage, configuration, and an exhausted
//! version counter.

use std::path::PathBuf;

use thiserror::Error;

/// Storage or configuration failure.
#[derive(Debug, Error)]
pub enum Error {
    /// File I/O error.
    #[error("failed to {operation} file: {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Data could not be encoded.
    #[error("failed to serialize {what}")]
    Serialization {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Stored data could not be decoded.
    #[error("failed to deserialize {what}")]
    Deserialization {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Temp file could not be renamed over the target.
    #[error("failed to replace {target_path}")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The version counter is at `u32::MAX`.
    #[error("no version number left after {last}")]
    VersionsExhausted { last: u32 },

    /// Configuration is structurally unusable.
    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },
}

impl Error {
    pub(crate) fn io(operation: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            operation,
            path: path.into(),
            source,
        }
    }

    pub(crate) fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }
}

/// Result type alias for storage and configuration operations.
pub type Result<T> = std::result::Result<T, Error>;
