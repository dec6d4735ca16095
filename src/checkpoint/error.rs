//! Snapshot error types.

use crate::builder::BuildError;
use std::fmt;
use thiserror::Error;

/// Encoding used for a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Binary,
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => f.write_str("JSON"),
            Self::Binary => f.write_str("binary"),
        }
    }
}

/// Errors that can occur while saving or restoring a snapshot
#[derive(Debug, Error)]
pub enum CheckpointError {
    #[error("Failed to encode snapshot as {format}: {message}")]
    Encode { format: Format, message: String },

    #[error("Failed to decode {format} snapshot: {message}")]
    Decode { format: Format, message: String },

    #[error("Unsupported snapshot version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// The recorded history does not lead to the published state.
    #[error("Snapshot history ends in '{history_ends}' but the published state is '{published}'")]
    HistoryMismatch {
        history_ends: String,
        published: String,
    },

    #[error("Snapshot carries invalid history options: {0}")]
    InvalidConfig(#[from] BuildError),
}

impl CheckpointError {
    pub(crate) fn encode(format: Format, error: impl fmt::Display) -> Self {
        Self::Encode {
            format,
            message: error.to_string(),
        }
    }

    pub(crate) fn decode(format: Format, error: impl fmt::Display) -> Self {
        Self::Decode {
            format,
            message: error.to_string(),
        }
    }
}
