//! Error types for lookup table loading.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading or deriving lookup tables.
#[derive(Debug, Error)]
pub enum LookupError {
    /// Failed to read a file.
    #[error("failed to read file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The persisted document is not valid JSON or has the wrong shape.
    #[error("failed to parse lookup document {name}: {source}")]
    Json {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    /// A delimited reference table could not be parsed.
    #[error("failed to parse reference table {name}: {message}")]
    Csv { name: String, message: String },

    /// Failed to serialize the lookup document.
    #[error("failed to serialize lookup document: {0}")]
    Serialize(#[source] serde_json::Error),
}

impl LookupError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for lookup operations.
pub type Result<T> = std::result::Result<T, LookupError>;
