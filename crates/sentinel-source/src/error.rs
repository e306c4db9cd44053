//! Error types for event sources.

use std::path::PathBuf;

/// Errors that can occur while pulling a batch of events.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The source was configured with invalid parameters.
    #[error("invalid source configuration: {0}")]
    Config(String),

    /// The backing file could not be read.
    #[error("failed to read events from {path}: {source}")]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The backing data is not valid JSON.
    #[error("failed to parse events: {0}")]
    Parse(#[from] serde_json::Error),

    /// The backing data is JSON but not a list of records.
    #[error("unexpected event document: {0}")]
    Format(String),
}
