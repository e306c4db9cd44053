//! Replay of recorded traffic from a JSON file.
//!
//! The file holds a single JSON array of raw records, e.g.
//! `[{"ip": "10.0.0.5"}, {"ip": "66.66.66.66"}]`. Records are passed through
//! untouched; validating their shape is the detector's job.

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::error::SourceError;
use crate::EventSource;

/// Reads the whole file on every batch.
#[derive(Debug, Clone)]
pub struct FileEventSource {
    path: PathBuf,
}

impl FileEventSource {
    /// Replay events from `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file being replayed.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl EventSource for FileEventSource {
    fn name(&self) -> &'static str {
        "file"
    }

    fn next_batch(&mut self) -> Result<Vec<Value>, SourceError> {
        let contents = std::fs::read_to_string(&self.path).map_err(|source| SourceError::Io {
            path: self.path.clone(),
            source,
        })?;

        let document: Value = serde_json::from_str(&contents)?;
        let Value::Array(events) = document else {
            return Err(SourceError::Format(format!(
                "{} must contain a JSON array of events",
                self.path.display()
            )));
        };

        debug!(path = %self.path.display(), events = events.len(), "events loaded from file");
        Ok(events)
    }
}
