//! Error types for the detector.

/// Errors that can occur while aggregating a batch.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DetectError {
    /// An event did not carry a usable source address.
    ///
    /// The run is aborted; no partial aggregation is returned.
    #[error("malformed event at index {index}: {reason}")]
    MalformedInput {
        /// Zero-based position of the offending event in the batch.
        index: usize,
        /// What was wrong with it.
        reason: String,
    },
}
