//! Error types for snapshot publishing.
//!
//! Every failure between "snapshot built" and "object durably written" maps
//! to one [`PublishError`] variant. The caller reports it; nothing here
//! retries.

/// Errors that can occur while publishing a snapshot.
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    /// The snapshot could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The store could not be reached (DNS, connect, TLS, reset).
    #[error("transport error: {0}")]
    Transport(String),

    /// The store answered but refused the write (auth, missing bucket, ...).
    #[error("object store rejected write with status {status}: {body}")]
    Rejected {
        /// HTTP status returned by the store.
        status: u16,
        /// Response body, for diagnostics.
        body: String,
    },

    /// The write did not complete before the publish deadline.
    #[error("publish timed out after {timeout_ms}ms")]
    Timeout {
        /// The deadline that was exceeded.
        timeout_ms: u64,
    },

    /// The store is in an unusable state.
    #[error("object store error: {0}")]
    Store(String),

    /// The store was configured with invalid parameters.
    #[error("invalid object store configuration: {0}")]
    Config(String),
}
