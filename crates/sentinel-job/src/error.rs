//! Error types for the job.
//!
//! [`JobError`] covers startup (configuration and wiring); [`PipelineError`]
//! covers a single invocation. Pipeline errors are transparent so the
//! invocation response body carries the failing stage's own message.

use sentinel_detector::DetectError;
use sentinel_publisher::PublishError;
use sentinel_source::SourceError;

/// Errors that prevent the job from starting.
#[derive(Debug, thiserror::Error)]
pub enum JobError {
    /// Configuration is invalid or missing.
    #[error("config error: {0}")]
    Config(String),

    /// The event source could not be constructed.
    #[error("source setup failed: {0}")]
    Source(#[from] SourceError),

    /// The object store could not be constructed.
    #[error("object store setup failed: {0}")]
    Store(#[from] PublishError),
}

/// Errors that abort one pipeline run.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// The batch could not be pulled from the source.
    #[error(transparent)]
    Source(#[from] SourceError),

    /// The batch contained a malformed event.
    #[error(transparent)]
    MalformedInput(#[from] DetectError),

    /// The snapshot could not be written.
    #[error(transparent)]
    Publish(#[from] PublishError),
}
