//! Serverless job for Traffic Sentinel.
//!
//! Wires the pipeline stages together behind a function-as-a-service style
//! entry point:
//!
//! ```text
//! trigger --> Pipeline::handle_invocation
//!               |-- EventSource::next_batch      (mock or file replay)
//!               |-- detect + select_top          (pure, clock injected)
//!               `-- SnapshotPublisher::publish   (object store, deadline)
//!             --> InvocationResponse { statusCode, body }
//! ```
//!
//! All collaborators are constructed explicitly (see [`build_pipeline`]) and
//! injected, so tests swap in a fixed clock, a static source, and an
//! in-memory store without touching process-wide state.

pub mod config;
pub mod error;
pub mod pipeline;

use sentinel_detector::SystemClock;
use sentinel_publisher::{HttpObjectStore, SnapshotPublisher};
use sentinel_source::{EventSource, FileEventSource, MockTrafficSource};
use tracing::info;

pub use config::{JobConfig, LogFormat};
pub use error::{JobError, PipelineError};
pub use pipeline::{Pipeline, RunReport};

/// The production pipeline: boxed source, wall clock.
pub type JobPipeline = Pipeline<Box<dyn EventSource>, SystemClock>;

/// Build the event source selected by `config`.
pub fn build_source(config: &JobConfig) -> Result<Box<dyn EventSource>, JobError> {
    if let Some(path) = &config.events_file {
        info!(path = %path.display(), "replaying events from file");
        return Ok(Box::new(FileEventSource::new(path.clone())));
    }
    info!(
        attack_probability = config.mock.attack_probability,
        seeded = config.mock.seed.is_some(),
        "generating mock traffic"
    );
    Ok(Box::new(MockTrafficSource::new(config.mock.clone())?))
}

/// Build the production pipeline from `config`.
pub fn build_pipeline(config: &JobConfig) -> Result<JobPipeline, JobError> {
    let store = HttpObjectStore::new(&config.store_config())?;
    info!(
        bucket = config.bucket,
        endpoint = config.endpoint,
        timeout_ms = config.publish_timeout.as_millis(),
        "object store configured"
    );
    let publisher = SnapshotPublisher::new(store, config.publish_timeout);
    let source = build_source(config)?;
    Ok(Pipeline::new(source, SystemClock, publisher, config.top_k))
}
