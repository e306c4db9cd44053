//! Traffic event sources for the Traffic Sentinel job.
//!
//! An [`EventSource`] produces one finite batch of raw records per run.
//! Records are loosely typed JSON (`{"ip": "<address>"}`), exactly as a real
//! ingestion feed would deliver them, so malformed records reach the
//! detector and are rejected there.
//!
//! # Implementations
//!
//! - [`MockTrafficSource`] -- randomized background traffic with optional
//!   attack bursts
//! - [`FileEventSource`] -- replays a recorded JSON array from disk
//! - [`StaticEventSource`] -- returns a fixed batch (tests and dry runs)

pub mod error;
pub mod file;
pub mod mock;

use serde_json::Value;

pub use error::SourceError;
pub use file::FileEventSource;
pub use mock::{BACKGROUND_ADDRESSES, BOT_ADDRESS, MockTrafficConfig, MockTrafficSource};

/// A producer of traffic batches.
pub trait EventSource {
    /// Short name for logging.
    fn name(&self) -> &'static str;

    /// Pull the next batch of raw records.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the batch cannot be produced at all.
    fn next_batch(&mut self) -> Result<Vec<Value>, SourceError>;
}

/// A source that hands out the same batch every time.
#[derive(Debug, Clone, Default)]
pub struct StaticEventSource {
    events: Vec<Value>,
}

impl StaticEventSource {
    /// Serve `events` on every call.
    pub const fn new(events: Vec<Value>) -> Self {
        Self { events }
    }
}

impl EventSource for StaticEventSource {
    fn name(&self) -> &'static str {
        "static"
    }

    fn next_batch(&mut self) -> Result<Vec<Value>, SourceError> {
        Ok(self.events.clone())
    }
}

impl<S: EventSource + ?Sized> EventSource for Box<S> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn next_batch(&mut self) -> Result<Vec<Value>, SourceError> {
        (**self).next_batch()
    }
}
