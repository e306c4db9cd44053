//! Snapshot publishing for the Traffic Sentinel job.
//!
//! The publisher is the job's only durable interface: it serializes the
//! bounded [`Snapshot`](sentinel_types::Snapshot) and overwrites a single
//! well-known object that the dashboard polls.
//!
//! # Architecture
//!
//! ```text
//! Snapshot --> serde_json --> SnapshotPublisher --(timeout)--> ObjectStore
//!                                                             |-- Http (reqwest, S3-compatible)
//!                                                             `-- Memory (tests, dry runs)
//! ```
//!
//! The store is constructed by the caller and injected, so nothing in this
//! crate touches process-wide state.

pub mod error;
pub mod http;
pub mod memory;
pub mod publisher;
pub mod store;

pub use error::PublishError;
pub use http::{DEFAULT_ENDPOINT, HttpObjectStore, HttpStoreConfig};
pub use memory::{MemoryObjectStore, StoredObject};
pub use publisher::{
    DEFAULT_PUBLISH_TIMEOUT, PublishReceipt, SNAPSHOT_CONTENT_TYPE, SNAPSHOT_KEY,
    SnapshotPublisher,
};
pub use store::{ObjectAcl, ObjectStore, PutObject};
