//! Anomaly detection core for the Traffic Sentinel job.
//!
//! Everything in this crate is pure: no I/O, no global state, and no direct
//! wall-clock reads. Time enters only through an injected [`Clock`].
//!
//! # Pipeline position
//!
//! ```text
//! EventSource --> detect() --> select_top(k) --> SnapshotPublisher
//! ```
//!
//! # Modules
//!
//! - [`clock`] -- [`Clock`] trait with system and fixed implementations
//! - [`detector`] -- single-pass aggregation and threshold classification
//! - [`select`] -- stable top-K selection by count
//! - [`error`] -- [`DetectError`]

pub mod clock;
pub mod detector;
pub mod error;
pub mod select;

pub use clock::{Clock, FixedClock, SystemClock};
pub use detector::{classify, detect, detect_with_clock, tally_by_classification};
pub use error::DetectError;
pub use select::{DEFAULT_TOP_K, select_top};
