//! The per-invocation pipeline.
//!
//! ```text
//! EventSource --> detect --> select_top(k) --> Snapshot --> SnapshotPublisher
//! ```
//!
//! One invocation runs the stages in order with no fan-out. The clock is
//! read exactly once, so the snapshot's `last_updated` and every summary's
//! `window_start` carry the same instant. Any stage failure aborts the run;
//! [`Pipeline::handle_invocation`] turns the outcome into the structured
//! response the function runtime expects.

use std::collections::BTreeMap;

use sentinel_detector::{Clock, detect, select_top, tally_by_classification};
use sentinel_publisher::{PublishReceipt, SnapshotPublisher};
use sentinel_source::EventSource;
use sentinel_types::{Classification, InvocationResponse, Snapshot};
use tracing::{Instrument, error, info, info_span, warn};
use uuid::Uuid;

use crate::error::PipelineError;

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Events in the batch.
    pub events_processed: u64,
    /// Distinct source addresses seen.
    pub distinct_addresses: usize,
    /// Addresses per tier, across the whole batch (not only the top-K).
    pub by_classification: BTreeMap<Classification, usize>,
    /// The snapshot that was published.
    pub snapshot: Snapshot,
    /// Where it was written.
    pub receipt: PublishReceipt,
}

/// Source, clock, and publisher wired together for repeated invocations.
///
/// Each run owns its batch and results outright; nothing carries over
/// between runs except the collaborators themselves.
#[derive(Debug)]
pub struct Pipeline<S, C> {
    source: S,
    clock: C,
    publisher: SnapshotPublisher,
    top_k: usize,
}

impl<S: EventSource, C: Clock> Pipeline<S, C> {
    /// Wire a pipeline keeping the `top_k` highest-count addresses.
    pub const fn new(source: S, clock: C, publisher: SnapshotPublisher, top_k: usize) -> Self {
        Self {
            source,
            clock,
            publisher,
            top_k,
        }
    }

    /// Run the pipeline once.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError`] if the source fails, the batch contains a
    /// malformed event, or the snapshot cannot be published. A malformed
    /// batch is rejected before anything is written.
    pub async fn run(&mut self) -> Result<RunReport, PipelineError> {
        let now = self.clock.now();
        info!(source = self.source.name(), top_k = self.top_k, "starting pipeline");

        let events = self.source.next_batch()?;
        let summaries = detect(&events, now)?;

        let by_classification = tally_by_classification(&summaries);
        let distinct_addresses = summaries.len();
        let critical = by_classification
            .get(&Classification::Critical)
            .copied()
            .unwrap_or(0);
        let warning = by_classification
            .get(&Classification::Warning)
            .copied()
            .unwrap_or(0);

        let events_processed = u64::try_from(events.len()).unwrap_or(u64::MAX);
        info!(
            events = events_processed,
            addresses = distinct_addresses,
            critical,
            warning,
            "batch analyzed"
        );
        if critical > 0 {
            warn!(critical, "critical traffic detected");
        }

        let snapshot = Snapshot::new(now, events_processed, select_top(summaries, self.top_k));
        let receipt = self.publisher.publish(&snapshot).await?;

        Ok(RunReport {
            events_processed,
            distinct_addresses,
            by_classification,
            snapshot,
            receipt,
        })
    }

    /// Entry point for one function invocation.
    ///
    /// The trigger payload is opaque and unused. Success maps to 200 with
    /// `"Pipeline Success"`; any failure is logged and maps to 500 with the
    /// error's message as the body.
    pub async fn handle_invocation(&mut self, event: &serde_json::Value) -> InvocationResponse {
        let invocation_id = Uuid::now_v7();
        let span = info_span!("invocation", %invocation_id);

        async {
            tracing::debug!(trigger = %event, "invocation received");
            match self.run().await {
                Ok(report) => {
                    info!(
                        events = report.events_processed,
                        published = report.snapshot.anomalies.len(),
                        key = %report.receipt.key,
                        "pipeline succeeded"
                    );
                    InvocationResponse::success()
                }
                Err(e) => {
                    error!(error = %e, "pipeline failed");
                    InvocationResponse::failure(e.to_string())
                }
            }
        }
        .instrument(span)
        .await
    }
}
