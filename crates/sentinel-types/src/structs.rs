//! Core structs: traffic events, per-address summaries, the published
//! snapshot, and the invocation response.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::Classification;

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// Anything that can report the source address of one request.
///
/// Raw ingestion records are loosely typed, so the address may be absent.
/// Returning `None` marks the event as malformed.
pub trait AddressedEvent {
    /// The source address, or `None` if the event does not carry a usable one.
    fn address(&self) -> Option<&str>;
}

/// One recorded request from a source address.
///
/// On the wire the address travels as `ip`, matching the ingestion feed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct TrafficEvent {
    /// Source address of the request.
    #[serde(rename = "ip")]
    pub address: String,
}

impl TrafficEvent {
    /// Create an event for the given address.
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
        }
    }
}

impl AddressedEvent for TrafficEvent {
    fn address(&self) -> Option<&str> {
        Some(self.address.as_str()).filter(|a| !a.is_empty())
    }
}

/// Raw ingestion records: `{"ip": "<address>"}`.
impl AddressedEvent for serde_json::Value {
    fn address(&self) -> Option<&str> {
        self.get("ip")
            .and_then(serde_json::Value::as_str)
            .filter(|a| !a.is_empty())
    }
}

impl<T: AddressedEvent + ?Sized> AddressedEvent for &T {
    fn address(&self) -> Option<&str> {
        (**self).address()
    }
}

// ---------------------------------------------------------------------------
// Summaries
// ---------------------------------------------------------------------------

/// Per-address aggregate for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct AddressSummary {
    /// The source address.
    #[serde(rename = "ip")]
    pub address: String,
    /// Number of events observed from this address (always at least 1).
    pub count: u64,
    /// Tier derived from `count`.
    #[serde(rename = "status")]
    pub classification: Classification,
    /// Shared timestamp captured once per run.
    pub window_start: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// The bounded payload published for the dashboard.
///
/// Each run fully replaces the previous snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Snapshot {
    /// When this snapshot was produced.
    pub last_updated: DateTime<Utc>,
    /// Number of events in the batch, including those not shown.
    pub total_events_processed: u64,
    /// Highest-count addresses, descending by count.
    pub anomalies: Vec<AddressSummary>,
}

impl Snapshot {
    /// Assemble a snapshot from already-selected summaries.
    pub const fn new(
        last_updated: DateTime<Utc>,
        total_events_processed: u64,
        anomalies: Vec<AddressSummary>,
    ) -> Self {
        Self {
            last_updated,
            total_events_processed,
            anomalies,
        }
    }
}

// ---------------------------------------------------------------------------
// Invocation response
// ---------------------------------------------------------------------------

/// Body returned on a successful run.
pub const SUCCESS_BODY: &str = "Pipeline Success";

/// Structured result handed back to the function-as-a-service runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct InvocationResponse {
    /// HTTP-style status code: 200 on success, 500 on failure.
    pub status_code: u16,
    /// `"Pipeline Success"` or the failure message.
    pub body: String,
}

impl InvocationResponse {
    /// A 200 response.
    pub fn success() -> Self {
        Self {
            status_code: 200,
            body: SUCCESS_BODY.to_owned(),
        }
    }

    /// A 500 response carrying `message` as its body.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            status_code: 500,
            body: message.into(),
        }
    }

    /// Whether the run succeeded.
    pub const fn is_success(&self) -> bool {
        self.status_code == 200
    }
}
