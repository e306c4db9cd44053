//! Enumeration types for the Traffic Sentinel job.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Request count above which an address is classified as [`Classification::Warning`].
pub const WARNING_THRESHOLD: u64 = 10;

/// Request count above which an address is classified as [`Classification::Critical`].
pub const CRITICAL_THRESHOLD: u64 = 20;

/// Severity tier assigned to a source address for one run.
///
/// The serialized form is the dashboard label (see [`Classification::label`]),
/// which keeps the published snapshot compatible with existing consumers.
/// Business logic should match on the variant, never on the label.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export, export_to = "bindings/")]
pub enum Classification {
    /// At most [`WARNING_THRESHOLD`] requests in the batch.
    #[serde(rename = "Normal")]
    Normal,
    /// More than [`WARNING_THRESHOLD`] and at most [`CRITICAL_THRESHOLD`] requests.
    #[serde(rename = "Warning - High Traffic")]
    Warning,
    /// More than [`CRITICAL_THRESHOLD`] requests.
    #[serde(rename = "Critical - Bot Attack")]
    Critical,
}

impl Classification {
    /// All tiers in ascending severity order.
    pub const ALL: [Self; 3] = [Self::Normal, Self::Warning, Self::Critical];

    /// Human-readable label shown on the dashboard.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Warning => "Warning - High Traffic",
            Self::Critical => "Critical - Bot Attack",
        }
    }

    /// Whether this tier should draw attention on the dashboard.
    pub const fn is_anomalous(self) -> bool {
        !matches!(self, Self::Normal)
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
