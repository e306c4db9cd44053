//! Per-address aggregation and threshold classification.
//!
//! [`detect`] makes a single linear pass over a batch, counting events per
//! source address, then classifies each address with the fixed thresholds
//! from [`sentinel_types::enums`]:
//!
//! ```text
//! count >  20        -> Critical
//! 10 < count <= 20   -> Warning
//! count <= 10        -> Normal
//! ```
//!
//! Summaries come out in first-seen order of their address. That order is
//! what [`select_top`](crate::select_top) falls back on to break ties.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use sentinel_types::{
    AddressSummary, AddressedEvent, CRITICAL_THRESHOLD, Classification, WARNING_THRESHOLD,
};

use crate::clock::Clock;
use crate::error::DetectError;

/// Map a request count to its tier.
pub const fn classify(count: u64) -> Classification {
    if count > CRITICAL_THRESHOLD {
        Classification::Critical
    } else if count > WARNING_THRESHOLD {
        Classification::Warning
    } else {
        Classification::Normal
    }
}

/// Aggregate a batch into one summary per distinct address.
///
/// Every summary is stamped with `window_start`. An empty batch yields an
/// empty result.
///
/// # Errors
///
/// Returns [`DetectError::MalformedInput`] for the first event without a
/// usable address. Nothing is aggregated in that case.
pub fn detect<E: AddressedEvent>(
    events: &[E],
    window_start: DateTime<Utc>,
) -> Result<Vec<AddressSummary>, DetectError> {
    // Address -> position in `tallies`, so output keeps first-seen order.
    let mut positions: BTreeMap<&str, usize> = BTreeMap::new();
    let mut tallies: Vec<(&str, u64)> = Vec::new();

    for (index, event) in events.iter().enumerate() {
        let Some(address) = event.address() else {
            return Err(DetectError::MalformedInput {
                index,
                reason: "missing, empty, or non-string address".to_owned(),
            });
        };

        if let Some(&pos) = positions.get(address) {
            if let Some(tally) = tallies.get_mut(pos) {
                tally.1 = tally.1.saturating_add(1);
            }
        } else {
            positions.insert(address, tallies.len());
            tallies.push((address, 1));
        }
    }

    Ok(tallies
        .into_iter()
        .map(|(address, count)| AddressSummary {
            address: address.to_owned(),
            count,
            classification: classify(count),
            window_start,
        })
        .collect())
}

/// [`detect`] with the window start read once from `clock`.
///
/// # Errors
///
/// See [`detect`].
pub fn detect_with_clock<E: AddressedEvent>(
    events: &[E],
    clock: &impl Clock,
) -> Result<Vec<AddressSummary>, DetectError> {
    detect(events, clock.now())
}

/// Count how many summaries fall into each tier.
///
/// Every tier is present in the result, with zero where nothing matched.
pub fn tally_by_classification(summaries: &[AddressSummary]) -> BTreeMap<Classification, usize> {
    let mut tally: BTreeMap<Classification, usize> =
        Classification::ALL.iter().map(|tier| (*tier, 0)).collect();
    for summary in summaries {
        let entry = tally.entry(summary.classification).or_insert(0);
        *entry = entry.saturating_add(1);
    }
    tally
}
