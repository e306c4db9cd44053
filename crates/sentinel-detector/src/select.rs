//! Top-K selection over per-address summaries.

use sentinel_types::AddressSummary;

/// Number of summaries kept in a published snapshot.
pub const DEFAULT_TOP_K: usize = 5;

/// Keep the `k` highest-count summaries, descending by count.
///
/// The sort is stable: summaries with equal counts keep their input order,
/// which for [`detect`](crate::detect) output means first-seen order. No
/// field other than `count` affects the ordering. Fewer than `k` inputs are
/// returned whole.
pub fn select_top(mut summaries: Vec<AddressSummary>, k: usize) -> Vec<AddressSummary> {
    summaries.sort_by(|a, b| b.count.cmp(&a.count));
    summaries.truncate(k);
    summaries
}
