use log::debug;

use crate::db::TallyStore;
use crate::error::{Result, TallyError};
use crate::models::{DepartmentScope, PartyDirectoryMap, VoteCounts};

/// Zero-fill contract for pre-aggregated counters.
///
/// The write path only creates a counter on its first increment, so an absent
/// value means no votes were recorded for that party, never a failure.
pub fn count_or_zero(stored: Option<i64>) -> i64 {
    stored.unwrap_or(0)
}

/// Adds two vote counts, failing instead of wrapping.
pub fn add_votes(total: i64, votes: i64) -> Result<i64> {
    total
        .checked_add(votes)
        .ok_or_else(|| TallyError::Overflow(format!("{total} + {votes}")))
}

/// Sums the stored per-department totals of every active party over `scope`.
///
/// Every party in `parties` gets an entry, even when nothing was stored for it.
/// Each department costs a single batched read.
pub async fn tally_votes(
    store: &dyn TallyStore,
    parties: &PartyDirectoryMap,
    scope: DepartmentScope,
) -> Result<VoteCounts> {
    let party_ids: Vec<String> = parties.keys().cloned().collect();
    let mut counts: VoteCounts = party_ids.iter().map(|id| (id.clone(), 0)).collect();

    for department in scope.departments() {
        let stored = store.department_totals(*department, &party_ids).await?;

        for (party_id, value) in party_ids.iter().zip(stored) {
            if let Some(total) = counts.get_mut(party_id) {
                *total = add_votes(*total, count_or_zero(value))?;
            }
        }
    }

    debug!(
        "Tallied {} parties over {} department(s)",
        counts.len(),
        scope.departments().len()
    );
    Ok(counts)
}

pub fn total_votes(counts: &VoteCounts) -> Result<i64> {
    counts.values().try_fold(0, |total, votes| add_votes(total, *votes))
}
