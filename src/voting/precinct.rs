use uuid::Uuid;

use crate::db::TallyStore;
use crate::error::{Result, TallyError};
use crate::models::{PartyDirectoryMap, VoteCounts, VoteResult};
use crate::voting::aggregate::count_or_zero;
use crate::voting::ranking::rank_results;

/// Formatted live counts of one precinct, restricted to active parties.
pub async fn precinct_results(
    store: &dyn TallyStore,
    parties: &PartyDirectoryMap,
    precinct_id: &str,
) -> Result<Vec<VoteResult>> {
    // Precinct ids are UUIDs; anything else cannot name a stored counter
    let precinct = Uuid::parse_str(precinct_id)
        .map_err(|_| TallyError::InvalidPrecinct(precinct_id.to_string()))?;

    let stored = store.precinct_totals(&precinct.to_string()).await?;
    let counts: VoteCounts = parties
        .keys()
        .map(|id| (id.clone(), count_or_zero(stored.get(id).copied())))
        .collect();

    rank_results(&counts, parties)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use crate::models::PartyInfo;

    const MESA: &str = "6f1c2b1e-8a3d-4c55-9a61-0c6f3e9b7d21";

    fn directory() -> PartyDirectoryMap {
        [("a", "Unidad Nacional", "UN"), ("b", "Creemos", "CREEMOS")]
            .into_iter()
            .map(|(id, name, abbreviation)| {
                (
                    id.to_string(),
                    PartyInfo {
                        name: name.to_string(),
                        abbreviation: abbreviation.to_string(),
                    },
                )
            })
            .collect()
    }

    #[tokio::test]
    async fn inactive_counters_do_not_count() {
        let store = MemoryStore::new()
            .with_precinct_total(MESA, "a", 12)
            .with_precinct_total(MESA, "b", 36)
            .with_precinct_total(MESA, "inactive", 500);

        let results = precinct_results(&store, &directory(), MESA).await.unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].abbreviation, "CREEMOS");
        assert_eq!(results[0].percentage, 75.0);
        assert_eq!(results[1].percentage, 25.0);
    }

    #[tokio::test]
    async fn unknown_precinct_reads_as_zero() {
        let results = precinct_results(&MemoryStore::new(), &directory(), MESA).await.unwrap();
        assert!(results.iter().all(|r| r.votes == 0 && r.percentage == 0.0));
    }

    #[tokio::test]
    async fn malformed_id_is_rejected() {
        let err = precinct_results(&MemoryStore::new(), &directory(), "mesa-1")
            .await
            .unwrap_err();
        assert!(matches!(err, TallyError::InvalidPrecinct(id) if id == "mesa-1"));
    }
}
