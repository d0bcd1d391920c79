use crate::error::Result;
use crate::models::{PartyDirectoryMap, VoteCounts, VoteResult};
use crate::voting::aggregate::add_votes;

/// Share of `votes` in `total` as a percentage rounded to two decimals,
/// exact halves going to the even neighbour (1 of 32 is 3.12).
///
/// A zero total yields 0 for every party.
pub fn percentage(votes: i64, total: i64) -> f64 {
    if total == 0 {
        return 0.0;
    }

    round_two_decimals(votes as f64 / total as f64 * 100.0)
}

fn round_two_decimals(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Turns raw counts into results sorted by votes, highest first.
///
/// Parties are visited in directory order (ascending party id) and the sort is
/// stable, so equal counts keep that order. Counts for ids missing from the
/// directory are skipped.
pub fn rank_results(counts: &VoteCounts, parties: &PartyDirectoryMap) -> Result<Vec<VoteResult>> {
    let total = counts
        .iter()
        .filter(|(id, _)| parties.contains_key(*id))
        .try_fold(0, |total, (_, votes)| add_votes(total, *votes))?;

    let mut results: Vec<VoteResult> = parties
        .iter()
        .map(|(id, info)| {
            let votes = counts.get(id).copied().unwrap_or(0);
            VoteResult {
                name: info.name.clone(),
                abbreviation: info.abbreviation.clone(),
                votes,
                percentage: percentage(votes, total),
            }
        })
        .collect();

    results.sort_by(|a, b| b.votes.cmp(&a.votes));
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PartyInfo;
    use proptest::prelude::*;

    fn directory(ids: &[&str]) -> PartyDirectoryMap {
        ids.iter()
            .map(|id| {
                (
                    id.to_string(),
                    PartyInfo {
                        name: id.to_string(),
                        abbreviation: id.to_uppercase(),
                    },
                )
            })
            .collect()
    }

    fn counts(pairs: &[(&str, i64)]) -> VoteCounts {
        pairs.iter().map(|(id, votes)| (id.to_string(), *votes)).collect()
    }

    #[test]
    fn higher_count_comes_first() {
        let results = rank_results(&counts(&[("A", 30), ("B", 70)]), &directory(&["A", "B"])).unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].name, "B");
        assert_eq!(results[0].votes, 70);
        assert_eq!(results[0].percentage, 70.0);
        assert_eq!(results[1].name, "A");
        assert_eq!(results[1].percentage, 30.0);
    }

    #[test]
    fn zero_total_keeps_directory_order() {
        let results = rank_results(&counts(&[("A", 0), ("B", 0)]), &directory(&["A", "B"])).unwrap();

        let names: Vec<&str> = results.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
        assert!(results.iter().all(|r| r.percentage == 0.0));
    }

    #[test]
    fn percentages_round_to_two_decimals() {
        assert_eq!(percentage(1, 3), 33.33);
        assert_eq!(percentage(2, 3), 66.67);
        assert_eq!(percentage(0, 0), 0.0);
    }

    #[test]
    fn exact_halves_round_to_even() {
        assert_eq!(percentage(1, 32), 3.12);
        assert_eq!(percentage(3, 32), 9.38);
        assert_eq!(percentage(1, 8), 12.5);
    }

    #[test]
    fn parties_without_counts_show_zero() {
        let results = rank_results(&counts(&[("A", 4)]), &directory(&["A", "B"])).unwrap();

        assert_eq!(results[1].name, "B");
        assert_eq!(results[1].votes, 0);
        assert_eq!(results[0].percentage, 100.0);
    }

    proptest! {
        #[test]
        fn output_is_sorted_and_complete(votes in prop::collection::vec(0i64..10_000, 1..12)) {
            let ids: Vec<String> = (0..votes.len()).map(|i| format!("p{i:02}")).collect();
            let parties: PartyDirectoryMap = ids
                .iter()
                .map(|id| (id.clone(), PartyInfo { name: id.clone(), abbreviation: id.clone() }))
                .collect();
            let tallies: VoteCounts = ids.iter().cloned().zip(votes.iter().copied()).collect();

            let results = rank_results(&tallies, &parties).unwrap();

            prop_assert_eq!(results.len(), parties.len());
            for pair in results.windows(2) {
                prop_assert!(pair[0].votes >= pair[1].votes);
            }

            let total: i64 = votes.iter().sum();
            let share: f64 = results.iter().map(|r| r.percentage).sum();
            if total > 0 {
                // each entry can be off by half a hundredth
                prop_assert!((share - 100.0).abs() <= 0.005 * results.len() as f64 + 1e-9);
            } else {
                prop_assert!(results.iter().all(|r| r.percentage == 0.0));
            }
        }
    }
}
