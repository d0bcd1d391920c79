use log::debug;

use crate::db::TallyStore;
use crate::error::Result;
use crate::models::{Department, DepartmentScope, DepartmentWinner, PartyDirectoryMap, VoteCounts};
use crate::voting::aggregate::{tally_votes, total_votes};
use crate::voting::ranking::percentage;

/// Party with the most votes. Ties go to the first party in iteration order,
/// which for [`VoteCounts`] is ascending party id.
fn plurality(counts: &VoteCounts) -> Option<(&String, i64)> {
    let mut leader: Option<(&String, i64)> = None;

    for (party_id, votes) in counts {
        match leader {
            Some((_, best)) if *votes <= best => {}
            _ => leader = Some((party_id, *votes)),
        }
    }

    leader
}

/// Plurality winner of every department with at least one vote, in enumeration order.
pub async fn department_winners(
    store: &dyn TallyStore,
    parties: &PartyDirectoryMap,
) -> Result<Vec<DepartmentWinner>> {
    let mut winners = Vec::new();

    for department in Department::ALL {
        let counts = tally_votes(store, parties, DepartmentScope::Single(department)).await?;
        let total = total_votes(&counts)?;

        if total == 0 {
            debug!("No votes recorded in {}, skipping", department);
            continue;
        }

        let Some((party_id, votes)) = plurality(&counts) else {
            continue;
        };
        let Some(info) = parties.get(party_id) else {
            continue;
        };

        winners.push(DepartmentWinner {
            department,
            partido_ganador: info.name.clone(),
            sigla: info.abbreviation.clone(),
            porcentaje: percentage(votes, total),
        });
    }

    Ok(winners)
}
