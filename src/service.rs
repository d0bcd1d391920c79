use log::{debug, info};
use std::sync::Arc;

use crate::db::{PartyDirectory, TallyStore};
use crate::error::Result;
use crate::models::{AuditEntry, DepartmentScope, DepartmentWinner, VoteResult};
use crate::voting;

/// Read-only query surface over the two injected stores.
///
/// Holds no state of its own; every call loads the active parties afresh so
/// status changes are picked up immediately.
#[derive(Clone)]
pub struct TallyService {
    parties: Arc<dyn PartyDirectory>,
    store: Arc<dyn TallyStore>,
}

impl TallyService {
    pub fn new(parties: Arc<dyn PartyDirectory>, store: Arc<dyn TallyStore>) -> Self {
        Self { parties, store }
    }

    /// National or single-department totals. `department` is a department name, `"all"` or `None`.
    pub async fn vote_totals(&self, department: Option<&str>) -> Result<Vec<VoteResult>> {
        let scope = DepartmentScope::parse(department)?;
        info!("Vote totals requested for {:?}", scope);

        let parties = self.parties.active_parties().await?;
        let counts = voting::tally_votes(self.store.as_ref(), &parties, scope).await?;
        debug!("Total votes counted: {}", voting::total_votes(&counts)?);

        voting::rank_results(&counts, &parties)
    }

    pub async fn department_winners(&self) -> Result<Vec<DepartmentWinner>> {
        info!("Department winners requested");

        let parties = self.parties.active_parties().await?;
        voting::department_winners(self.store.as_ref(), &parties).await
    }

    pub async fn audit_log(&self) -> Result<Vec<AuditEntry>> {
        info!("Audit log requested");
        voting::recent_audit(self.store.as_ref()).await
    }

    pub async fn precinct_totals(&self, precinct_id: &str) -> Result<Vec<VoteResult>> {
        info!("Precinct totals requested for {}", precinct_id);

        let parties = self.parties.active_parties().await?;
        voting::precinct_results(self.store.as_ref(), &parties, precinct_id).await
    }
}
