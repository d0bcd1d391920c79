use async_trait::async_trait;
use std::collections::HashMap;

use crate::db::{PartyDirectory, TallyStore};
use crate::error::Result;
use crate::models::{AuditEntry, Department, Party, PartyDirectoryMap, PartyInfo};

/// In-process stand-in for both stores, filled up front and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    parties: Vec<Party>,
    department_totals: HashMap<(Department, String), i64>,
    precinct_totals: HashMap<String, HashMap<String, i64>>,
    audit_log: Vec<AuditEntry>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_party(mut self, party: Party) -> Self {
        self.parties.push(party);
        self
    }

    pub fn with_department_total(mut self, department: Department, party_id: &str, votes: i64) -> Self {
        self.department_totals
            .insert((department, party_id.to_string()), votes);
        self
    }

    pub fn with_precinct_total(mut self, precinct_id: &str, party_id: &str, votes: i64) -> Self {
        self.precinct_totals
            .entry(precinct_id.to_string())
            .or_default()
            .insert(party_id.to_string(), votes);
        self
    }

    pub fn with_audit_entry(mut self, entry: AuditEntry) -> Self {
        self.audit_log.push(entry);
        self
    }
}

#[async_trait]
impl PartyDirectory for MemoryStore {
    async fn active_parties(&self) -> Result<PartyDirectoryMap> {
        Ok(self
            .parties
            .iter()
            .filter(|party| party.is_active())
            .map(|party| {
                (
                    party.id.clone(),
                    PartyInfo {
                        name: party.name.clone(),
                        abbreviation: party.abbreviation.clone(),
                    },
                )
            })
            .collect())
    }
}

#[async_trait]
impl TallyStore for MemoryStore {
    async fn department_totals(&self, department: Department, party_ids: &[String]) -> Result<Vec<Option<i64>>> {
        Ok(party_ids
            .iter()
            .map(|party_id| {
                self.department_totals
                    .get(&(department, party_id.clone()))
                    .copied()
            })
            .collect())
    }

    async fn precinct_totals(&self, precinct_id: &str) -> Result<HashMap<String, i64>> {
        Ok(self
            .precinct_totals
            .get(precinct_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn audit_entries(&self, count: usize) -> Result<Vec<AuditEntry>> {
        Ok(self.audit_log.iter().take(count).cloned().collect())
    }
}
