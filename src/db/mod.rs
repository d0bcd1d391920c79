//! Store handles consumed by the tally queries.
//!
//! Every query takes its stores as trait objects so that the Redis and SQL
//! backed handles can be swapped for [`memory::MemoryStore`] in tests.

pub mod cache;
pub mod memory;
pub mod sql;

use async_trait::async_trait;
use std::collections::HashMap;

use crate::error::Result;
use crate::models::{AuditEntry, Department, PartyDirectoryMap};

pub use cache::RedisStore;
pub use memory::MemoryStore;
pub use sql::Database;

/// Relational-style store holding party metadata.
#[async_trait]
pub trait PartyDirectory: Send + Sync {
    /// Active parties only, keyed by party id.
    async fn active_parties(&self) -> Result<PartyDirectoryMap>;
}

/// Key/value store holding the pre-aggregated counters and the audit stream.
#[async_trait]
pub trait TallyStore: Send + Sync {
    /// Stored totals of `party_ids` in one department, in the same order;
    /// `None` where a counter was never written.
    async fn department_totals(&self, department: Department, party_ids: &[String]) -> Result<Vec<Option<i64>>>;

    /// Live per-party counters of a single precinct.
    async fn precinct_totals(&self, precinct_id: &str) -> Result<HashMap<String, i64>>;

    /// The first `count` entries of the audit stream in range order.
    async fn audit_entries(&self, count: usize) -> Result<Vec<AuditEntry>>;
}
