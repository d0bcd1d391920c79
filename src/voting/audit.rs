use crate::db::TallyStore;
use crate::error::Result;
use crate::models::AuditEntry;

// Size of the window returned by the audit query
pub const AUDIT_WINDOW: usize = 5;

/// Earliest audit events in the stream's range order, at most [`AUDIT_WINDOW`].
pub async fn recent_audit(store: &dyn TallyStore) -> Result<Vec<AuditEntry>> {
    let mut entries = store.audit_entries(AUDIT_WINDOW).await?;
    entries.truncate(AUDIT_WINDOW);

    Ok(entries)
}
