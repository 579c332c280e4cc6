//! The audit store seam.

use async_trait::async_trait;

use vigil_types::{AuditDraft, AuditLogEntry, VigilError};

/// Append-only backend collection for audit entries (`auditLogs`).
///
/// The store assigns the entry id and the authoritative timestamp on
/// append; entries are never mutated or deleted through this interface.
#[async_trait]
pub trait AuditStore: Send + Sync {
    /// Append a draft, returning the stored entry with its assigned id
    /// and timestamp.
    async fn append(&self, draft: AuditDraft) -> Result<AuditLogEntry, VigilError>;

    /// Retrieve an actor's most recent entries, newest first, capped at
    /// `limit` results.
    async fn recent_for_actor(
        &self,
        actor_id: &str,
        limit: usize,
    ) -> Result<Vec<AuditLogEntry>, VigilError>;
}
