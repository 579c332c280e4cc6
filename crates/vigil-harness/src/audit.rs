//! In-memory audit store.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use vigil_audit::AuditStore;
use vigil_types::{AuditDraft, AuditLogEntry, VigilError};

/// Append-only audit entries with a failure switch.
///
/// Assigns the entry id and timestamp on append, the way the backend
/// store's server clock would.
#[derive(Default)]
pub struct MemoryAuditStore {
    entries: Mutex<Vec<AuditLogEntry>>,
    failing: AtomicBool,
}

impl MemoryAuditStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every append fail until called with `false`.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Every entry appended so far, in append order.
    pub fn entries(&self) -> Vec<AuditLogEntry> {
        self.entries.lock().unwrap().clone()
    }

    /// Number of entries appended so far.
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl AuditStore for MemoryAuditStore {
    async fn append(&self, draft: AuditDraft) -> Result<AuditLogEntry, VigilError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(VigilError::Audit("audit store unavailable".into()));
        }

        let entry = AuditLogEntry {
            entry_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            action: draft.action,
            actor_id: draft.actor_id,
            details: draft.details,
        };
        self.entries.lock().unwrap().push(entry.clone());
        Ok(entry)
    }

    async fn recent_for_actor(
        &self,
        actor_id: &str,
        limit: usize,
    ) -> Result<Vec<AuditLogEntry>, VigilError> {
        let entries = self.entries.lock().unwrap();
        Ok(entries
            .iter()
            .rev()
            .filter(|entry| entry.actor_id == actor_id)
            .take(limit)
            .cloned()
            .collect())
    }
}
