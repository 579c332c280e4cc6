//! Audit log entries: the append-only compliance trail.
//!
//! The client builds an [`AuditDraft`]; the store assigns the entry id and
//! the authoritative timestamp on append. Entries are never mutated or
//! deleted by this core.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// A client-built audit record, before the store accepts it.
///
/// `actor_id` is always derived from the resolved session at the call site,
/// never supplied by the caller, so entries cannot be attributed to someone
/// else. The draft carries no timestamp: the store's clock is authoritative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditDraft {
    /// The action name, from the standard constants in `vigil-audit`.
    pub action: String,
    /// Identity id of the session that triggered the action.
    pub actor_id: String,
    /// Free-form detail map, merged with the actor's email for traceability.
    pub details: Map<String, Value>,
}

/// A stored audit entry, as the store returns it after append.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditLogEntry {
    /// Unique identifier assigned by the store.
    pub entry_id: Uuid,
    /// Store-assigned timestamp (authoritative, not the client clock).
    pub timestamp: DateTime<Utc>,
    pub action: String,
    pub actor_id: String,
    pub details: Map<String, Value>,
}

impl AuditDraft {
    /// Build a draft for the given action and actor.
    pub fn new(action: impl Into<String>, actor_id: impl Into<String>, details: Map<String, Value>) -> Self {
        Self {
            action: action.into(),
            actor_id: actor_id.into(),
            details,
        }
    }
}
