//! The fire-and-forget audit logger.

use std::sync::Arc;

use serde_json::{Map, Value};
use tokio::sync::watch;
use tracing::warn;

use vigil_types::{AuditDraft, SessionState};

use crate::store::AuditStore;

/// Appends audit entries attributed to the currently resolved session.
///
/// Holds a reader on the live session state: the actor id comes from the
/// session resolved at call time, never from the caller, so entries
/// cannot be spoofed. Append failures are reported to the diagnostic log
/// and swallowed; the triggering action is never blocked or failed by
/// its audit trail.
#[derive(Clone)]
pub struct AuditLogger {
    session: watch::Receiver<SessionState>,
    store: Arc<dyn AuditStore>,
}

impl AuditLogger {
    /// Create a logger reading the given session state.
    pub fn new(session: watch::Receiver<SessionState>, store: Arc<dyn AuditStore>) -> Self {
        Self { session, store }
    }

    /// Append an entry for `action`, best-effort.
    ///
    /// With no resolved session this logs a warning and performs no store
    /// write: audit entries are never created for an unauthenticated
    /// caller. The actor's email is merged into `details` for
    /// traceability.
    pub fn record(&self, action: &str, mut details: Map<String, Value>) {
        let state = self.session.borrow().clone();
        let Some(session) = state.resolved() else {
            warn!(action, "audit entry skipped: no resolved session");
            return;
        };

        details.insert("email".to_string(), Value::String(session.email.clone()));
        let draft = AuditDraft::new(action, session.identity_id.as_str(), details);

        let store = Arc::clone(&self.store);
        tokio::spawn(async move {
            if let Err(e) = store.append(draft).await {
                warn!("audit append failed: {e}");
            }
        });
    }
}
