//! Runtime composition: resolver, alert scoping, and audit wired together.

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use vigil_alerts::{AlertStore, AlertSubscriptionManager};
use vigil_audit::{AuditLogger, AuditStore};
use vigil_session::{IdentityProvider, ProfileStore, SessionResolver, SessionStore};
use vigil_types::{Alert, PatientId, Role, SessionState, SignInError, VigilConfig};

/// The assembled Vigil core.
///
/// Owns the resolver's event loop and the alert-scoping loop. Alert
/// scoping follows the session: a resolved patient identity opens a feed
/// on their own collection; caretaker and medical sessions select a
/// patient explicitly via [`select_patient`](VigilRuntime::select_patient);
/// any identity change tears the feed down before anything else can leak
/// across it.
pub struct VigilRuntime {
    config: VigilConfig,
    session: SessionStore,
    resolver: SessionResolver,
    audit: AuditLogger,
    alerts: mpsc::UnboundedReceiver<Vec<Alert>>,
    selections: mpsc::UnboundedSender<Option<PatientId>>,
    resolver_task: JoinHandle<()>,
    scope_task: JoinHandle<()>,
}

impl VigilRuntime {
    /// Start the runtime over the injected backend seams.
    pub fn start(
        config: VigilConfig,
        provider: Arc<dyn IdentityProvider>,
        profiles: Arc<dyn ProfileStore>,
        alert_store: Arc<dyn AlertStore>,
        audit_store: Arc<dyn AuditStore>,
    ) -> Self {
        let session = SessionStore::new();
        let (resolver, resolver_task) =
            SessionResolver::spawn(provider, profiles, session.clone());
        let audit = AuditLogger::new(session.subscribe(), audit_store);
        let (manager, alerts) = AlertSubscriptionManager::new(alert_store);
        let (selections, selection_rx) = mpsc::unbounded_channel();
        let scope_task = tokio::spawn(scope_alerts(
            session.subscribe(),
            selection_rx,
            manager,
        ));

        Self {
            config,
            session,
            resolver,
            audit,
            alerts,
            selections,
            resolver_task,
            scope_task,
        }
    }

    pub fn config(&self) -> &VigilConfig {
        &self.config
    }

    /// The live session store (read-only for callers).
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// The audit logger for this runtime's session.
    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// The ordered sequence of alert mirror snapshots.
    pub fn alert_updates(&mut self) -> &mut mpsc::UnboundedReceiver<Vec<Alert>> {
        &mut self.alerts
    }

    /// Scope the alert feed to an explicitly chosen patient.
    ///
    /// For caretaker and medical sessions; ignored while no session is
    /// resolved. A patient session is always scoped to its own identity
    /// regardless of selections.
    pub fn select_patient(&self, patient_id: Option<PatientId>) {
        let _ = self.selections.send(patient_id);
    }

    /// Sign in. Resolution lands asynchronously in the session store; a
    /// successful resolution is recorded in the audit trail.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<(), SignInError> {
        self.resolver.sign_in(email, password).await?;

        let audit = self.audit.clone();
        let email = email.to_string();
        let mut rx = self.session.subscribe();
        tokio::spawn(async move {
            let settled = rx
                .wait_for(|state| {
                    matches!(state, SessionState::Resolved(s) if s.email == email)
                        || matches!(state, SessionState::Invalid(_))
                })
                .await;
            if let Ok(state) = settled {
                if state.resolved().is_some() {
                    audit.record_sign_in();
                }
            }
        });
        Ok(())
    }

    /// Sign out, recording the action while the session is still resolved.
    pub async fn sign_out(&self) {
        self.audit.record_sign_out();
        self.resolver.sign_out().await;
    }

    /// Stop the resolver and alert-scoping loops. Dropping the runtime
    /// does the same.
    pub fn shutdown(&self) {
        self.resolver_task.abort();
        self.scope_task.abort();
    }
}

impl Drop for VigilRuntime {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Patient identity the session itself implies, if any.
fn patient_scope(state: &SessionState) -> Option<PatientId> {
    match state {
        SessionState::Resolved(session) if session.role == Role::Patient => {
            Some(PatientId::new(session.identity_id.as_str()))
        }
        _ => None,
    }
}

/// Keep the subscription manager scoped to the session and to explicit
/// patient selections. Runs until the session store or the selection
/// channel goes away.
async fn scope_alerts(
    mut session_rx: watch::Receiver<SessionState>,
    mut selections: mpsc::UnboundedReceiver<Option<PatientId>>,
    mut manager: AlertSubscriptionManager,
) {
    loop {
        tokio::select! {
            changed = session_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let patient = patient_scope(&session_rx.borrow_and_update());
                debug!(patient = ?patient.as_ref().map(|p| p.as_str()), "session changed; re-scoping alert feed");
                if let Err(e) = manager.set_patient(patient).await {
                    warn!("failed to re-scope alert subscription: {e}");
                }
            }
            selection = selections.recv() => {
                let Some(selection) = selection else {
                    break;
                };
                let state = session_rx.borrow().clone();
                let patient = match &state {
                    // A patient session stays scoped to itself.
                    SessionState::Resolved(s) if s.role == Role::Patient => patient_scope(&state),
                    SessionState::Resolved(_) => selection,
                    _ => None,
                };
                if let Err(e) = manager.set_patient(patient).await {
                    warn!("failed to scope alert subscription to selection: {e}");
                }
            }
        }
    }
    manager.close();
}
