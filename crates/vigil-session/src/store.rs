//! The injectable session store.
//!
//! Holds the live [`SessionState`] behind a watch channel: readers either
//! sample the current value or subscribe for changes. The resolver is the
//! only writer; the setter is crate-private to keep it that way.

use std::sync::Arc;

use tokio::sync::watch;

use vigil_types::{Role, Session, SessionState};

/// The single live session state for the process.
///
/// Created once at process start in the `Loading` state (the provider has
/// not yet reported), written by the session resolver, and read by route
/// gates, the alert subscription manager, and the audit logger. Clones
/// share the same underlying state.
#[derive(Clone)]
pub struct SessionStore {
    tx: Arc<watch::Sender<SessionState>>,
}

impl SessionStore {
    /// Create a store in the initial `Loading` state.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(SessionState::Loading);
        Self { tx: Arc::new(tx) }
    }

    /// Sample the current session state.
    pub fn current(&self) -> SessionState {
        self.tx.borrow().clone()
    }

    /// The resolved session, if the current state is `Resolved`.
    pub fn resolved(&self) -> Option<Session> {
        self.current().resolved().cloned()
    }

    /// The resolved role, if any.
    pub fn role(&self) -> Option<Role> {
        self.current().role()
    }

    /// Subscribe to session state changes. The receiver observes the
    /// current value immediately and every subsequent transition.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.tx.subscribe()
    }

    /// Reset to `SignedOut`. Part of the store lifecycle: called when the
    /// process-level session is torn down outside the resolver's event
    /// loop (e.g. on shutdown).
    pub fn reset(&self) {
        self.set(SessionState::SignedOut);
    }

    /// Write a new state. Crate-private: the resolver is the single
    /// writer path.
    pub(crate) fn set(&self, state: SessionState) {
        // send_replace never fails even with no receivers subscribed.
        self.tx.send_replace(state);
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vigil_types::{IdentityId, InvalidReason, Role};

    #[test]
    fn starts_loading() {
        let store = SessionStore::new();
        assert!(store.current().is_loading());
        assert_eq!(store.resolved(), None);
    }

    #[test]
    fn clones_share_state() {
        let store = SessionStore::new();
        let reader = store.clone();
        store.set(SessionState::Resolved(Session {
            identity_id: IdentityId::from("u1"),
            email: "a@b.com".into(),
            role: Role::Patient,
        }));
        assert_eq!(reader.role(), Some(Role::Patient));
    }

    #[tokio::test]
    async fn subscribers_observe_transitions() {
        let store = SessionStore::new();
        let mut rx = store.subscribe();

        store.set(SessionState::Invalid(InvalidReason::BadRole));
        rx.changed().await.unwrap();
        assert_eq!(
            *rx.borrow(),
            SessionState::Invalid(InvalidReason::BadRole)
        );

        store.reset();
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), SessionState::SignedOut);
    }
}
