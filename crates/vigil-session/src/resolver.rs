//! The session resolver event loop.
//!
//! Consumes the identity provider's session-changed events, issues profile
//! lookups, and writes the resulting [`SessionState`] into the
//! [`SessionStore`]. Lookups are asynchronous and may complete out of
//! order; the resolver keys every lookup by the identity id that started
//! it and discards any completion whose id no longer matches the
//! provider's current identity. That race guard is the only concurrency
//! control this path needs -- all handlers run on the same cooperative
//! scheduler.

use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use vigil_types::{
    IdentityId, InvalidReason, Principal, Role, Session, SessionState, SignInError,
};

use crate::provider::{IdentityProvider, ProfileStore, SessionEvent};
use crate::store::SessionStore;

/// Resolves provider session events into the live [`SessionState`].
pub struct SessionResolver {
    provider: Arc<dyn IdentityProvider>,
    store: SessionStore,
}

impl SessionResolver {
    /// Spawn the resolver's event loop.
    ///
    /// The loop runs until the provider closes its event stream. The
    /// returned handle can be awaited on shutdown; the resolver itself is
    /// the caller's way to trigger sign-in/sign-out.
    pub fn spawn(
        provider: Arc<dyn IdentityProvider>,
        profiles: Arc<dyn ProfileStore>,
        store: SessionStore,
    ) -> (Self, JoinHandle<()>) {
        let events = provider.session_events();
        let current = Arc::new(Mutex::new(None));
        let handle = tokio::spawn(event_loop(
            events,
            Arc::clone(&provider),
            profiles,
            store.clone(),
            current,
        ));
        (Self { provider, store }, handle)
    }

    /// The store this resolver writes.
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Authenticate credentials against the provider.
    ///
    /// Resolution happens via the provider's session event, not the return
    /// value: on success the store moves to `Loading` and then to
    /// `Resolved` or `Invalid` once the profile lookup lands.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<(), SignInError> {
        self.provider.sign_in(email, password).await.map(|_| ())
    }

    /// End the provider-level session.
    pub async fn sign_out(&self) {
        self.provider.sign_out().await;
    }
}

/// Consume provider session events until the stream closes.
async fn event_loop(
    mut events: mpsc::UnboundedReceiver<SessionEvent>,
    provider: Arc<dyn IdentityProvider>,
    profiles: Arc<dyn ProfileStore>,
    store: SessionStore,
    current: Arc<Mutex<Option<IdentityId>>>,
) {
    while let Some(event) = events.recv().await {
        match event {
            Some(principal) => {
                debug!(identity = %principal.identity_id, "session event: signed in");
                *current.lock().unwrap() = Some(principal.identity_id.clone());
                store.set(SessionState::Loading);
                tokio::spawn(resolve_profile(
                    principal,
                    Arc::clone(&provider),
                    Arc::clone(&profiles),
                    store.clone(),
                    Arc::clone(&current),
                ));
            }
            None => {
                debug!("session event: signed out");
                *current.lock().unwrap() = None;
                store.set(SessionState::SignedOut);
            }
        }
    }
}

/// Complete one profile lookup and, if it still governs, write the store.
async fn resolve_profile(
    principal: Principal,
    provider: Arc<dyn IdentityProvider>,
    profiles: Arc<dyn ProfileStore>,
    store: SessionStore,
    current: Arc<Mutex<Option<IdentityId>>>,
) {
    let lookup = profiles.fetch_profile(&principal.identity_id).await;

    // Race guard: only the lookup whose identity equals the provider's
    // current identity at completion time may write the session.
    {
        let current = current.lock().unwrap();
        if current.as_ref() != Some(&principal.identity_id) {
            debug!(
                identity = %principal.identity_id,
                "discarding stale profile lookup for superseded identity"
            );
            return;
        }
    }

    match lookup {
        Ok(Some(profile)) => match profile.role.parse::<Role>() {
            Ok(role) => {
                store.set(SessionState::Resolved(Session {
                    identity_id: principal.identity_id,
                    email: profile.email,
                    role,
                }));
            }
            Err(_) => {
                warn!(
                    identity = %principal.identity_id,
                    role = %profile.role,
                    "profile carries an unrecognized role; forcing sign-out"
                );
                store.set(SessionState::Invalid(InvalidReason::BadRole));
                provider.sign_out().await;
            }
        },
        Ok(None) => {
            warn!(
                identity = %principal.identity_id,
                "no profile record for signed-in identity; forcing sign-out"
            );
            store.set(SessionState::Invalid(InvalidReason::MissingProfile));
            provider.sign_out().await;
        }
        Err(e) => {
            // Neither an identity nor a profile-integrity error, so the
            // session state stays as it is: the consumer remains in
            // `Loading` until the identity changes again.
            warn!(identity = %principal.identity_id, "profile lookup failed: {e}");
        }
    }
}
