//! Seams to the external identity provider and profile store.
//!
//! Both are pluggable backends: the production implementations wrap the
//! hosted authentication/document-store service, and `vigil-harness`
//! provides in-memory versions for tests.

use async_trait::async_trait;
use tokio::sync::mpsc;

use vigil_types::{IdentityId, Principal, Profile, SignInError, VigilError};

/// A session-changed event from the identity provider: `Some` when a
/// principal signs in (or the provider restores a session), `None` on
/// sign-out or provider-reported invalidation.
pub type SessionEvent = Option<Principal>;

/// The external service that authenticates credentials and reports
/// sign-in/sign-out events.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Authenticate the given credentials.
    ///
    /// On success the provider also emits a `Some(principal)` session
    /// event; callers should watch the [`SessionStore`] rather than act on
    /// the returned principal directly.
    ///
    /// [`SessionStore`]: crate::SessionStore
    async fn sign_in(&self, email: &str, password: &str) -> Result<Principal, SignInError>;

    /// End the provider-level session. Emits a `None` session event.
    async fn sign_out(&self);

    /// The provider's session-changed event stream.
    ///
    /// Events are delivered in the order the provider reports them. The
    /// resolver is the single consumer.
    fn session_events(&self) -> mpsc::UnboundedReceiver<SessionEvent>;
}

/// Keyed lookup of application-level profile records by identity id.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Fetch the profile for an identity, or `None` if no record exists.
    async fn fetch_profile(&self, identity_id: &IdentityId) -> Result<Option<Profile>, VigilError>;
}
