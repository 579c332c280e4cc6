//! In-memory identity provider.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::mpsc;

use vigil_session::{IdentityProvider, SessionEvent};
use vigil_types::{IdentityId, Principal, SignInError};

struct Account {
    password: String,
    identity_id: IdentityId,
    disabled: bool,
}

/// Scripted identity provider.
///
/// Accounts are registered up front; `sign_in` validates against them and
/// reports the same session-changed events a hosted provider would. Tests
/// can also emit events directly to simulate restored sessions or
/// provider-side invalidation.
#[derive(Default)]
pub struct MemoryIdentityProvider {
    accounts: Mutex<HashMap<String, Account>>,
    subscribers: Mutex<Vec<mpsc::UnboundedSender<SessionEvent>>>,
    sign_outs: AtomicUsize,
    network_down: Mutex<bool>,
    rate_limited: Mutex<bool>,
}

impl MemoryIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an account the provider will accept.
    pub fn register(&self, email: &str, password: &str, identity_id: &str) {
        self.accounts.lock().unwrap().insert(
            email.to_string(),
            Account {
                password: password.to_string(),
                identity_id: IdentityId::from(identity_id),
                disabled: false,
            },
        );
    }

    /// Mark an account disabled; sign-in then fails with `AccountDisabled`.
    pub fn disable(&self, email: &str) {
        if let Some(account) = self.accounts.lock().unwrap().get_mut(email) {
            account.disabled = true;
        }
    }

    /// Make every sign-in fail with `Network` until called with `false`.
    pub fn set_network_down(&self, down: bool) {
        *self.network_down.lock().unwrap() = down;
    }

    /// Make every sign-in fail with `RateLimited` until called with `false`.
    pub fn set_rate_limited(&self, limited: bool) {
        *self.rate_limited.lock().unwrap() = limited;
    }

    /// Emit a session-changed event directly, bypassing `sign_in`.
    pub fn emit(&self, event: SessionEvent) {
        self.subscribers
            .lock()
            .unwrap()
            .retain(|tx| tx.send(event.clone()).is_ok());
    }

    /// How many times `sign_out` was called (including forced sign-outs).
    pub fn sign_out_count(&self) -> usize {
        self.sign_outs.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IdentityProvider for MemoryIdentityProvider {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Principal, SignInError> {
        if *self.network_down.lock().unwrap() {
            return Err(SignInError::Network);
        }
        if *self.rate_limited.lock().unwrap() {
            return Err(SignInError::RateLimited);
        }

        let principal = {
            let accounts = self.accounts.lock().unwrap();
            let account = accounts.get(email).ok_or(SignInError::InvalidCredential)?;
            if account.password != password {
                return Err(SignInError::InvalidCredential);
            }
            if account.disabled {
                return Err(SignInError::AccountDisabled);
            }
            Principal {
                identity_id: account.identity_id.clone(),
                email: email.to_string(),
            }
        };

        self.emit(Some(principal.clone()));
        Ok(principal)
    }

    async fn sign_out(&self) {
        self.sign_outs.fetch_add(1, Ordering::SeqCst);
        self.emit(None);
    }

    fn session_events(&self) -> mpsc::UnboundedReceiver<SessionEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.lock().unwrap().push(tx);
        rx
    }
}
