//! In-memory profile store.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use vigil_session::ProfileStore;
use vigil_types::{IdentityId, Profile, VigilError};

/// Keyed profile records with error injection.
#[derive(Default)]
pub struct MemoryProfileStore {
    profiles: Mutex<HashMap<String, Profile>>,
    failing: Mutex<bool>,
}

impl MemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a profile record.
    pub fn insert(&self, identity_id: &str, role: &str, email: &str) {
        self.profiles.lock().unwrap().insert(
            identity_id.to_string(),
            Profile {
                role: role.to_string(),
                email: email.to_string(),
            },
        );
    }

    /// Remove a profile record.
    pub fn remove(&self, identity_id: &str) {
        self.profiles.lock().unwrap().remove(identity_id);
    }

    /// Make every lookup fail until called with `false`.
    pub fn set_failing(&self, failing: bool) {
        *self.failing.lock().unwrap() = failing;
    }
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn fetch_profile(&self, identity_id: &IdentityId) -> Result<Option<Profile>, VigilError> {
        if *self.failing.lock().unwrap() {
            return Err(VigilError::Profile("profile store unavailable".into()));
        }
        Ok(self.profiles.lock().unwrap().get(identity_id.as_str()).cloned())
    }
}
