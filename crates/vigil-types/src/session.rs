//! Session model: provider principals, profile records, and the resolved
//! session state machine.
//!
//! Exactly one [`SessionState`] is live per process; it is the single source
//! of truth for every role-gated decision. A `Session` is only constructed
//! after a successful profile lookup for the *current* identity, so a
//! `Resolved` state always carries a role.

use serde::{Deserialize, Serialize};

use crate::ids::IdentityId;
use crate::role::Role;

/// What the identity provider reports about a signed-in principal.
///
/// Carries no role: the role comes from the profile store, keyed by
/// `identity_id`, during session resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub identity_id: IdentityId,
    pub email: String,
}

/// A raw profile-store record, exactly as the store returns it.
///
/// The `role` string is unvalidated here; the resolver parses it and treats
/// anything unrecognized as a profile-integrity error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub role: String,
    pub email: String,
}

/// The resolved, role-bearing representation of the signed-in principal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub identity_id: IdentityId,
    pub email: String,
    pub role: Role,
}

/// Why a session failed to resolve.
///
/// Both reasons are fatal: the resolver forces a provider-level sign-out so
/// a half-authenticated session can never grant access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InvalidReason {
    /// The profile store has no record for the signed-in identity.
    MissingProfile,
    /// The profile record carries a role outside the recognized set.
    BadRole,
}

impl InvalidReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvalidReason::MissingProfile => "missing-profile",
            InvalidReason::BadRole => "bad-role",
        }
    }
}

impl std::fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The session state machine every gate and logger observes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// A sign-in was reported and the profile lookup is in flight. Gates
    /// treat this as absorbing: no redirect decision is made yet.
    Loading,
    /// No principal is signed in.
    SignedOut,
    /// Profile lookup succeeded for the current identity.
    Resolved(Session),
    /// Profile lookup failed integrity checks; a forced sign-out follows.
    Invalid(InvalidReason),
}

impl SessionState {
    /// The resolved session, if any.
    pub fn resolved(&self) -> Option<&Session> {
        match self {
            SessionState::Resolved(session) => Some(session),
            _ => None,
        }
    }

    /// The resolved role, if any.
    pub fn role(&self) -> Option<Role> {
        self.resolved().map(|s| s.role)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, SessionState::Loading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(role: Role) -> Session {
        Session {
            identity_id: IdentityId::from("u1"),
            email: "a@b.com".into(),
            role,
        }
    }

    #[test]
    fn resolved_accessors() {
        let state = SessionState::Resolved(session(Role::Caretaker));
        assert_eq!(state.role(), Some(Role::Caretaker));
        assert_eq!(state.resolved().unwrap().email, "a@b.com");
    }

    #[test]
    fn non_resolved_states_carry_no_session() {
        for state in [
            SessionState::Loading,
            SessionState::SignedOut,
            SessionState::Invalid(InvalidReason::MissingProfile),
        ] {
            assert!(state.resolved().is_none());
            assert_eq!(state.role(), None);
        }
    }

    #[test]
    fn invalid_reason_strings() {
        assert_eq!(InvalidReason::MissingProfile.to_string(), "missing-profile");
        assert_eq!(InvalidReason::BadRole.to_string(), "bad-role");
    }
}
