//! The two gate state machines.
//!
//! Both gates evaluate the same [`SessionState`] stream. `Loading` is
//! absorbing for both: no redirect decision is made before resolution
//! completes, so unauthenticated content never flashes while a lookup is
//! in flight.

use vigil_types::{Role, SessionState};

use crate::path::RoutePath;

/// What a gate decided for the current session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOutcome {
    /// Resolution is still in flight; render a neutral waiting state.
    Wait,
    /// Render the wrapped view.
    Render,
    /// Navigate to the given route instead of rendering.
    Redirect(RoutePath),
}

/// Gate for public views (`/`, `/login`, `/signup/{role}`).
///
/// A signed-in user never sees a public view: a resolved session redirects
/// to its own dashboard.
#[derive(Debug, Clone, Copy, Default)]
pub struct PublicGate;

impl PublicGate {
    pub fn evaluate(&self, state: &SessionState) -> GateOutcome {
        match state {
            SessionState::Loading => GateOutcome::Wait,
            SessionState::Resolved(session) => {
                GateOutcome::Redirect(RoutePath::dashboard(session.role))
            }
            SessionState::SignedOut | SessionState::Invalid(_) => GateOutcome::Render,
        }
    }
}

/// Gate for protected views (`/dashboard/{role}`, `/settings`).
///
/// If the view declares a required role and the resolved role mismatches,
/// the gate redirects to the resolved role's own dashboard rather than
/// rendering a forbidden error (least-privilege display).
#[derive(Debug, Clone, Copy, Default)]
pub struct ProtectedGate {
    /// Role this view is restricted to; `None` admits any resolved role.
    pub required_role: Option<Role>,
}

impl ProtectedGate {
    /// A gate admitting any resolved session.
    pub fn any_role() -> Self {
        Self { required_role: None }
    }

    /// A gate restricted to one role.
    pub fn for_role(role: Role) -> Self {
        Self {
            required_role: Some(role),
        }
    }

    pub fn evaluate(&self, state: &SessionState) -> GateOutcome {
        match state {
            SessionState::Loading => GateOutcome::Wait,
            SessionState::SignedOut | SessionState::Invalid(_) => {
                GateOutcome::Redirect(RoutePath::Login)
            }
            SessionState::Resolved(session) => match self.required_role {
                Some(required) if required != session.role => {
                    GateOutcome::Redirect(RoutePath::dashboard(session.role))
                }
                _ => GateOutcome::Render,
            },
        }
    }
}
