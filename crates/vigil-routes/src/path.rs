//! The application's logical route surface.

use serde::{Deserialize, Serialize};

use vigil_types::Role;

/// A logical route in the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoutePath {
    /// `/` -- the public landing view.
    Root,
    /// `/login` -- the sign-in view.
    Login,
    /// `/signup/{role}` -- role-specific registration.
    Signup(Role),
    /// `/dashboard/{role}` -- the role's dashboard (protected, role-checked).
    Dashboard(Role),
    /// `/settings` -- protected, any role.
    Settings,
}

impl RoutePath {
    /// The dashboard route for a role.
    pub fn dashboard(role: Role) -> Self {
        RoutePath::Dashboard(role)
    }

    /// Whether this route requires a resolved session.
    pub fn is_protected(&self) -> bool {
        matches!(self, RoutePath::Dashboard(_) | RoutePath::Settings)
    }
}

impl std::fmt::Display for RoutePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoutePath::Root => write!(f, "/"),
            RoutePath::Login => write!(f, "/login"),
            RoutePath::Signup(role) => write!(f, "/signup/{role}"),
            RoutePath::Dashboard(role) => write!(f, "/dashboard/{role}"),
            RoutePath::Settings => write!(f, "/settings"),
        }
    }
}
