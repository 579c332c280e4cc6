//! Route gating for Vigil.
//!
//! The route surface here is logical, not HTTP: a [`RoutePath`] names a
//! view, and a gate decides -- purely from the current session state --
//! whether that view renders, waits, or redirects. Keeping the decision a
//! pure function of [`SessionState`] makes it unit-testable without
//! rendering anything.
//!
//! [`SessionState`]: vigil_types::SessionState

pub mod gate;
pub mod path;

pub use gate::{GateOutcome, ProtectedGate, PublicGate};
pub use path::RoutePath;
