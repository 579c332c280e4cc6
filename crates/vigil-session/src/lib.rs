//! Session resolution for Vigil.
//!
//! This crate turns the identity provider's raw session-changed events into
//! the single live [`SessionState`] the rest of the runtime observes:
//!
//! - [`IdentityProvider`] / [`ProfileStore`]: seams to the external
//!   authentication service and the keyed profile record store
//! - [`SessionStore`]: the injectable holder of the live session state,
//!   with one writer (the resolver) and any number of readers
//! - [`SessionResolver`]: the event loop that issues profile lookups and
//!   enforces the identity-keyed race guard so a stale lookup can never
//!   resolve a superseded session
//!
//! [`SessionState`]: vigil_types::SessionState

pub mod provider;
pub mod resolver;
pub mod store;

pub use provider::{IdentityProvider, ProfileStore, SessionEvent};
pub use resolver::SessionResolver;
pub use store::SessionStore;
