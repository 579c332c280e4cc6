//! Live alert mirrors for Vigil.
//!
//! The backend document store pushes ordered snapshots of a patient's
//! alert collection; this crate owns the client side of that feed:
//!
//! - [`AlertStore`]: the seam to the backend's live-subscribe operation
//! - [`AlertSubscription`] / [`AlertFeed`]: an explicit subscription object
//!   with a single delivery channel and an idempotent close handle
//! - [`AlertSubscriptionManager`]: guarantees at most one live
//!   subscription at any instant, keyed by the current patient id, and
//!   discards pushes from superseded subscriptions

pub mod manager;
pub mod store;

pub use manager::AlertSubscriptionManager;
pub use store::{AlertFeed, AlertStore, AlertSubscription, SubscriptionHandle};
