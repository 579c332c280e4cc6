//! In-memory backends and fixtures for testing Vigil.
//!
//! Each backend implements the corresponding seam trait with fully
//! deterministic, in-process behavior:
//!
//! - [`MemoryIdentityProvider`]: scripted accounts, session-changed
//!   events, forced failure modes for the identity-error taxonomy
//! - [`MemoryProfileStore`]: keyed profile records with error injection
//! - [`MemoryAlertStore`]: per-patient collections with live snapshot
//!   pushes
//! - [`MemoryAuditStore`]: append-only entries with a failure switch and
//!   the newest-first actor query
//!
//! Not every helper is used by every consumer; this crate exists for the
//! workspace's tests and examples.

pub mod alerts;
pub mod audit;
pub mod identity;
pub mod profiles;

pub use alerts::MemoryAlertStore;
pub use audit::MemoryAuditStore;
pub use identity::MemoryIdentityProvider;
pub use profiles::MemoryProfileStore;

/// Install a `tracing` subscriber for test output, once per process.
///
/// Respects `RUST_LOG`; repeated calls are no-ops.
pub fn init_test_logging() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_test_writer()
        .try_init();
}
