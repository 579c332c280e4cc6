//! Compliance audit logging for Vigil.
//!
//! Every sensitive action appends a structured entry to an append-only
//! backend collection, attributed to the session resolved at the moment
//! of the action. Audit logging is best-effort by contract: it never
//! blocks, never retries, and never surfaces a failure to the caller.
//!
//! - [`AuditStore`]: the seam to the append-only backend collection
//! - [`AuditLogger`]: fire-and-forget [`record`](AuditLogger::record)
//!   plus the standard action constants and convenience wrappers in
//!   [`actions`]

pub mod actions;
pub mod logger;
pub mod store;

pub use logger::AuditLogger;
pub use store::AuditStore;
