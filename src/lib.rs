//! Vigil -- role-gated health alert runtime.
//!
//! Caretakers, patients, and medical staff view live health alerts and
//! dashboards gated by role; every sensitive action lands in an
//! append-only compliance audit trail. The crates compose three
//! cross-cutting concerns:
//!
//! - session resolution: the identity provider's asynchronous session
//!   events become one live [`SessionState`], race-guarded so a stale
//!   profile lookup can never resolve a superseded identity
//!   (`vigil-session`)
//! - route gating: pure [`PublicGate`]/[`ProtectedGate`] state machines
//!   decide render/wait/redirect from session state alone
//!   (`vigil-routes`)
//! - live alert mirrors and auditing: at most one store subscription per
//!   resolved patient identity, and fire-and-forget audit entries
//!   attributed to the session at the moment of the action
//!   (`vigil-alerts`, `vigil-audit`)
//!
//! [`VigilRuntime`] wires them together over injected backend seams.

pub mod runtime;

pub use runtime::VigilRuntime;

pub use vigil_alerts::{AlertFeed, AlertStore, AlertSubscription, AlertSubscriptionManager, SubscriptionHandle};
pub use vigil_audit::{actions, AuditLogger, AuditStore};
pub use vigil_routes::{GateOutcome, ProtectedGate, PublicGate, RoutePath};
pub use vigil_session::{IdentityProvider, ProfileStore, SessionResolver, SessionStore};
pub use vigil_types::{
    Alert, AuditDraft, AuditLogEntry, IdentityId, InvalidReason, PatientId, Principal, Profile,
    Role, Session, SessionState, SignInError, VigilConfig, VigilError,
};
