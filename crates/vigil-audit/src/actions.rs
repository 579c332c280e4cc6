//! Standard action names and convenience wrappers.
//!
//! Wrappers only standardize the action constants and common detail
//! shapes; they carry no state of their own.

use serde_json::{Map, Value};

use crate::logger::AuditLogger;

/// A principal signed in.
pub const SIGN_IN: &str = "sign_in";
/// A principal signed out.
pub const SIGN_OUT: &str = "sign_out";
/// A monitoring device was paired.
pub const DEVICE_PAIRED: &str = "device_paired";
/// A monitoring device was unpaired.
pub const DEVICE_UNPAIRED: &str = "device_unpaired";
/// Readings were synced from a device.
pub const DEVICE_SYNC: &str = "device_sync";
/// Patient data was viewed.
pub const DATA_ACCESS: &str = "data_access";
/// A client-side error worth a compliance trace.
pub const CLIENT_ERROR: &str = "client_error";

impl AuditLogger {
    /// Record a successful sign-in.
    pub fn record_sign_in(&self) {
        self.record(SIGN_IN, Map::new());
    }

    /// Record a sign-out.
    pub fn record_sign_out(&self) {
        self.record(SIGN_OUT, Map::new());
    }

    /// Record a device action (`DEVICE_PAIRED`, `DEVICE_UNPAIRED`,
    /// `DEVICE_SYNC`) against a device id.
    pub fn record_device_action(&self, action: &str, device_id: &str) {
        let mut details = Map::new();
        details.insert("device_id".to_string(), Value::String(device_id.to_string()));
        self.record(action, details);
    }

    /// Record access to a named data resource (e.g. `"alerts"`).
    pub fn record_data_access(&self, resource: &str) {
        let mut details = Map::new();
        details.insert("resource".to_string(), Value::String(resource.to_string()));
        self.record(DATA_ACCESS, details);
    }

    /// Record a client-side error with its context.
    pub fn record_error(&self, context: &str, message: &str) {
        let mut details = Map::new();
        details.insert("context".to_string(), Value::String(context.to_string()));
        details.insert("message".to_string(), Value::String(message.to_string()));
        self.record(CLIENT_ERROR, details);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use async_trait::async_trait;
    use chrono::Utc;
    use tokio::sync::{mpsc, watch};
    use uuid::Uuid;

    use vigil_types::{
        AuditDraft, AuditLogEntry, IdentityId, Role, Session, SessionState, VigilError,
    };

    use crate::store::AuditStore;

    struct ProbeStore {
        appended: mpsc::UnboundedSender<AuditDraft>,
    }

    #[async_trait]
    impl AuditStore for ProbeStore {
        async fn append(&self, draft: AuditDraft) -> Result<AuditLogEntry, VigilError> {
            self.appended.send(draft.clone()).unwrap();
            Ok(AuditLogEntry {
                entry_id: Uuid::new_v4(),
                timestamp: Utc::now(),
                action: draft.action,
                actor_id: draft.actor_id,
                details: draft.details,
            })
        }

        async fn recent_for_actor(
            &self,
            _actor_id: &str,
            _limit: usize,
        ) -> Result<Vec<AuditLogEntry>, VigilError> {
            Ok(Vec::new())
        }
    }

    fn logger() -> (AuditLogger, mpsc::UnboundedReceiver<AuditDraft>) {
        let (tx, rx) = mpsc::unbounded_channel();
        // The receiver keeps the last value readable after the sender drops.
        let (_session_tx, session) = watch::channel(SessionState::Resolved(Session {
            identity_id: IdentityId::from("u1"),
            email: "a@b.com".into(),
            role: Role::Caretaker,
        }));
        (AuditLogger::new(session, Arc::new(ProbeStore { appended: tx })), rx)
    }

    #[tokio::test]
    async fn device_wrapper_shapes_details() {
        let (logger, mut appended) = logger();
        logger.record_device_action(DEVICE_PAIRED, "bp-monitor-1");

        let draft = appended.recv().await.unwrap();
        assert_eq!(draft.action, DEVICE_PAIRED);
        assert_eq!(draft.details["device_id"], "bp-monitor-1");
        assert_eq!(draft.details["email"], "a@b.com");
    }

    #[tokio::test]
    async fn data_access_and_error_wrappers() {
        let (logger, mut appended) = logger();

        logger.record_data_access("alerts");
        let draft = appended.recv().await.unwrap();
        assert_eq!(draft.action, DATA_ACCESS);
        assert_eq!(draft.details["resource"], "alerts");

        logger.record_error("alert_feed", "subscription dropped");
        let draft = appended.recv().await.unwrap();
        assert_eq!(draft.action, CLIENT_ERROR);
        assert_eq!(draft.details["context"], "alert_feed");
        assert_eq!(draft.details["message"], "subscription dropped");
    }

    #[tokio::test]
    async fn sign_in_and_out_wrappers_use_constants() {
        let (logger, mut appended) = logger();
        logger.record_sign_in();
        logger.record_sign_out();
        assert_eq!(appended.recv().await.unwrap().action, SIGN_IN);
        assert_eq!(appended.recv().await.unwrap().action, SIGN_OUT);
    }
}
