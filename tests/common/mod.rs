//! Shared helpers for integration tests.
//!
//! Each integration test file compiles common/ as its own module, so not
//! every helper is used in every file.
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;

use vigil::{Alert, SessionState, VigilConfig, VigilRuntime};
use vigil_harness::{
    MemoryAlertStore, MemoryAuditStore, MemoryIdentityProvider, MemoryProfileStore,
};

/// The full set of in-memory backends behind a runtime.
pub struct Backends {
    pub provider: Arc<MemoryIdentityProvider>,
    pub profiles: Arc<MemoryProfileStore>,
    pub alerts: Arc<MemoryAlertStore>,
    pub audit: Arc<MemoryAuditStore>,
}

pub fn backends() -> Backends {
    vigil_harness::init_test_logging();
    Backends {
        provider: Arc::new(MemoryIdentityProvider::new()),
        profiles: Arc::new(MemoryProfileStore::new()),
        alerts: Arc::new(MemoryAlertStore::new()),
        audit: Arc::new(MemoryAuditStore::new()),
    }
}

pub fn start_runtime(backends: &Backends) -> VigilRuntime {
    VigilRuntime::start(
        VigilConfig::default(),
        backends.provider.clone(),
        backends.profiles.clone(),
        backends.alerts.clone(),
        backends.audit.clone(),
    )
}

/// Register an account with a matching profile record.
pub fn register_user(backends: &Backends, email: &str, password: &str, identity: &str, role: &str) {
    backends.provider.register(email, password, identity);
    backends.profiles.insert(identity, role, email);
}

/// An alert document with a title field.
pub fn titled_alert(id: &str, patient: &str, title: &str) -> Alert {
    let mut fields = serde_json::Map::new();
    fields.insert("title".to_string(), json!(title));
    Alert::new(id, patient, fields)
}

/// Wait until the session store reaches a state matching `pred`.
pub async fn wait_for_state(
    runtime: &VigilRuntime,
    pred: impl Fn(&SessionState) -> bool,
) -> SessionState {
    let mut rx = runtime.session().subscribe();
    let state = rx
        .wait_for(|state| pred(state))
        .await
        .expect("session store closed while waiting")
        .clone();
    state
}

/// Receive snapshots until one satisfies `pred`, returning it. Empty
/// teardown snapshots in between are expected and skipped by most tests.
pub async fn recv_snapshot_matching(
    runtime: &mut VigilRuntime,
    pred: impl Fn(&[Alert]) -> bool,
) -> Vec<Alert> {
    loop {
        let snapshot = tokio::time::timeout(Duration::from_secs(5), runtime.alert_updates().recv())
            .await
            .expect("timed out waiting for alert snapshot")
            .expect("alert updates channel closed");
        if pred(&snapshot) {
            return snapshot;
        }
    }
}

/// Poll until `cond` holds, for conditions signalled outside any channel.
pub async fn wait_until(mut cond: impl FnMut() -> bool) {
    for _ in 0..500 {
        if cond() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(2)).await;
    }
    panic!("condition not met within the polling budget");
}
