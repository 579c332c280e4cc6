//! In-memory alert store with live snapshot pushes.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use vigil_alerts::store::{subscription_channel, AlertFeed, AlertStore, AlertSubscription};
use vigil_types::{Alert, PatientId, VigilError};

/// Per-patient alert collections supporting one live feed each.
///
/// `subscribe` delivers the collection's current contents as the first
/// snapshot, then every `push` replaces it, matching the snapshot
/// semantics of the backend's live-subscribe operation.
#[derive(Default)]
pub struct MemoryAlertStore {
    documents: Mutex<HashMap<String, Vec<Alert>>>,
    feeds: Mutex<HashMap<String, AlertFeed>>,
    subscriptions_opened: AtomicUsize,
}

impl MemoryAlertStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a patient's collection without notifying any live feed.
    pub fn seed(&self, patient_id: &str, alerts: Vec<Alert>) {
        self.documents
            .lock()
            .unwrap()
            .insert(patient_id.to_string(), alerts);
    }

    /// Replace a patient's collection and push the new snapshot to the
    /// live feed, if one is open. Returns whether a feed received it.
    pub fn push(&self, patient_id: &str, alerts: Vec<Alert>) -> bool {
        self.documents
            .lock()
            .unwrap()
            .insert(patient_id.to_string(), alerts.clone());

        let mut feeds = self.feeds.lock().unwrap();
        if let Some(feed) = feeds.get(patient_id) {
            if feed.push(alerts) {
                return true;
            }
            // Feed was closed by the client; drop it.
            feeds.remove(patient_id);
        }
        false
    }

    /// Total subscriptions opened over this store's lifetime.
    pub fn subscriptions_opened(&self) -> usize {
        self.subscriptions_opened.load(Ordering::SeqCst)
    }

    /// How many live feeds are currently open (closed feeds are pruned
    /// lazily on the next push).
    pub fn live_feeds(&self) -> usize {
        self.feeds
            .lock()
            .unwrap()
            .values()
            .filter(|feed| !feed.is_closed())
            .count()
    }
}

#[async_trait]
impl AlertStore for MemoryAlertStore {
    async fn subscribe(&self, patient_id: &PatientId) -> Result<AlertSubscription, VigilError> {
        self.subscriptions_opened.fetch_add(1, Ordering::SeqCst);
        let (feed, subscription) = subscription_channel();

        let current = self
            .documents
            .lock()
            .unwrap()
            .get(patient_id.as_str())
            .cloned()
            .unwrap_or_default();
        feed.push(current);

        self.feeds
            .lock()
            .unwrap()
            .insert(patient_id.as_str().to_string(), feed);
        Ok(subscription)
    }
}
