//! The alert subscription manager.
//!
//! Owns at most one live store subscription at any instant, keyed by the
//! current patient id. Changing the key closes the prior subscription
//! unconditionally -- even with a push in flight -- and bumps a
//! generation counter; forwarders from superseded generations drop their
//! pushes instead of delivering them. This is the same race-guard shape
//! the session resolver uses, keyed by patient id instead of identity id.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::debug;

use vigil_types::{Alert, PatientId, VigilError};

use crate::store::{AlertStore, SubscriptionHandle};

/// Manages the single live alert subscription for the resolved patient.
///
/// Output is an ordered sequence of full snapshots: every push replaces
/// the consumer's mirror wholesale, in the store's reported document
/// order.
pub struct AlertSubscriptionManager {
    store: Arc<dyn AlertStore>,
    out: mpsc::UnboundedSender<Vec<Alert>>,
    live: Option<LiveSubscription>,
    generation: Arc<AtomicU64>,
}

struct LiveSubscription {
    patient_id: PatientId,
    handle: SubscriptionHandle,
}

impl AlertSubscriptionManager {
    /// Create a manager and the snapshot sequence it feeds.
    pub fn new(store: Arc<dyn AlertStore>) -> (Self, mpsc::UnboundedReceiver<Vec<Alert>>) {
        let (out, updates) = mpsc::unbounded_channel();
        (
            Self {
                store,
                out,
                live: None,
                generation: Arc::new(AtomicU64::new(0)),
            },
            updates,
        )
    }

    /// The patient the live subscription is scoped to, if any.
    pub fn current_patient(&self) -> Option<&PatientId> {
        self.live.as_ref().map(|l| &l.patient_id)
    }

    /// Re-scope the live feed to `patient_id`.
    ///
    /// - Same id as the current subscription: no-op.
    /// - `None`: close any live subscription and emit an empty snapshot
    ///   so the consumer drops its mirror; no subscription is opened.
    /// - A distinct id: close the prior subscription, then open a new one
    ///   scoped to the id and forward its pushes.
    pub async fn set_patient(&mut self, patient_id: Option<PatientId>) -> Result<(), VigilError> {
        if let Some(ref p) = patient_id {
            if self.current_patient() == Some(p) {
                return Ok(());
            }
        }

        self.close();

        let Some(patient_id) = patient_id else {
            // The mirror for the previous patient is discarded, never
            // carried over.
            let _ = self.out.send(Vec::new());
            return Ok(());
        };

        debug!(patient = %patient_id, "opening alert subscription");
        let subscription = self.store.subscribe(&patient_id).await?;
        let generation = self.generation.load(Ordering::SeqCst);

        tokio::spawn(forward_pushes(
            subscription.pushes,
            self.out.clone(),
            Arc::clone(&self.generation),
            generation,
            patient_id.clone(),
        ));

        self.live = Some(LiveSubscription {
            patient_id,
            handle: subscription.handle,
        });
        Ok(())
    }

    /// Close the live subscription, if any. Idempotent; also invoked on
    /// drop.
    pub fn close(&mut self) {
        if let Some(live) = self.live.take() {
            debug!(patient = %live.patient_id, "closing alert subscription");
            live.handle.close();
            // Supersede any forwarder still holding queued pushes.
            self.generation.fetch_add(1, Ordering::SeqCst);
        }
    }
}

impl Drop for AlertSubscriptionManager {
    fn drop(&mut self) {
        self.close();
    }
}

/// Forward snapshots from one subscription while its generation governs.
async fn forward_pushes(
    mut pushes: mpsc::UnboundedReceiver<Vec<Alert>>,
    out: mpsc::UnboundedSender<Vec<Alert>>,
    generation: Arc<AtomicU64>,
    my_generation: u64,
    patient_id: PatientId,
) {
    while let Some(snapshot) = pushes.recv().await {
        if generation.load(Ordering::SeqCst) != my_generation {
            debug!(patient = %patient_id, "dropping push for superseded subscription");
            break;
        }
        if out.send(snapshot).is_err() {
            break;
        }
    }
}
