//! The alert store seam and the subscription object.
//!
//! A subscription is a pair: the store side ([`AlertFeed`]) pushes ordered
//! snapshots until it observes the close signal; the client side
//! ([`AlertSubscription`]) receives them and owns the close handle.
//! Making the channel and the close signal one object structurally
//! prevents double-subscription and leaked-listener bugs.

use async_trait::async_trait;
use tokio::sync::{mpsc, watch};

use vigil_types::{Alert, PatientId, VigilError};

/// Backend store supporting live subscriptions on per-patient alert
/// collections (`patients/{patientId}/alerts`).
#[async_trait]
pub trait AlertStore: Send + Sync {
    /// Open a live subscription scoped to one patient.
    ///
    /// The store delivers a full snapshot of the collection on every
    /// change, in its reported document order. The first snapshot is the
    /// collection's current contents.
    async fn subscribe(&self, patient_id: &PatientId) -> Result<AlertSubscription, VigilError>;
}

/// Build a connected feed/subscription pair.
pub fn subscription_channel() -> (AlertFeed, AlertSubscription) {
    let (push_tx, push_rx) = mpsc::unbounded_channel();
    let (close_tx, close_rx) = watch::channel(false);
    (
        AlertFeed {
            tx: push_tx,
            closed: close_rx,
        },
        AlertSubscription {
            pushes: push_rx,
            handle: SubscriptionHandle { close: close_tx },
        },
    )
}

/// Store side of a subscription: pushes snapshots until closed.
#[derive(Debug)]
pub struct AlertFeed {
    tx: mpsc::UnboundedSender<Vec<Alert>>,
    closed: watch::Receiver<bool>,
}

impl AlertFeed {
    /// Deliver a full snapshot, replacing the subscriber's mirror.
    ///
    /// Returns `false` once the subscription is closed or dropped; the
    /// store should stop pushing then.
    pub fn push(&self, snapshot: Vec<Alert>) -> bool {
        if *self.closed.borrow() {
            return false;
        }
        self.tx.send(snapshot).is_ok()
    }

    /// Whether the client side has closed the subscription.
    pub fn is_closed(&self) -> bool {
        *self.closed.borrow()
    }

    /// Wait until the subscription is closed or dropped.
    pub async fn closed(&mut self) {
        // wait_for errors when the close sender is dropped, which also
        // means no client remains.
        let _ = self.closed.wait_for(|closed| *closed).await;
    }
}

/// Client side of a subscription: the delivery channel plus close handle.
#[derive(Debug)]
pub struct AlertSubscription {
    /// Ordered snapshot pushes from the store.
    pub pushes: mpsc::UnboundedReceiver<Vec<Alert>>,
    /// Close handle; idempotent.
    pub handle: SubscriptionHandle,
}

/// Handle to close a live subscription. Closing twice is a no-op.
#[derive(Debug)]
pub struct SubscriptionHandle {
    close: watch::Sender<bool>,
}

impl SubscriptionHandle {
    /// Signal the store side to stop pushing. Safe to call repeatedly.
    pub fn close(&self) {
        // send_replace never fails; re-sending true is harmless.
        self.close.send_replace(true);
    }

    pub fn is_closed(&self) -> bool {
        *self.close.borrow()
    }
}

impl Drop for SubscriptionHandle {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alert(id: &str, patient: &str) -> Alert {
        Alert::new(id, patient, serde_json::Map::new())
    }

    #[tokio::test]
    async fn pushes_arrive_in_order_until_closed() {
        let (feed, mut sub) = subscription_channel();

        assert!(feed.push(vec![alert("a1", "p1")]));
        assert!(feed.push(vec![]));

        assert_eq!(sub.pushes.recv().await.unwrap().len(), 1);
        assert_eq!(sub.pushes.recv().await.unwrap().len(), 0);

        sub.handle.close();
        assert!(feed.is_closed());
        assert!(!feed.push(vec![alert("a2", "p1")]));
    }

    #[tokio::test]
    async fn close_is_idempotent() {
        let (feed, sub) = subscription_channel();
        sub.handle.close();
        sub.handle.close();
        assert!(feed.is_closed());
    }

    #[tokio::test]
    async fn dropping_the_subscription_closes_the_feed() {
        let (mut feed, sub) = subscription_channel();
        drop(sub);
        feed.closed().await;
        assert!(!feed.push(vec![]));
    }
}
