//! Observer-to-patient subscription registry with bounded fan-out.
//!
//! [`SubscriptionRegistry`] is the contract the broadcaster depends on; a
//! multi-instance deployment can back it with shared pub/sub without
//! changing the broadcaster. [`LocalSubscriptionRegistry`] is the
//! single-instance implementation: an `RwLock`-guarded pair of maps, so
//! broadcasts to different patients only ever take the read lock
//! concurrently.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::{mpsc, RwLock};

use crate::bus::PatientEvent;

/// Default per-observer delivery queue capacity.
const DEFAULT_QUEUE_CAPACITY: usize = 64;

/// Tracks which observers are subscribed to which patients and delivers
/// events to them.
///
/// All operations must be safe under concurrent `subscribe` /
/// `unsubscribe` / `broadcast` calls.
#[async_trait]
pub trait SubscriptionRegistry: Send + Sync {
    /// Register a connected observer and return the receiving half of its
    /// delivery queue.
    ///
    /// Re-registering an observer id replaces the previous registration
    /// and closes its old queue.
    async fn register_observer(&self, observer_id: &str) -> mpsc::Receiver<PatientEvent>;

    /// Subscribe an observer to a patient's channel.
    ///
    /// Idempotent: re-subscribing is a no-op. Subscribing an unregistered
    /// observer is ignored.
    async fn subscribe(&self, observer_id: &str, patient_id: &str);

    /// Remove one (observer, patient) subscription.
    ///
    /// Unsubscribing a non-existent subscription is a no-op. After this
    /// returns, no further events for the pair are scheduled; items
    /// already in the delivery queue may still land.
    async fn unsubscribe(&self, observer_id: &str, patient_id: &str);

    /// Remove an observer and all of its subscriptions (disconnect).
    async fn remove_observer(&self, observer_id: &str);

    /// Deliver an event to every observer currently subscribed to the
    /// patient. Never blocks on a slow observer.
    ///
    /// Returns the number of observers the event was queued for.
    async fn broadcast(&self, patient_id: &str, event: &PatientEvent) -> usize;

    /// Number of currently registered observers.
    async fn observer_count(&self) -> usize;
}

/// Per-observer state: the delivery queue sender and the set of patients
/// the observer follows.
struct ObserverHandle {
    sender: mpsc::Sender<PatientEvent>,
    patients: HashSet<String>,
}

#[derive(Default)]
struct Inner {
    /// observer id -> handle
    observers: HashMap<String, ObserverHandle>,
    /// patient id -> subscribed observer ids
    channels: HashMap<String, HashSet<String>>,
}

impl Inner {
    fn detach(&mut self, observer_id: &str, patients: &HashSet<String>) {
        for patient_id in patients {
            if let Some(subscribers) = self.channels.get_mut(patient_id) {
                subscribers.remove(observer_id);
                if subscribers.is_empty() {
                    self.channels.remove(patient_id);
                }
            }
        }
    }
}

/// In-process registry backed by a concurrent map.
///
/// Each observer gets a **bounded** delivery queue; when it overflows the
/// newest event is dropped for that observer (logged), keeping slow
/// consumers from buffering unboundedly or stalling delivery to others. A
/// closed queue (broken connection) removes the observer's subscriptions.
pub struct LocalSubscriptionRegistry {
    inner: RwLock<Inner>,
    queue_capacity: usize,
}

impl LocalSubscriptionRegistry {
    /// Create a registry with a specific per-observer queue capacity.
    pub fn new(queue_capacity: usize) -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
            queue_capacity,
        }
    }
}

impl Default for LocalSubscriptionRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_QUEUE_CAPACITY)
    }
}

#[async_trait]
impl SubscriptionRegistry for LocalSubscriptionRegistry {
    async fn register_observer(&self, observer_id: &str) -> mpsc::Receiver<PatientEvent> {
        let (tx, rx) = mpsc::channel(self.queue_capacity);
        let mut inner = self.inner.write().await;
        if let Some(old) = inner.observers.insert(
            observer_id.to_string(),
            ObserverHandle {
                sender: tx,
                patients: HashSet::new(),
            },
        ) {
            tracing::warn!(observer_id, "Observer re-registered, dropping old queue");
            let patients = old.patients;
            inner.detach(observer_id, &patients);
        }
        rx
    }

    async fn subscribe(&self, observer_id: &str, patient_id: &str) {
        let mut inner = self.inner.write().await;
        let Some(handle) = inner.observers.get_mut(observer_id) else {
            tracing::warn!(observer_id, "Subscribe from unregistered observer ignored");
            return;
        };
        if handle.patients.insert(patient_id.to_string()) {
            inner
                .channels
                .entry(patient_id.to_string())
                .or_default()
                .insert(observer_id.to_string());
            tracing::debug!(observer_id, patient_id, "Observer subscribed");
        }
    }

    async fn unsubscribe(&self, observer_id: &str, patient_id: &str) {
        let mut inner = self.inner.write().await;
        if let Some(handle) = inner.observers.get_mut(observer_id) {
            if handle.patients.remove(patient_id) {
                if let Some(subscribers) = inner.channels.get_mut(patient_id) {
                    subscribers.remove(observer_id);
                    if subscribers.is_empty() {
                        inner.channels.remove(patient_id);
                    }
                }
                tracing::debug!(observer_id, patient_id, "Observer unsubscribed");
            }
        }
    }

    async fn remove_observer(&self, observer_id: &str) {
        let mut inner = self.inner.write().await;
        if let Some(handle) = inner.observers.remove(observer_id) {
            let patients = handle.patients;
            inner.detach(observer_id, &patients);
            tracing::debug!(observer_id, "Observer removed");
        }
    }

    async fn broadcast(&self, patient_id: &str, event: &PatientEvent) -> usize {
        // Delivery takes the read lock only; per-observer queues isolate
        // slow consumers from each other.
        let mut closed: Vec<String> = Vec::new();
        let mut delivered = 0;
        {
            let inner = self.inner.read().await;
            let Some(subscribers) = inner.channels.get(patient_id) else {
                return 0;
            };
            for observer_id in subscribers {
                let Some(handle) = inner.observers.get(observer_id) else {
                    continue;
                };
                match handle.sender.try_send(event.clone()) {
                    Ok(()) => delivered += 1,
                    Err(mpsc::error::TrySendError::Full(_)) => {
                        // Drop-newest policy for a saturated observer.
                        tracing::warn!(
                            observer_id = %observer_id,
                            patient_id,
                            "Observer queue full, dropping event"
                        );
                    }
                    Err(mpsc::error::TrySendError::Closed(_)) => {
                        closed.push(observer_id.clone());
                    }
                }
            }
        }

        // Broken observers lose their subscriptions; others are unaffected.
        for observer_id in closed {
            tracing::debug!(observer_id = %observer_id, "Observer queue closed, removing");
            self.remove_observer(&observer_id).await;
        }

        delivered
    }

    async fn observer_count(&self) -> usize {
        self.inner.read().await.observers.len()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use vitalstream_core::alert::{AlertEvent, AlertSeverity};
    use vitalstream_core::vitals::VitalType;

    use super::*;

    fn event_for(patient_id: &str) -> PatientEvent {
        PatientEvent::Alert(AlertEvent {
            patient_id: patient_id.to_string(),
            vital_type: VitalType::HeartRate,
            severity: AlertSeverity::Warning,
            message: "warning".into(),
            timestamp: Utc::now(),
            triggering_record_id: 1,
        })
    }

    #[tokio::test]
    async fn subscribed_observer_receives_exactly_one_event() {
        let registry = LocalSubscriptionRegistry::default();
        let mut rx = registry.register_observer("obs-1").await;
        let mut other_rx = registry.register_observer("obs-2").await;
        registry.subscribe("obs-1", "patient-42").await;
        registry.subscribe("obs-2", "patient-7").await;

        let delivered = registry.broadcast("patient-42", &event_for("patient-42")).await;
        assert_eq!(delivered, 1);

        let received = rx.recv().await.unwrap();
        assert_eq!(received.patient_id(), "patient-42");

        // The observer on a different patient's channel sees nothing.
        assert!(other_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn unsubscribed_observer_receives_nothing() {
        let registry = LocalSubscriptionRegistry::default();
        let mut rx = registry.register_observer("obs-1").await;
        registry.subscribe("obs-1", "patient-42").await;
        registry.unsubscribe("obs-1", "patient-42").await;

        let delivered = registry.broadcast("patient-42", &event_for("patient-42")).await;
        assert_eq!(delivered, 0);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn resubscribing_is_idempotent() {
        let registry = LocalSubscriptionRegistry::default();
        let mut rx = registry.register_observer("obs-1").await;
        registry.subscribe("obs-1", "patient-42").await;
        registry.subscribe("obs-1", "patient-42").await;

        let delivered = registry.broadcast("patient-42", &event_for("patient-42")).await;
        assert_eq!(delivered, 1);
        assert!(rx.recv().await.is_some());
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn unsubscribing_nonexistent_subscription_is_a_noop() {
        let registry = LocalSubscriptionRegistry::default();
        let _rx = registry.register_observer("obs-1").await;
        registry.unsubscribe("obs-1", "patient-99").await;
        registry.unsubscribe("ghost", "patient-99").await;
    }

    #[tokio::test]
    async fn disconnect_removes_all_subscriptions() {
        let registry = LocalSubscriptionRegistry::default();
        let _rx = registry.register_observer("obs-1").await;
        registry.subscribe("obs-1", "p1").await;
        registry.subscribe("obs-1", "p2").await;

        registry.remove_observer("obs-1").await;

        assert_eq!(registry.broadcast("p1", &event_for("p1")).await, 0);
        assert_eq!(registry.broadcast("p2", &event_for("p2")).await, 0);
        assert_eq!(registry.observer_count().await, 0);
    }

    #[tokio::test]
    async fn full_queue_drops_newest_without_blocking() {
        let registry = LocalSubscriptionRegistry::new(1);
        let mut rx = registry.register_observer("slow").await;
        registry.subscribe("slow", "p1").await;

        // First event fills the queue; the rest are dropped for this
        // observer rather than blocking the broadcast.
        assert_eq!(registry.broadcast("p1", &event_for("p1")).await, 1);
        assert_eq!(registry.broadcast("p1", &event_for("p1")).await, 0);
        assert_eq!(registry.broadcast("p1", &event_for("p1")).await, 0);

        assert!(rx.recv().await.is_some());
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn closed_queue_removes_observer_subscriptions() {
        let registry = LocalSubscriptionRegistry::default();
        let rx = registry.register_observer("gone").await;
        registry.subscribe("gone", "p1").await;
        drop(rx);

        assert_eq!(registry.broadcast("p1", &event_for("p1")).await, 0);
        assert_eq!(registry.observer_count().await, 0);
    }

    #[tokio::test]
    async fn broadcast_fans_out_to_all_patient_subscribers() {
        let registry = LocalSubscriptionRegistry::default();
        let mut rx1 = registry.register_observer("a").await;
        let mut rx2 = registry.register_observer("b").await;
        registry.subscribe("a", "p1").await;
        registry.subscribe("b", "p1").await;

        assert_eq!(registry.broadcast("p1", &event_for("p1")).await, 2);
        assert!(rx1.recv().await.is_some());
        assert!(rx2.recv().await.is_some());
    }
}
