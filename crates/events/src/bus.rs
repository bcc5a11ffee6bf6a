//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] decouples the ingestion pipeline from the observer fan-out:
//! the pipeline publishes every stored record and alert here, and the
//! broadcaster task forwards them to subscribed observers. It is designed
//! to be shared via `Arc<EventBus>` across the application.

use serde::Serialize;
use tokio::sync::broadcast;
use vitalstream_core::alert::AlertEvent;
use vitalstream_db::models::vital_sign::VitalSignRecord;

/// A per-patient event pushed to subscribed observers.
///
/// Serializes to the observer wire shape:
/// `{ "event": "new-vital", "data": ... }` or
/// `{ "event": "alert", "data": ... }`.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum PatientEvent {
    NewVital(VitalSignRecord),
    Alert(AlertEvent),
}

impl PatientEvent {
    /// The patient whose channel this event belongs to.
    pub fn patient_id(&self) -> &str {
        match self {
            PatientEvent::NewVital(record) => &record.patient_id,
            PatientEvent::Alert(alert) => &alert.patient_id,
        }
    }
}

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 1024;

/// In-process fan-out event bus.
///
/// Wraps a [`broadcast::Sender`] so that any number of consumers can
/// independently receive every published [`PatientEvent`].
pub struct EventBus {
    sender: broadcast::Sender<PatientEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full, the oldest un-consumed messages are dropped
    /// and slow receivers will observe a `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current consumers.
    ///
    /// If there are no active consumers the event is silently dropped.
    pub fn publish(&self, event: PatientEvent) {
        // Ignore the SendError -- it only means there are zero receivers.
        let _ = self.sender.send(event);
    }

    /// Subscribe to all events published on this bus.
    pub fn subscribe(&self) -> broadcast::Receiver<PatientEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
