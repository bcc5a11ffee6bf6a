//! Bridges the event bus to the observer subscription registry.
//!
//! A single background task consumes every event published by the
//! ingestion pipeline and routes it to the observers subscribed to that
//! patient's channel. Slow-consumer handling lives in the registry; this
//! loop itself never blocks on delivery.

use std::sync::Arc;

use tokio::sync::broadcast::error::RecvError;
use tokio_util::sync::CancellationToken;
use vitalstream_events::{PatientEvent, SubscriptionRegistry};

/// Consume bus events and fan them out until cancelled or the bus closes.
///
/// Takes the subscribed receiver rather than the bus so the loop does not
/// keep the bus alive past shutdown.
pub async fn run(
    mut rx: tokio::sync::broadcast::Receiver<PatientEvent>,
    registry: Arc<dyn SubscriptionRegistry>,
    cancel: CancellationToken,
) {
    tracing::info!("Broadcaster started");

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Broadcaster shutting down");
                break;
            }
            result = rx.recv() => match result {
                Ok(event) => {
                    let delivered = registry.broadcast(event.patient_id(), &event).await;
                    tracing::trace!(
                        patient_id = event.patient_id(),
                        delivered,
                        "Event routed"
                    );
                }
                Err(RecvError::Lagged(skipped)) => {
                    // The bus overwrote events we had not consumed yet.
                    tracing::warn!(skipped, "Broadcaster lagged behind the event bus");
                }
                Err(RecvError::Closed) => {
                    tracing::info!("Event bus closed, stopping broadcaster");
                    break;
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use chrono::Utc;
    use tokio::time::timeout;
    use vitalstream_core::alert::{AlertEvent, AlertSeverity};
    use vitalstream_core::vitals::VitalType;
    use vitalstream_events::{EventBus, LocalSubscriptionRegistry};

    use super::*;

    fn alert_for(patient_id: &str) -> PatientEvent {
        PatientEvent::Alert(AlertEvent {
            patient_id: patient_id.to_string(),
            vital_type: VitalType::HeartRate,
            severity: AlertSeverity::Critical,
            message: "critical heartRate reading: 150 bpm".into(),
            timestamp: Utc::now(),
            triggering_record_id: 1,
        })
    }

    #[tokio::test]
    async fn routes_bus_events_to_subscribed_observers() {
        let bus = Arc::new(EventBus::default());
        let registry: Arc<dyn SubscriptionRegistry> =
            Arc::new(LocalSubscriptionRegistry::default());
        let cancel = CancellationToken::new();

        let mut rx = registry.register_observer("obs-1").await;
        registry.subscribe("obs-1", "patient-42").await;

        let task = tokio::spawn(run(bus.subscribe(), registry.clone(), cancel.clone()));

        bus.publish(alert_for("patient-42"));
        bus.publish(alert_for("other-patient"));

        let received = timeout(Duration::from_secs(1), rx.recv())
            .await
            .expect("delivery within timeout")
            .expect("queue open");
        assert_eq!(received.patient_id(), "patient-42");

        // The event for the other patient is not delivered to this observer.
        assert!(rx.try_recv().is_err());

        cancel.cancel();
        timeout(Duration::from_secs(1), task)
            .await
            .expect("broadcaster stops on cancel")
            .unwrap();
    }

    #[tokio::test]
    async fn stops_when_the_bus_is_dropped() {
        let bus = EventBus::default();
        let registry: Arc<dyn SubscriptionRegistry> =
            Arc::new(LocalSubscriptionRegistry::default());

        let task = tokio::spawn(run(bus.subscribe(), registry, CancellationToken::new()));
        drop(bus);

        timeout(Duration::from_secs(1), task)
            .await
            .expect("broadcaster stops when the bus closes")
            .unwrap();
    }
}
