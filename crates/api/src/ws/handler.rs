use std::sync::Arc;
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use serde::Deserialize;
use vitalstream_events::SubscriptionRegistry;

use crate::state::AppState;

/// Interval between keepalive pings on an observer connection.
const PING_INTERVAL: Duration = Duration::from_secs(30);

/// Inbound observer command.
///
/// ```json
/// {"action": "subscribe", "patientId": "patient-42"}
/// {"action": "unsubscribe", "patientId": "patient-42"}
/// ```
#[derive(Debug, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
enum ObserverCommand {
    Subscribe {
        #[serde(rename = "patientId")]
        patient_id: String,
    },
    Unsubscribe {
        #[serde(rename = "patientId")]
        patient_id: String,
    },
}

/// HTTP handler that upgrades the connection to WebSocket.
///
/// After the upgrade the observer is registered with the subscription
/// registry and managed by two tasks (sender + receiver).
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state.registry))
}

/// Manage a single observer connection after upgrade.
///
/// Splits the socket into a sink (outbound) and stream (inbound), then:
///   1. Registers the observer and takes its delivery queue receiver.
///   2. Spawns a sender task that serializes queued events to the sink
///      and pings on an interval.
///   3. Processes inbound subscribe/unsubscribe commands on the current
///      task.
///   4. Cleans up on disconnect.
async fn handle_socket(socket: WebSocket, registry: Arc<dyn SubscriptionRegistry>) {
    let observer_id = uuid::Uuid::new_v4().to_string();
    tracing::info!(observer_id = %observer_id, "Observer connected");

    let mut rx = registry.register_observer(&observer_id).await;

    let (mut sink, mut stream) = socket.split();

    // Sender task: serialize delivery-queue events to the sink.
    let sender_observer_id = observer_id.clone();
    let send_task = tokio::spawn(async move {
        let mut ping = tokio::time::interval(PING_INTERVAL);
        ping.tick().await; // first tick fires immediately

        loop {
            tokio::select! {
                event = rx.recv() => {
                    let Some(event) = event else { break };
                    let text = match serde_json::to_string(&event) {
                        Ok(text) => text,
                        Err(e) => {
                            tracing::error!(error = %e, "Failed to serialize event");
                            continue;
                        }
                    };
                    if sink.send(Message::Text(text.into())).await.is_err() {
                        tracing::debug!(observer_id = %sender_observer_id, "Observer sink closed");
                        break;
                    }
                }
                _ = ping.tick() => {
                    if sink.send(Message::Ping(Bytes::new())).await.is_err() {
                        break;
                    }
                }
            }
        }
    });

    // Receiver loop: process inbound commands.
    while let Some(result) = stream.next().await {
        match result {
            Ok(Message::Close(_)) => break,
            Ok(Message::Text(text)) => match serde_json::from_str::<ObserverCommand>(&text) {
                Ok(ObserverCommand::Subscribe { patient_id }) => {
                    registry.subscribe(&observer_id, &patient_id).await;
                }
                Ok(ObserverCommand::Unsubscribe { patient_id }) => {
                    registry.unsubscribe(&observer_id, &patient_id).await;
                }
                Err(e) => {
                    tracing::debug!(
                        observer_id = %observer_id,
                        error = %e,
                        "Ignoring malformed observer command"
                    );
                }
            },
            Ok(Message::Pong(_)) => {
                tracing::trace!(observer_id = %observer_id, "Pong received");
            }
            Ok(_) => {}
            Err(e) => {
                tracing::debug!(observer_id = %observer_id, error = %e, "Observer receive error");
                break;
            }
        }
    }

    // Clean up: drop all subscriptions and abort the sender task.
    registry.remove_observer(&observer_id).await;
    send_task.abort();
    tracing::info!(observer_id = %observer_id, "Observer disconnected");
}
