//! Telemetry broker WebSocket consumer.
//!
//! Connects to the broker, reconnects with exponential backoff on failure,
//! and forwards parsed frames into the bounded processing buffer. When the
//! buffer is saturated the frame is logged and dropped rather than
//! blocking the transport connection. Messages sent during an outage are
//! not replayed.

use std::sync::Arc;
use std::time::Duration;

use futures::StreamExt;
use serde::Deserialize;
use tokio::sync::mpsc;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tokio_util::sync::CancellationToken;

use crate::metrics::IngestCounters;

/// Initial reconnection delay after a WebSocket failure.
const INITIAL_BACKOFF: Duration = Duration::from_secs(1);

/// Upper bound for the reconnection delay.
const MAX_BACKOFF: Duration = Duration::from_secs(60);

/// A framed message from the broker.
#[derive(Debug, Clone, Deserialize)]
pub struct TransportFrame {
    /// Channel the message arrived on, e.g. `telemetry/dev-1`.
    pub topic: String,
    /// The message body, parsed further by the pipeline.
    pub payload: serde_json::Value,
}

/// The channel family a topic belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelKind {
    /// `telemetry/{deviceId}` -- vital sign payloads.
    Telemetry,
    /// `device-status/{deviceId}` -- connectivity/battery updates.
    DeviceStatus,
}

impl ChannelKind {
    /// Split a topic into its channel kind and device id.
    pub fn parse(topic: &str) -> Option<(ChannelKind, &str)> {
        if let Some(device_id) = topic.strip_prefix("telemetry/") {
            (!device_id.is_empty()).then_some((ChannelKind::Telemetry, device_id))
        } else if let Some(device_id) = topic.strip_prefix("device-status/") {
            (!device_id.is_empty()).then_some((ChannelKind::DeviceStatus, device_id))
        } else {
            None
        }
    }
}

/// Consumes the broker WebSocket and feeds the processing buffer.
pub struct TransportClient {
    url: String,
    counters: Arc<IngestCounters>,
}

impl TransportClient {
    pub fn new(url: impl Into<String>, counters: Arc<IngestCounters>) -> Self {
        Self {
            url: url.into(),
            counters,
        }
    }

    /// Run the consumer loop until cancelled.
    ///
    /// Reconnects with exponential backoff (1s doubling, capped at 60s);
    /// the delay resets after any successful session.
    pub async fn run(self, tx: mpsc::Sender<TransportFrame>, cancel: CancellationToken) {
        let mut backoff = INITIAL_BACKOFF;

        loop {
            if cancel.is_cancelled() {
                break;
            }

            tracing::info!(url = %self.url, "Connecting to telemetry transport");
            match connect_async(&self.url).await {
                Ok((ws_stream, _response)) => {
                    tracing::info!("Telemetry transport connected");
                    backoff = INITIAL_BACKOFF;
                    self.run_session(ws_stream, &tx, &cancel).await;
                    if cancel.is_cancelled() {
                        break;
                    }
                    tracing::warn!("Telemetry transport session ended, reconnecting");
                }
                Err(e) => {
                    tracing::error!(error = %e, "Telemetry transport connection failed");
                }
            }

            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = tokio::time::sleep(backoff) => {}
            }
            backoff = (backoff * 2).min(MAX_BACKOFF);
        }

        tracing::info!("Telemetry transport consumer stopped");
    }

    /// Drive a single session: read frames until the stream ends or the
    /// token is cancelled.
    async fn run_session(
        &self,
        mut ws_stream: tokio_tungstenite::WebSocketStream<
            tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>,
        >,
        tx: &mpsc::Sender<TransportFrame>,
        cancel: &CancellationToken,
    ) {
        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                msg = ws_stream.next() => {
                    match msg {
                        Some(Ok(Message::Text(text))) => {
                            self.handle_text_frame(&text, tx);
                        }
                        Some(Ok(Message::Ping(_) | Message::Pong(_))) => {
                            // Handled automatically by tungstenite.
                        }
                        Some(Ok(Message::Close(frame))) => {
                            tracing::info!(?frame, "Transport closed the connection");
                            break;
                        }
                        Some(Ok(_)) => {
                            // Binary / Frame -- ignore.
                        }
                        Some(Err(e)) => {
                            tracing::error!(error = %e, "Transport receive error");
                            break;
                        }
                        None => {
                            tracing::info!("Transport stream exhausted");
                            break;
                        }
                    }
                }
            }
        }
    }

    /// Parse one text frame and enqueue it.
    ///
    /// Each frame is handled independently: a malformed frame is counted
    /// and dropped without affecting the session.
    fn handle_text_frame(&self, text: &str, tx: &mpsc::Sender<TransportFrame>) {
        self.counters.incr_received();

        let frame: TransportFrame = match serde_json::from_str(text) {
            Ok(frame) => frame,
            Err(e) => {
                tracing::warn!(error = %e, "Dropping malformed transport frame");
                self.counters.incr_parse_errors();
                return;
            }
        };

        match tx.try_send(frame) {
            Ok(()) => {}
            Err(mpsc::error::TrySendError::Full(frame)) => {
                // Bounded-buffer policy: log and drop instead of growing
                // memory or blocking the transport.
                tracing::warn!(topic = %frame.topic, "Processing buffer full, dropping frame");
                self.counters.incr_dropped_buffer_full();
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                tracing::error!("Processing buffer closed, frame lost");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn telemetry_topic_parses() {
        assert_eq!(
            ChannelKind::parse("telemetry/dev-1"),
            Some((ChannelKind::Telemetry, "dev-1"))
        );
    }

    #[test]
    fn device_status_topic_parses() {
        assert_eq!(
            ChannelKind::parse("device-status/dev-9"),
            Some((ChannelKind::DeviceStatus, "dev-9"))
        );
    }

    #[test]
    fn unknown_or_empty_topics_are_rejected() {
        assert_eq!(ChannelKind::parse("metrics/dev-1"), None);
        assert_eq!(ChannelKind::parse("telemetry/"), None);
        assert_eq!(ChannelKind::parse(""), None);
    }

    #[tokio::test]
    async fn malformed_frame_is_counted_and_dropped() {
        let counters = Arc::new(IngestCounters::new());
        let client = TransportClient::new("ws://unused", Arc::clone(&counters));
        let (tx, mut rx) = mpsc::channel(4);

        client.handle_text_frame("{not json", &tx);

        let stats = counters.snapshot();
        assert_eq!(stats.received, 1);
        assert_eq!(stats.parse_errors, 1);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn full_buffer_drops_frame_and_counts() {
        let counters = Arc::new(IngestCounters::new());
        let client = TransportClient::new("ws://unused", Arc::clone(&counters));
        let (tx, mut rx) = mpsc::channel(1);

        let frame = r#"{"topic": "telemetry/dev-1", "payload": {}}"#;
        client.handle_text_frame(frame, &tx);
        client.handle_text_frame(frame, &tx);

        let stats = counters.snapshot();
        assert_eq!(stats.received, 2);
        assert_eq!(stats.dropped_buffer_full, 1);
        assert!(rx.try_recv().is_ok());
        assert!(rx.try_recv().is_err());
    }
}
