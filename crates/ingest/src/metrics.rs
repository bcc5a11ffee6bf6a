//! Atomic ingest counters.
//!
//! Per-message failures are logged and counted rather than propagated;
//! these counters are the observable surface of that policy. Shared via
//! `Arc<IngestCounters>` between the transport task, the pipeline, and
//! the stats endpoint.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Monotonic ingest counters.
#[derive(Debug, Default)]
pub struct IngestCounters {
    /// Frames received from the transport.
    received: AtomicU64,
    /// Readings stored successfully.
    stored: AtomicU64,
    /// Alerts generated.
    alerts: AtomicU64,
    /// Malformed frames/payloads dropped.
    parse_errors: AtomicU64,
    /// Well-formed payloads rejected by validation.
    validation_errors: AtomicU64,
    /// Messages dropped because persistence failed.
    db_errors: AtomicU64,
    /// Frames dropped because the processing buffer was full.
    dropped_buffer_full: AtomicU64,
    /// Device-status updates applied.
    device_updates: AtomicU64,
}

/// Point-in-time snapshot of the counters.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestStats {
    pub received: u64,
    pub stored: u64,
    pub alerts: u64,
    pub parse_errors: u64,
    pub validation_errors: u64,
    pub db_errors: u64,
    pub dropped_buffer_full: u64,
    pub device_updates: u64,
}

impl IngestCounters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn incr_received(&self) {
        self.received.fetch_add(1, Ordering::Relaxed);
    }

    pub fn incr_stored(&self) {
        self.stored.fetch_add(1, Ordering::Relaxed);
    }

    pub fn incr_alerts(&self) {
        self.alerts.fetch_add(1, Ordering::Relaxed);
    }

    pub fn incr_parse_errors(&self) {
        self.parse_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn incr_validation_errors(&self) {
        self.validation_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn incr_db_errors(&self) {
        self.db_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn incr_dropped_buffer_full(&self) {
        self.dropped_buffer_full.fetch_add(1, Ordering::Relaxed);
    }

    pub fn incr_device_updates(&self) {
        self.device_updates.fetch_add(1, Ordering::Relaxed);
    }

    /// Read all counters.
    pub fn snapshot(&self) -> IngestStats {
        IngestStats {
            received: self.received.load(Ordering::Relaxed),
            stored: self.stored.load(Ordering::Relaxed),
            alerts: self.alerts.load(Ordering::Relaxed),
            parse_errors: self.parse_errors.load(Ordering::Relaxed),
            validation_errors: self.validation_errors.load(Ordering::Relaxed),
            db_errors: self.db_errors.load(Ordering::Relaxed),
            dropped_buffer_full: self.dropped_buffer_full.load(Ordering::Relaxed),
            device_updates: self.device_updates.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_accumulate_independently() {
        let counters = IngestCounters::new();
        counters.incr_received();
        counters.incr_received();
        counters.incr_validation_errors();

        let stats = counters.snapshot();
        assert_eq!(stats.received, 2);
        assert_eq!(stats.validation_errors, 1);
        assert_eq!(stats.parse_errors, 0);
    }
}
