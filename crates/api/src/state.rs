use std::sync::Arc;

use vitalstream_events::SubscriptionRegistry;
use vitalstream_ingest::IngestCounters;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via
/// `State<AppState>`.
///
/// Cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: vitalstream_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Observer-to-patient subscription registry.
    ///
    /// Held behind the trait so a shared/distributed backend can replace
    /// the local map without touching handlers or the broadcaster.
    pub registry: Arc<dyn SubscriptionRegistry>,
    /// Centralized event bus fed by the ingestion pipeline.
    pub event_bus: Arc<vitalstream_events::EventBus>,
    /// Ingest drop/throughput counters.
    pub ingest_counters: Arc<IngestCounters>,
}
