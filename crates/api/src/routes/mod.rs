pub mod devices;
pub mod health;
pub mod ingest;
pub mod thresholds;
pub mod vitals;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;
use crate::ws;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /ws                               observer WebSocket
///
/// /patients/{id}/vitals             vital-sign history (GET)
/// /patients/{id}/vitals/latest      latest reading per type (GET)
/// /patients/{id}/vitals/trend       trend analysis (GET)
/// /patients/{id}/alerts/critical    recent critical readings (GET)
/// /patients/{id}/thresholds         effective thresholds (GET), override (PUT)
/// /patients/{id}/devices            devices assigned to patient (GET)
///
/// /vitals/critical                  recent critical readings (GET)
///
/// /thresholds                       all configured thresholds (GET)
/// /thresholds/global                update global thresholds (PUT)
///
/// /devices/{id}                     device descriptor (GET)
///
/// /ingest/stats                     pipeline counters (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Observer WebSocket endpoint.
        .route("/ws", get(ws::ws_handler))
        // Patient-scoped vital-sign queries.
        .nest("/patients", vitals::patient_router())
        // Cross-patient critical readings.
        .nest("/vitals", vitals::router())
        // Threshold configuration.
        .nest("/thresholds", thresholds::router())
        // Device registry lookups.
        .nest("/devices", devices::router())
        // Ingestion pipeline statistics.
        .nest("/ingest", ingest::router())
}
