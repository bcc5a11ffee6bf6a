//! Handler for ingestion pipeline statistics.

use axum::extract::State;
use axum::Json;
use vitalstream_ingest::IngestStats;

use crate::response::DataResponse;
use crate::state::AppState;

/// GET /ingest/stats
///
/// A point-in-time snapshot of the pipeline counters. Counters are
/// process-local and reset on restart.
pub async fn get_ingest_stats(State(state): State<AppState>) -> Json<DataResponse<IngestStats>> {
    Json(DataResponse {
        data: state.ingest_counters.snapshot(),
    })
}
