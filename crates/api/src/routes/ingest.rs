//! Route definitions for ingestion pipeline statistics.

use axum::routing::get;
use axum::Router;

use crate::handlers::ingest;
use crate::state::AppState;

/// Routes mounted at `/ingest`.
///
/// ```text
/// GET /stats -> get_ingest_stats
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/stats", get(ingest::get_ingest_stats))
}
