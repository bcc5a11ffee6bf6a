//! Route definitions for threshold configuration endpoints.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::thresholds;
use crate::state::AppState;

/// Routes mounted at `/thresholds`.
///
/// ```text
/// GET /        -> list_thresholds
/// PUT /global  -> update_global_thresholds
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(thresholds::list_thresholds))
        .route("/global", put(thresholds::update_global_thresholds))
}

/// Patient-scoped threshold routes, merged into the `/patients` router.
///
/// ```text
/// GET /{id}/thresholds -> get_patient_thresholds
/// PUT /{id}/thresholds -> update_patient_thresholds
/// ```
pub fn patient_router() -> Router<AppState> {
    Router::new().route(
        "/{id}/thresholds",
        get(thresholds::get_patient_thresholds).put(thresholds::update_patient_thresholds),
    )
}
