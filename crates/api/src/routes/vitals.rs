//! Route definitions for vital-sign query endpoints.

use axum::routing::get;
use axum::Router;

use crate::handlers::{devices, vitals};
use crate::state::AppState;

/// Patient-scoped routes mounted at `/patients`.
///
/// ```text
/// GET /{id}/vitals           -> list_patient_vitals
/// GET /{id}/vitals/latest    -> latest_patient_vitals
/// GET /{id}/vitals/trend     -> patient_vital_trend
/// GET /{id}/alerts/critical  -> patient_critical_vitals
/// GET /{id}/devices          -> list_patient_devices
/// ```
///
/// Threshold routes for patients live in [`super::thresholds`].
pub fn patient_router() -> Router<AppState> {
    Router::new()
        .route("/{id}/vitals", get(vitals::list_patient_vitals))
        .route("/{id}/vitals/latest", get(vitals::latest_patient_vitals))
        .route("/{id}/vitals/trend", get(vitals::patient_vital_trend))
        .route("/{id}/alerts/critical", get(vitals::patient_critical_vitals))
        .route("/{id}/devices", get(devices::list_patient_devices))
        .merge(super::thresholds::patient_router())
}

/// Cross-patient routes mounted at `/vitals`.
///
/// ```text
/// GET /critical -> list_critical_vitals
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/critical", get(vitals::list_critical_vitals))
}
