//! Route definitions for device registry lookups.

use axum::routing::get;
use axum::Router;

use crate::handlers::devices;
use crate::state::AppState;

/// Routes mounted at `/devices`.
///
/// ```text
/// GET /{id} -> get_device
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{id}", get(devices::get_device))
}
