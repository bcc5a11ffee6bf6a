//! Handlers for device registry lookups.

use axum::extract::{Path, State};
use axum::Json;
use vitalstream_core::error::CoreError;
use vitalstream_db::models::device::DeviceDescriptor;
use vitalstream_db::repositories::DeviceRepo;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /devices/{id}
pub async fn get_device(
    State(state): State<AppState>,
    Path(device_id): Path<String>,
) -> AppResult<Json<DataResponse<DeviceDescriptor>>> {
    let device = DeviceRepo::get(&state.pool, &device_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "device",
            id: device_id,
        })?;
    Ok(Json(DataResponse { data: device }))
}

/// GET /patients/{id}/devices
pub async fn list_patient_devices(
    State(state): State<AppState>,
    Path(patient_id): Path<String>,
) -> AppResult<Json<DataResponse<Vec<DeviceDescriptor>>>> {
    let devices = DeviceRepo::list_by_patient(&state.pool, &patient_id).await?;
    Ok(Json(DataResponse { data: devices }))
}
