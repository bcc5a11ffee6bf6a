//! Handlers for threshold configuration endpoints.
//!
//! Updates are validated (known vital type, critical band enclosing the
//! normal band) before they reach the database, and take effect on the
//! next ingested message without a restart.

use std::collections::BTreeMap;

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use vitalstream_core::thresholds::ThresholdRange;
use vitalstream_core::vitals::VitalType;
use vitalstream_db::models::threshold::{ThresholdRow, UpsertThresholdRow};
use vitalstream_db::repositories::ThresholdRepo;
use vitalstream_ingest::pipeline::resolve_table;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// One threshold update in a PUT body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThresholdUpdate {
    #[serde(rename = "type")]
    pub vital_type: String,
    pub normal_min: f64,
    pub normal_max: f64,
    pub critical_min: f64,
    pub critical_max: f64,
}

impl ThresholdUpdate {
    /// Validate the update and convert it into an upsert row for a scope.
    fn into_row(self, patient_id: Option<String>) -> Result<UpsertThresholdRow, AppError> {
        let vital_type = self.vital_type.parse::<VitalType>().map_err(AppError::Core)?;

        let range = ThresholdRange {
            normal_min: self.normal_min,
            normal_max: self.normal_max,
            critical_min: self.critical_min,
            critical_max: self.critical_max,
        };
        if !range.is_valid() {
            return Err(AppError::BadRequest(format!(
                "Invalid threshold range for {vital_type}: the critical band must enclose the normal band"
            )));
        }

        Ok(UpsertThresholdRow {
            patient_id,
            vital_type: vital_type.as_str().to_string(),
            normal_min: range.normal_min,
            normal_max: range.normal_max,
            critical_min: range.critical_min,
            critical_max: range.critical_max,
        })
    }
}

/// Validate all updates up front, then upsert. Nothing is written when
/// any entry fails validation.
async fn apply_updates(
    state: &AppState,
    patient_id: Option<String>,
    updates: Vec<ThresholdUpdate>,
) -> AppResult<Vec<ThresholdRow>> {
    if updates.is_empty() {
        return Err(AppError::BadRequest("No threshold updates supplied".into()));
    }

    let rows: Vec<UpsertThresholdRow> = updates
        .into_iter()
        .map(|u| u.into_row(patient_id.clone()))
        .collect::<Result<_, _>>()?;

    let mut stored = Vec::with_capacity(rows.len());
    for row in &rows {
        stored.push(ThresholdRepo::upsert(&state.pool, row).await?);
    }
    Ok(stored)
}

/// GET /thresholds
///
/// All configured rows, global and per-patient.
pub async fn list_thresholds(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<ThresholdRow>>>> {
    let rows = ThresholdRepo::list_all(&state.pool).await?;
    Ok(Json(DataResponse { data: rows }))
}

/// GET /patients/{id}/thresholds
///
/// The effective table for one patient: per-patient overrides beat global
/// rows beat built-in defaults. Keyed by vital type.
pub async fn get_patient_thresholds(
    State(state): State<AppState>,
    Path(patient_id): Path<String>,
) -> AppResult<Json<DataResponse<BTreeMap<&'static str, ThresholdRange>>>> {
    let rows = ThresholdRepo::get_for_patient(&state.pool, &patient_id).await?;
    let table = resolve_table(&rows);

    let effective: BTreeMap<&'static str, ThresholdRange> = table
        .iter()
        .map(|(vital_type, range)| (vital_type.as_str(), *range))
        .collect();

    Ok(Json(DataResponse { data: effective }))
}

/// PUT /thresholds/global
///
/// Upsert global threshold rows (scope: all patients without an override).
pub async fn update_global_thresholds(
    State(state): State<AppState>,
    Json(updates): Json<Vec<ThresholdUpdate>>,
) -> AppResult<Json<DataResponse<Vec<ThresholdRow>>>> {
    let rows = apply_updates(&state, None, updates).await?;
    tracing::info!(count = rows.len(), "Updated global thresholds");
    Ok(Json(DataResponse { data: rows }))
}

/// PUT /patients/{id}/thresholds
///
/// Upsert per-patient override rows.
pub async fn update_patient_thresholds(
    State(state): State<AppState>,
    Path(patient_id): Path<String>,
    Json(updates): Json<Vec<ThresholdUpdate>>,
) -> AppResult<Json<DataResponse<Vec<ThresholdRow>>>> {
    let rows = apply_updates(&state, Some(patient_id.clone()), updates).await?;
    tracing::info!(
        patient_id = %patient_id,
        count = rows.len(),
        "Updated patient thresholds"
    );
    Ok(Json(DataResponse { data: rows }))
}
