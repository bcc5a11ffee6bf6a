//! Handlers for vital-sign query endpoints.
//!
//! All reads go through `VitalSignRepo`; classification happened at ingest
//! time, so these handlers only shape and filter stored records.

use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::{Duration, Utc};
use vitalstream_core::trend::{self, TrendResult, TrendSample};
use vitalstream_core::vitals::VitalType;
use vitalstream_db::models::vital_sign::VitalSignRecord;
use vitalstream_db::repositories::VitalSignRepo;

use crate::error::{AppError, AppResult};
use crate::query::{CriticalParams, CriticalWindowParams, TrendParams, VitalHistoryParams};
use crate::response::DataResponse;
use crate::state::AppState;

/// Default trend window in days.
const DEFAULT_TREND_DAYS: i64 = 7;
/// Largest accepted trend window.
const MAX_TREND_DAYS: i64 = 90;

/// Default lookback for critical readings, in hours.
const DEFAULT_CRITICAL_HOURS: i64 = 24;
/// Largest accepted critical lookback (one week).
const MAX_CRITICAL_HOURS: i64 = 168;

fn parse_vital_type(s: &str) -> Result<VitalType, AppError> {
    s.parse::<VitalType>().map_err(AppError::Core)
}

/// GET /patients/{id}/vitals
///
/// With `start` and `end` present, returns a chronological time-range
/// query (requires `type`); otherwise returns the most recent readings,
/// newest first.
pub async fn list_patient_vitals(
    State(state): State<AppState>,
    Path(patient_id): Path<String>,
    Query(params): Query<VitalHistoryParams>,
) -> AppResult<Json<DataResponse<Vec<VitalSignRecord>>>> {
    let vital_type = params
        .vital_type
        .as_deref()
        .map(parse_vital_type)
        .transpose()?;

    let records = match (params.start, params.end) {
        (Some(start), Some(end)) => {
            let vital_type = vital_type.ok_or_else(|| {
                AppError::BadRequest("type is required when querying a time range".into())
            })?;
            if end < start {
                return Err(AppError::BadRequest("end must not precede start".into()));
            }
            VitalSignRepo::find_range(&state.pool, &patient_id, vital_type, start, end).await?
        }
        (None, None) => {
            VitalSignRepo::find_by_patient(
                &state.pool,
                &patient_id,
                vital_type,
                params.device.as_deref(),
                params.limit,
                params.offset,
            )
            .await?
        }
        _ => {
            return Err(AppError::BadRequest(
                "start and end must be supplied together".into(),
            ))
        }
    };

    Ok(Json(DataResponse { data: records }))
}

/// GET /patients/{id}/vitals/latest
///
/// The most recent reading per vital type for one patient.
pub async fn latest_patient_vitals(
    State(state): State<AppState>,
    Path(patient_id): Path<String>,
) -> AppResult<Json<DataResponse<Vec<VitalSignRecord>>>> {
    let records = VitalSignRepo::find_latest_per_type(&state.pool, &patient_id).await?;
    Ok(Json(DataResponse { data: records }))
}

/// GET /patients/{id}/vitals/trend?type=heartRate&days=7
///
/// Windowed statistics and direction for one vital type. `data` is null
/// when fewer than 2 readings fall inside the window.
pub async fn patient_vital_trend(
    State(state): State<AppState>,
    Path(patient_id): Path<String>,
    Query(params): Query<TrendParams>,
) -> AppResult<Json<DataResponse<Option<TrendResult>>>> {
    let vital_type = parse_vital_type(&params.vital_type)?;

    let days = params.days.unwrap_or(DEFAULT_TREND_DAYS);
    if !(1..=MAX_TREND_DAYS).contains(&days) {
        return Err(AppError::BadRequest(format!(
            "days must be between 1 and {MAX_TREND_DAYS}"
        )));
    }

    let end = Utc::now();
    let start = end - Duration::days(days);

    let records =
        VitalSignRepo::find_range(&state.pool, &patient_id, vital_type, start, end).await?;
    let samples: Vec<TrendSample> = records
        .iter()
        .map(|r| TrendSample {
            value: r.value.classification_value(),
            recorded_at: r.recorded_at,
        })
        .collect();

    Ok(Json(DataResponse {
        data: trend::analyze(&samples),
    }))
}

/// Validate a lookback and turn it into the window cutoff.
fn critical_since(hours: Option<i64>) -> Result<chrono::DateTime<Utc>, AppError> {
    let hours = hours.unwrap_or(DEFAULT_CRITICAL_HOURS);
    if !(1..=MAX_CRITICAL_HOURS).contains(&hours) {
        return Err(AppError::BadRequest(format!(
            "hours must be between 1 and {MAX_CRITICAL_HOURS}"
        )));
    }
    Ok(Utc::now() - Duration::hours(hours))
}

/// GET /vitals/critical?patient_id=&hours=24
///
/// Critical readings across all patients (or one) within a lookback
/// window, newest first.
pub async fn list_critical_vitals(
    State(state): State<AppState>,
    Query(params): Query<CriticalParams>,
) -> AppResult<Json<DataResponse<Vec<VitalSignRecord>>>> {
    let since = critical_since(params.hours)?;
    let records =
        VitalSignRepo::find_critical(&state.pool, params.patient_id.as_deref(), since).await?;

    Ok(Json(DataResponse { data: records }))
}

/// GET /patients/{id}/alerts/critical?hours=24
///
/// One patient's critical readings within a lookback window.
pub async fn patient_critical_vitals(
    State(state): State<AppState>,
    Path(patient_id): Path<String>,
    Query(params): Query<CriticalWindowParams>,
) -> AppResult<Json<DataResponse<Vec<VitalSignRecord>>>> {
    let since = critical_since(params.hours)?;
    let records = VitalSignRepo::find_critical(&state.pool, Some(&patient_id), since).await?;

    Ok(Json(DataResponse { data: records }))
}
