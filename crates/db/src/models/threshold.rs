//! Threshold configuration models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vitalstream_core::types::{DbId, Timestamp};

/// A configured threshold row: global when `patient_id` is `NULL`, a
/// per-patient override otherwise.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThresholdRow {
    pub id: DbId,
    pub patient_id: Option<String>,
    pub vital_type: String,
    pub normal_min: f64,
    pub normal_max: f64,
    pub critical_min: f64,
    pub critical_max: f64,
    pub is_enabled: bool,
    #[serde(skip)]
    pub created_at: Timestamp,
    #[serde(skip)]
    pub updated_at: Timestamp,
}

/// DTO for upserting a threshold row.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertThresholdRow {
    pub patient_id: Option<String>,
    pub vital_type: String,
    pub normal_min: f64,
    pub normal_max: f64,
    pub critical_min: f64,
    pub critical_max: f64,
}
