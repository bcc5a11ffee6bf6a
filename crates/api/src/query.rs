//! Shared query parameter types for API handlers.
//!
//! Common query structs that appear across multiple handler modules are
//! extracted here to avoid duplication.

use serde::Deserialize;
use vitalstream_core::types::Timestamp;

/// Query parameters for vital-sign history listings
/// (`?type=&start=&end=&limit=`).
///
/// When both `start` and `end` are present the handler queries a time range
/// (oldest first); otherwise it returns the most recent readings (newest
/// first). `limit` is clamped in the repository layer.
#[derive(Debug, Deserialize)]
pub struct VitalHistoryParams {
    #[serde(rename = "type")]
    pub vital_type: Option<String>,
    pub device: Option<String>,
    pub start: Option<Timestamp>,
    pub end: Option<Timestamp>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Query parameters for trend analysis (`?type=&days=`).
///
/// `type` is required. `days` defaults to 7 and is validated to 1..=90.
#[derive(Debug, Deserialize)]
pub struct TrendParams {
    #[serde(rename = "type")]
    pub vital_type: String,
    pub days: Option<i64>,
}

/// Query parameters for critical-reading listings
/// (`?patient_id=&hours=`).
///
/// `hours` defaults to 24 and is validated to 1..=168.
#[derive(Debug, Deserialize)]
pub struct CriticalParams {
    pub patient_id: Option<String>,
    pub hours: Option<i64>,
}

/// Lookback window for patient-scoped critical listings (`?hours=`).
#[derive(Debug, Deserialize)]
pub struct CriticalWindowParams {
    pub hours: Option<i64>,
}
