//! Raw telemetry validation and coercion into the canonical observation
//! shape.
//!
//! Values are passed through in the unit supplied by the device; no unit
//! conversion is performed.

use serde::Deserialize;

use crate::error::CoreError;
use crate::types::Timestamp;
use crate::vitals::{VitalType, VitalValue};

/// A telemetry payload as it arrives from a device, before validation.
///
/// All fields are optional so that a missing field is a validation
/// failure rather than a deserialization failure.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTelemetry {
    pub device_id: Option<String>,
    pub patient_id: Option<String>,
    #[serde(rename = "type")]
    pub vital_type: Option<String>,
    pub value: Option<VitalValue>,
    pub unit: Option<String>,
    pub timestamp: Option<Timestamp>,
}

/// A validated observation, ready for classification and storage.
#[derive(Debug, Clone)]
pub struct VitalObservation {
    pub patient_id: String,
    pub device_id: Option<String>,
    pub vital_type: VitalType,
    pub value: VitalValue,
    pub unit: String,
    pub recorded_at: Timestamp,
}

/// Validate a raw payload and coerce it into a [`VitalObservation`].
///
/// Required fields: `patientId`, `type`, `value`, `unit`. The timestamp
/// defaults to `ingested_at` when absent. An unknown `type` fails
/// validation.
pub fn normalize(
    raw: RawTelemetry,
    ingested_at: Timestamp,
) -> Result<VitalObservation, CoreError> {
    let patient_id = require(raw.patient_id, "patientId")?;
    let vital_type: VitalType = require(raw.vital_type, "type")?.parse()?;
    let value = require(raw.value, "value")?;
    let unit = require(raw.unit, "unit")?;

    Ok(VitalObservation {
        patient_id,
        device_id: raw.device_id,
        vital_type,
        value,
        unit,
        recorded_at: raw.timestamp.unwrap_or(ingested_at),
    })
}

fn require<T>(field: Option<T>, name: &str) -> Result<T, CoreError> {
    field.ok_or_else(|| CoreError::Validation(format!("Missing required field: {name}")))
}
