//! Vital sign entity model and insert DTO.

use serde::Serialize;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, Row};
use vitalstream_core::alert::AlertSeverity;
use vitalstream_core::types::{DbId, Timestamp};
use vitalstream_core::vitals::{VitalStatus, VitalType, VitalValue};

/// A stored, classified vital sign reading.
///
/// Immutable once created; downstream consumers reference it but never
/// mutate it. The `value` is reconstructed from the scalar or
/// systolic/diastolic columns into the tagged wire variant.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VitalSignRecord {
    pub id: DbId,
    pub patient_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
    #[serde(rename = "type")]
    pub vital_type: VitalType,
    pub value: VitalValue,
    pub unit: String,
    #[serde(rename = "timestamp")]
    pub recorded_at: Timestamp,
    pub status: VitalStatus,
    pub alert_triggered: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert_level: Option<AlertSeverity>,
    #[serde(skip)]
    pub created_at: Timestamp,
}

fn decode_err(
    column: &str,
    source: impl std::error::Error + Send + Sync + 'static,
) -> sqlx::Error {
    sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(source),
    }
}

impl<'r> FromRow<'r, PgRow> for VitalSignRecord {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        let vital_type: VitalType = row
            .try_get::<String, _>("vital_type")?
            .parse()
            .map_err(|e| decode_err("vital_type", e))?;
        let status: VitalStatus = row
            .try_get::<String, _>("status")?
            .parse()
            .map_err(|e| decode_err("status", e))?;
        let alert_level = row
            .try_get::<Option<String>, _>("alert_level")?
            .map(|s| match s.as_str() {
                "warning" => Ok(AlertSeverity::Warning),
                "critical" => Ok(AlertSeverity::Critical),
                other => Err(decode_err(
                    "alert_level",
                    std::io::Error::new(
                        std::io::ErrorKind::InvalidData,
                        format!("unknown alert level: {other}"),
                    ),
                )),
            })
            .transpose()?;

        let value_scalar: Option<f64> = row.try_get("value_scalar")?;
        let systolic: Option<f64> = row.try_get("systolic")?;
        let diastolic: Option<f64> = row.try_get("diastolic")?;
        let value = match (value_scalar, systolic, diastolic) {
            (Some(v), _, _) => VitalValue::Scalar(v),
            (None, Some(systolic), Some(diastolic)) => VitalValue::BloodPressure {
                systolic,
                diastolic,
            },
            _ => {
                return Err(decode_err(
                    "value_scalar",
                    std::io::Error::new(
                        std::io::ErrorKind::InvalidData,
                        "row has neither a scalar nor a composite value",
                    ),
                ))
            }
        };

        Ok(VitalSignRecord {
            id: row.try_get("id")?,
            patient_id: row.try_get("patient_id")?,
            device_id: row.try_get("device_id")?,
            vital_type,
            value,
            unit: row.try_get("unit")?,
            recorded_at: row.try_get("recorded_at")?,
            status,
            alert_triggered: row.try_get("alert_triggered")?,
            alert_level,
            created_at: row.try_get("created_at")?,
        })
    }
}

/// DTO for appending a new reading.
///
/// Carries no idempotency key: appending the same telemetry twice stores
/// two distinct rows (at-least-once ingestion, no dedup).
#[derive(Debug, Clone)]
pub struct CreateVitalSign {
    pub patient_id: String,
    pub device_id: Option<String>,
    pub vital_type: VitalType,
    pub value: VitalValue,
    pub unit: String,
    pub recorded_at: Timestamp,
    pub status: VitalStatus,
    pub alert_triggered: bool,
    pub alert_level: Option<AlertSeverity>,
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    #[test]
    fn record_serializes_to_wire_shape() {
        let record = VitalSignRecord {
            id: 7,
            patient_id: "patient-42".into(),
            device_id: Some("dev-1".into()),
            vital_type: VitalType::HeartRate,
            value: VitalValue::Scalar(150.0),
            unit: "bpm".into(),
            recorded_at: Utc::now(),
            status: VitalStatus::Critical,
            alert_triggered: true,
            alert_level: Some(AlertSeverity::Critical),
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["patientId"], "patient-42");
        assert_eq!(json["type"], "heartRate");
        assert_eq!(json["value"], 150.0);
        assert_eq!(json["status"], "critical");
        assert_eq!(json["alertTriggered"], true);
        assert_eq!(json["alertLevel"], "critical");
        assert!(json.get("createdAt").is_none());
    }

    #[test]
    fn blood_pressure_record_serializes_composite_value() {
        let record = VitalSignRecord {
            id: 8,
            patient_id: "p1".into(),
            device_id: None,
            vital_type: VitalType::BloodPressure,
            value: VitalValue::BloodPressure {
                systolic: 120.0,
                diastolic: 80.0,
            },
            unit: "mmHg".into(),
            recorded_at: Utc::now(),
            status: VitalStatus::Normal,
            alert_triggered: false,
            alert_level: None,
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["value"]["systolic"], 120.0);
        assert_eq!(json["value"]["diastolic"], 80.0);
        assert!(json.get("deviceId").is_none());
        assert!(json.get("alertLevel").is_none());
    }
}
