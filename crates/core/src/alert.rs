//! Alert events derived from abnormal readings.

use serde::{Deserialize, Serialize};

use crate::types::{DbId, Timestamp};
use crate::vitals::{VitalStatus, VitalType, VitalValue};

/// Severity of an alert, mirroring the non-normal status tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Warning,
    Critical,
}

impl AlertSeverity {
    /// Lowercase name, as stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertSeverity::Warning => "warning",
            AlertSeverity::Critical => "critical",
        }
    }

    /// The severity corresponding to a status tier, if abnormal.
    pub fn from_status(status: VitalStatus) -> Option<Self> {
        match status {
            VitalStatus::Normal => None,
            VitalStatus::Warning => Some(AlertSeverity::Warning),
            VitalStatus::Critical => Some(AlertSeverity::Critical),
        }
    }
}

/// An alert raised for a single abnormal reading.
///
/// Created alongside its triggering record and delivered to subscribed
/// observers; it has no lifecycle beyond delivery.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertEvent {
    pub patient_id: String,
    pub vital_type: VitalType,
    pub severity: AlertSeverity,
    pub message: String,
    pub timestamp: Timestamp,
    pub triggering_record_id: DbId,
}

impl AlertEvent {
    /// Build an alert from a classified reading, or `None` when the
    /// reading is normal.
    ///
    /// Every abnormal reading produces a fresh alert. There is no
    /// deduplication, rate limiting, or hysteresis: two consecutive
    /// abnormal readings produce two alerts.
    pub fn from_reading(
        record_id: DbId,
        patient_id: &str,
        vital_type: VitalType,
        value: &VitalValue,
        unit: &str,
        status: VitalStatus,
        recorded_at: Timestamp,
    ) -> Option<Self> {
        let severity = AlertSeverity::from_status(status)?;
        let message = match value {
            VitalValue::Scalar(v) => {
                format!("{} {vital_type} reading: {v} {unit}", severity.as_str())
            }
            VitalValue::BloodPressure {
                systolic,
                diastolic,
            } => format!(
                "{} {vital_type} reading: {systolic}/{diastolic} {unit}",
                severity.as_str()
            ),
        };
        Some(AlertEvent {
            patient_id: patient_id.to_string(),
            vital_type,
            severity,
            message,
            timestamp: recorded_at,
            triggering_record_id: record_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::thresholds::{classify, ThresholdTable};

    fn classify_and_alert(value: f64) -> (VitalStatus, Option<AlertEvent>) {
        let table = ThresholdTable::default();
        let value = VitalValue::Scalar(value);
        let status = classify(VitalType::HeartRate, &value, &table);
        let alert = AlertEvent::from_reading(
            1,
            "patient-42",
            VitalType::HeartRate,
            &value,
            "bpm",
            status,
            Utc::now(),
        );
        (status, alert)
    }

    #[test]
    fn critical_heart_rate_produces_critical_alert() {
        let (status, alert) = classify_and_alert(150.0);
        assert_eq!(status, VitalStatus::Critical);
        let alert = alert.expect("abnormal reading must alert");
        assert_eq!(alert.severity, AlertSeverity::Critical);
        assert_eq!(alert.patient_id, "patient-42");
        assert_eq!(alert.triggering_record_id, 1);
    }

    #[test]
    fn normal_heart_rate_produces_no_alert() {
        let (status, alert) = classify_and_alert(75.0);
        assert_eq!(status, VitalStatus::Normal);
        assert!(alert.is_none());
    }

    #[test]
    fn warning_reading_produces_warning_alert() {
        let (status, alert) = classify_and_alert(110.0);
        assert_eq!(status, VitalStatus::Warning);
        assert_eq!(alert.unwrap().severity, AlertSeverity::Warning);
    }

    #[test]
    fn repeated_abnormal_readings_each_alert() {
        // No hysteresis: consecutive abnormal readings alert every time.
        let (_, first) = classify_and_alert(150.0);
        let (_, second) = classify_and_alert(150.0);
        assert!(first.is_some());
        assert!(second.is_some());
    }

    #[test]
    fn blood_pressure_alert_message_includes_both_components() {
        let alert = AlertEvent::from_reading(
            7,
            "p1",
            VitalType::BloodPressure,
            &VitalValue::BloodPressure {
                systolic: 190.0,
                diastolic: 110.0,
            },
            "mmHg",
            VitalStatus::Critical,
            Utc::now(),
        )
        .unwrap();
        assert!(alert.message.contains("190/110"));
    }
}
