//! Vital sign types, measurement values, and status tiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// The kind of physiological measurement a record carries.
///
/// Wire and database representation is camelCase (`"heartRate"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VitalType {
    HeartRate,
    BloodPressure,
    OxygenSaturation,
    Temperature,
    RespiratoryRate,
    BloodGlucose,
}

impl VitalType {
    /// Every known vital type, in a stable order.
    pub const ALL: [VitalType; 6] = [
        VitalType::HeartRate,
        VitalType::BloodPressure,
        VitalType::OxygenSaturation,
        VitalType::Temperature,
        VitalType::RespiratoryRate,
        VitalType::BloodGlucose,
    ];

    /// Canonical camelCase name, as used on the wire and in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            VitalType::HeartRate => "heartRate",
            VitalType::BloodPressure => "bloodPressure",
            VitalType::OxygenSaturation => "oxygenSaturation",
            VitalType::Temperature => "temperature",
            VitalType::RespiratoryRate => "respiratoryRate",
            VitalType::BloodGlucose => "bloodGlucose",
        }
    }
}

impl fmt::Display for VitalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VitalType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "heartRate" => Ok(VitalType::HeartRate),
            "bloodPressure" => Ok(VitalType::BloodPressure),
            "oxygenSaturation" => Ok(VitalType::OxygenSaturation),
            "temperature" => Ok(VitalType::Temperature),
            "respiratoryRate" => Ok(VitalType::RespiratoryRate),
            "bloodGlucose" => Ok(VitalType::BloodGlucose),
            other => Err(CoreError::Validation(format!(
                "Unknown vital type: {other}"
            ))),
        }
    }
}

/// A measurement value: a plain scalar for most types, or a composite
/// systolic/diastolic pair for blood pressure.
///
/// Untagged on the wire: `72.5` or `{"systolic": 120, "diastolic": 80}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VitalValue {
    Scalar(f64),
    BloodPressure { systolic: f64, diastolic: f64 },
}

impl VitalValue {
    /// The component evaluated against thresholds.
    ///
    /// For blood pressure this is the systolic component; diastolic is
    /// stored but not independently classified.
    pub fn classification_value(&self) -> f64 {
        match self {
            VitalValue::Scalar(v) => *v,
            VitalValue::BloodPressure { systolic, .. } => *systolic,
        }
    }

    /// The diastolic component, when present.
    pub fn diastolic(&self) -> Option<f64> {
        match self {
            VitalValue::Scalar(_) => None,
            VitalValue::BloodPressure { diastolic, .. } => Some(*diastolic),
        }
    }
}

/// Threshold tier of a single reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VitalStatus {
    Normal,
    Warning,
    Critical,
}

impl VitalStatus {
    /// Lowercase name, as stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            VitalStatus::Normal => "normal",
            VitalStatus::Warning => "warning",
            VitalStatus::Critical => "critical",
        }
    }
}

impl fmt::Display for VitalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VitalStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "normal" => Ok(VitalStatus::Normal),
            "warning" => Ok(VitalStatus::Warning),
            "critical" => Ok(VitalStatus::Critical),
            other => Err(CoreError::Validation(format!("Unknown status: {other}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vital_type_round_trips_through_str() {
        for vt in VitalType::ALL {
            assert_eq!(vt.as_str().parse::<VitalType>().unwrap(), vt);
        }
    }

    #[test]
    fn unknown_vital_type_is_rejected() {
        assert!("pulseOx".parse::<VitalType>().is_err());
    }

    #[test]
    fn scalar_value_deserializes_from_number() {
        let v: VitalValue = serde_json::from_str("72.5").unwrap();
        assert_eq!(v, VitalValue::Scalar(72.5));
        assert_eq!(v.classification_value(), 72.5);
        assert!(v.diastolic().is_none());
    }

    #[test]
    fn blood_pressure_value_deserializes_from_object() {
        let v: VitalValue =
            serde_json::from_str(r#"{"systolic": 120, "diastolic": 80}"#).unwrap();
        assert_eq!(v.classification_value(), 120.0);
        assert_eq!(v.diastolic(), Some(80.0));
    }

    #[test]
    fn vital_value_serializes_untagged() {
        let scalar = serde_json::to_value(VitalValue::Scalar(98.0)).unwrap();
        assert_eq!(scalar, serde_json::json!(98.0));

        let bp = serde_json::to_value(VitalValue::BloodPressure {
            systolic: 130.0,
            diastolic: 85.0,
        })
        .unwrap();
        assert_eq!(bp, serde_json::json!({"systolic": 130.0, "diastolic": 85.0}));
    }
}
