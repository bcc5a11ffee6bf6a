//! Threshold table and the pure classification function.
//!
//! Pure logic -- no database access. The caller is responsible for fetching
//! any configured overrides and merging them into a [`ThresholdTable`]
//! before classifying.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::vitals::{VitalStatus, VitalType, VitalValue};

/// Classification range for a single vital type.
///
/// `normal_min..=normal_max` is the normal band; values outside
/// `critical_min..=critical_max` are critical; anything in between is a
/// warning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThresholdRange {
    pub normal_min: f64,
    pub normal_max: f64,
    pub critical_min: f64,
    pub critical_max: f64,
}

impl ThresholdRange {
    /// Check internal consistency: the critical band must enclose the
    /// normal band.
    pub fn is_valid(&self) -> bool {
        self.normal_min < self.normal_max
            && self.critical_min <= self.normal_min
            && self.normal_max <= self.critical_max
    }
}

/// Per-type threshold configuration used during classification.
///
/// Read-only while classifying; built once per message from the built-in
/// defaults plus any configured global and per-patient override rows.
#[derive(Debug, Clone)]
pub struct ThresholdTable {
    ranges: HashMap<VitalType, ThresholdRange>,
}

impl ThresholdTable {
    /// Build an empty table (no type classifies as anything but normal
    /// until ranges are set).
    pub fn empty() -> Self {
        Self {
            ranges: HashMap::new(),
        }
    }

    /// Set or replace the range for a vital type.
    pub fn set(&mut self, vital_type: VitalType, range: ThresholdRange) {
        self.ranges.insert(vital_type, range);
    }

    /// Look up the range for a vital type.
    pub fn get(&self, vital_type: VitalType) -> Option<&ThresholdRange> {
        self.ranges.get(&vital_type)
    }

    /// Iterate the configured (type, range) pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (VitalType, &ThresholdRange)> + '_ {
        self.ranges.iter().map(|(t, r)| (*t, r))
    }
}

impl Default for ThresholdTable {
    /// Built-in clinical defaults.
    ///
    /// These mirror the normal ranges used by the upstream risk analysis
    /// service, widened to critical bounds at the points where escalation
    /// is clinically expected.
    fn default() -> Self {
        let mut table = Self::empty();
        table.set(
            VitalType::HeartRate,
            ThresholdRange {
                normal_min: 60.0,
                normal_max: 100.0,
                critical_min: 40.0,
                critical_max: 120.0,
            },
        );
        // Blood pressure thresholds apply to the systolic component.
        table.set(
            VitalType::BloodPressure,
            ThresholdRange {
                normal_min: 90.0,
                normal_max: 120.0,
                critical_min: 70.0,
                critical_max: 180.0,
            },
        );
        table.set(
            VitalType::OxygenSaturation,
            ThresholdRange {
                normal_min: 95.0,
                normal_max: 100.0,
                critical_min: 90.0,
                critical_max: 100.0,
            },
        );
        table.set(
            VitalType::Temperature,
            ThresholdRange {
                normal_min: 36.5,
                normal_max: 37.5,
                critical_min: 35.0,
                critical_max: 39.0,
            },
        );
        table.set(
            VitalType::RespiratoryRate,
            ThresholdRange {
                normal_min: 12.0,
                normal_max: 20.0,
                critical_min: 8.0,
                critical_max: 30.0,
            },
        );
        table.set(
            VitalType::BloodGlucose,
            ThresholdRange {
                normal_min: 70.0,
                normal_max: 140.0,
                critical_min: 54.0,
                critical_max: 250.0,
            },
        );
        table
    }
}

/// Classify a raw value against a threshold range.
///
/// Boundary values are inclusive on the normal side: a value exactly at
/// `normal_max` is normal, a value exactly at `critical_max` is a warning.
pub fn classify_value(value: f64, range: &ThresholdRange) -> VitalStatus {
    if value < range.critical_min || value > range.critical_max {
        VitalStatus::Critical
    } else if value < range.normal_min || value > range.normal_max {
        VitalStatus::Warning
    } else {
        VitalStatus::Normal
    }
}

/// Classify a measurement against the table.
///
/// Blood pressure is evaluated against the systolic component only. Types
/// with no configured range classify as normal.
pub fn classify(vital_type: VitalType, value: &VitalValue, table: &ThresholdTable) -> VitalStatus {
    match table.get(vital_type) {
        Some(range) => classify_value(value.classification_value(), range),
        None => VitalStatus::Normal,
    }
}
