//! Repository for the `vital_signs` table (append-only time-series).

use sqlx::PgPool;
use vitalstream_core::types::Timestamp;
use vitalstream_core::vitals::{VitalType, VitalValue};

use crate::models::vital_sign::{CreateVitalSign, VitalSignRecord};

/// Column list for `vital_signs` SELECT queries.
const COLUMNS: &str = "\
    id, patient_id, device_id, vital_type, \
    value_scalar, systolic, diastolic, unit, \
    recorded_at, status, alert_triggered, alert_level, created_at";

/// Default page size for patient listings.
const DEFAULT_LIMIT: i64 = 50;

/// Hard cap on requested page size.
const MAX_LIMIT: i64 = 500;

/// Provides append and query operations for vital sign records.
///
/// There is intentionally no update or delete method: the store is
/// append-only and records are immutable once inserted.
pub struct VitalSignRepo;

impl VitalSignRepo {
    /// Append a single reading and return the stored record.
    pub async fn insert(
        pool: &PgPool,
        reading: &CreateVitalSign,
    ) -> Result<VitalSignRecord, sqlx::Error> {
        let (value_scalar, systolic, diastolic) = match reading.value {
            VitalValue::Scalar(v) => (Some(v), None, None),
            VitalValue::BloodPressure {
                systolic,
                diastolic,
            } => (None, Some(systolic), Some(diastolic)),
        };

        let query = format!(
            "INSERT INTO vital_signs (\
                patient_id, device_id, vital_type, \
                value_scalar, systolic, diastolic, unit, \
                recorded_at, status, alert_triggered, alert_level) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, VitalSignRecord>(&query)
            .bind(&reading.patient_id)
            .bind(&reading.device_id)
            .bind(reading.vital_type.as_str())
            .bind(value_scalar)
            .bind(systolic)
            .bind(diastolic)
            .bind(&reading.unit)
            .bind(reading.recorded_at)
            .bind(reading.status.as_str())
            .bind(reading.alert_triggered)
            .bind(reading.alert_level.map(|l| l.as_str()))
            .fetch_one(pool)
            .await
    }

    /// List a patient's readings, newest first, optionally filtered by
    /// vital type and device.
    pub async fn find_by_patient(
        pool: &PgPool,
        patient_id: &str,
        vital_type: Option<VitalType>,
        device_id: Option<&str>,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<VitalSignRecord>, sqlx::Error> {
        let limit = limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        let offset = offset.unwrap_or(0).max(0);

        let query = format!(
            "SELECT {COLUMNS} FROM vital_signs \
             WHERE patient_id = $1 \
               AND ($2::text IS NULL OR vital_type = $2) \
               AND ($3::text IS NULL OR device_id = $3) \
             ORDER BY recorded_at DESC \
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, VitalSignRecord>(&query)
            .bind(patient_id)
            .bind(vital_type.map(|t| t.as_str()))
            .bind(device_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Readings for one patient and type within a time range, in
    /// chronological order (as required by trend analysis).
    pub async fn find_range(
        pool: &PgPool,
        patient_id: &str,
        vital_type: VitalType,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<Vec<VitalSignRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM vital_signs \
             WHERE patient_id = $1 AND vital_type = $2 \
               AND recorded_at >= $3 AND recorded_at <= $4 \
             ORDER BY recorded_at ASC"
        );
        sqlx::query_as::<_, VitalSignRecord>(&query)
            .bind(patient_id)
            .bind(vital_type.as_str())
            .bind(start)
            .bind(end)
            .fetch_all(pool)
            .await
    }

    /// The most recent reading per vital type for one patient.
    ///
    /// Uses `DISTINCT ON` to select the newest row per type.
    pub async fn find_latest_per_type(
        pool: &PgPool,
        patient_id: &str,
    ) -> Result<Vec<VitalSignRecord>, sqlx::Error> {
        let query = format!(
            "SELECT DISTINCT ON (vital_type) {COLUMNS} FROM vital_signs \
             WHERE patient_id = $1 \
             ORDER BY vital_type, recorded_at DESC"
        );
        sqlx::query_as::<_, VitalSignRecord>(&query)
            .bind(patient_id)
            .fetch_all(pool)
            .await
    }

    /// Critical-alert readings since a cutoff, newest first, optionally
    /// scoped to one patient.
    pub async fn find_critical(
        pool: &PgPool,
        patient_id: Option<&str>,
        since: Timestamp,
    ) -> Result<Vec<VitalSignRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM vital_signs \
             WHERE alert_level = 'critical' \
               AND recorded_at >= $2 \
               AND ($1::text IS NULL OR patient_id = $1) \
             ORDER BY recorded_at DESC"
        );
        sqlx::query_as::<_, VitalSignRecord>(&query)
            .bind(patient_id)
            .bind(since)
            .fetch_all(pool)
            .await
    }
}
