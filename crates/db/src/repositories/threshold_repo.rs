//! Repository for the `vital_thresholds` table.

use sqlx::PgPool;

use crate::models::threshold::{ThresholdRow, UpsertThresholdRow};

/// Column list for `vital_thresholds` SELECT queries.
const COLUMNS: &str = "\
    id, patient_id, vital_type, \
    normal_min, normal_max, critical_min, critical_max, \
    is_enabled, created_at, updated_at";

/// Provides query and upsert operations for threshold configuration.
pub struct ThresholdRepo;

impl ThresholdRepo {
    /// List all configured rows (global and per-patient).
    pub async fn list_all(pool: &PgPool) -> Result<Vec<ThresholdRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM vital_thresholds \
             ORDER BY vital_type, patient_id NULLS LAST"
        );
        sqlx::query_as::<_, ThresholdRow>(&query)
            .fetch_all(pool)
            .await
    }

    /// Enabled rows that apply to one patient: that patient's overrides
    /// plus the global defaults, ordered so the override sorts first per
    /// vital type.
    pub async fn get_for_patient(
        pool: &PgPool,
        patient_id: &str,
    ) -> Result<Vec<ThresholdRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM vital_thresholds \
             WHERE is_enabled AND (patient_id = $1 OR patient_id IS NULL) \
             ORDER BY vital_type, patient_id NULLS LAST"
        );
        sqlx::query_as::<_, ThresholdRow>(&query)
            .bind(patient_id)
            .fetch_all(pool)
            .await
    }

    /// Insert or update the row for a (patient, vital type) scope.
    ///
    /// This is the single mutation path for threshold configuration.
    pub async fn upsert(
        pool: &PgPool,
        row: &UpsertThresholdRow,
    ) -> Result<ThresholdRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO vital_thresholds (\
                patient_id, vital_type, \
                normal_min, normal_max, critical_min, critical_max) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             ON CONFLICT (patient_id, vital_type) DO UPDATE SET \
                normal_min = EXCLUDED.normal_min, \
                normal_max = EXCLUDED.normal_max, \
                critical_min = EXCLUDED.critical_min, \
                critical_max = EXCLUDED.critical_max, \
                is_enabled = TRUE, \
                updated_at = now() \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ThresholdRow>(&query)
            .bind(&row.patient_id)
            .bind(&row.vital_type)
            .bind(row.normal_min)
            .bind(row.normal_max)
            .bind(row.critical_min)
            .bind(row.critical_max)
            .fetch_one(pool)
            .await
    }
}
