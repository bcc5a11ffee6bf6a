//! Repository for the `devices` table.

use sqlx::PgPool;

use crate::models::device::{DeviceDescriptor, DeviceStatusUpdate};

/// Column list for `devices` SELECT queries.
const COLUMNS: &str = "\
    device_id, patient_id, connectivity, battery_percent, \
    last_seen_at, created_at, updated_at";

/// Provides lookup and status-upsert operations for the device registry.
pub struct DeviceRepo;

impl DeviceRepo {
    /// Record a connectivity/battery update, creating the device row on
    /// first sight.
    ///
    /// An update without a patient assignment preserves any existing one.
    pub async fn upsert_status(
        pool: &PgPool,
        update: &DeviceStatusUpdate,
    ) -> Result<DeviceDescriptor, sqlx::Error> {
        let query = format!(
            "INSERT INTO devices (\
                device_id, patient_id, connectivity, battery_percent, last_seen_at) \
             VALUES ($1, $2, $3, $4, $5) \
             ON CONFLICT (device_id) DO UPDATE SET \
                patient_id = COALESCE(EXCLUDED.patient_id, devices.patient_id), \
                connectivity = EXCLUDED.connectivity, \
                battery_percent = COALESCE(EXCLUDED.battery_percent, devices.battery_percent), \
                last_seen_at = EXCLUDED.last_seen_at, \
                updated_at = now() \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DeviceDescriptor>(&query)
            .bind(&update.device_id)
            .bind(&update.patient_id)
            .bind(&update.connectivity)
            .bind(update.battery_percent)
            .bind(update.seen_at)
            .fetch_one(pool)
            .await
    }

    /// Fetch one device by id.
    pub async fn get(
        pool: &PgPool,
        device_id: &str,
    ) -> Result<Option<DeviceDescriptor>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM devices WHERE device_id = $1");
        sqlx::query_as::<_, DeviceDescriptor>(&query)
            .bind(device_id)
            .fetch_optional(pool)
            .await
    }

    /// List the devices assigned to a patient.
    pub async fn list_by_patient(
        pool: &PgPool,
        patient_id: &str,
    ) -> Result<Vec<DeviceDescriptor>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM devices WHERE patient_id = $1 ORDER BY device_id"
        );
        sqlx::query_as::<_, DeviceDescriptor>(&query)
            .bind(patient_id)
            .fetch_all(pool)
            .await
    }
}
