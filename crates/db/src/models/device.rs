//! Device registry models.
//!
//! Devices are consumed metadata: connectivity and battery state arrive on
//! the device-status channel and are never consulted by classification.

use serde::Serialize;
use sqlx::FromRow;
use vitalstream_core::types::Timestamp;

/// A telemetry-producing device known to the registry.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceDescriptor {
    pub device_id: String,
    pub patient_id: Option<String>,
    pub connectivity: String,
    pub battery_percent: Option<i16>,
    pub last_seen_at: Option<Timestamp>,
    #[serde(skip)]
    pub created_at: Timestamp,
    #[serde(skip)]
    pub updated_at: Timestamp,
}

/// DTO for a connectivity/battery update from the device-status channel.
#[derive(Debug, Clone)]
pub struct DeviceStatusUpdate {
    pub device_id: String,
    pub patient_id: Option<String>,
    pub connectivity: String,
    pub battery_percent: Option<i16>,
    pub seen_at: Timestamp,
}
