//! Pure domain logic for the vitals monitoring pipeline.
//!
//! This crate has no I/O and no database access. It provides:
//!
//! - [`vitals`] -- vital sign types, values, and status tiers.
//! - [`thresholds`] -- the threshold table and the pure classifier.
//! - [`alert`] -- alert events derived from abnormal readings.
//! - [`normalize`] -- raw telemetry validation and coercion.
//! - [`trend`] -- windowed statistics and trend direction.

pub mod alert;
pub mod error;
pub mod normalize;
pub mod thresholds;
pub mod trend;
pub mod types;
pub mod vitals;
