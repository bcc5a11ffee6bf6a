//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods
//! that accept `&PgPool` as the first argument.

pub mod device_repo;
pub mod threshold_repo;
pub mod vital_sign_repo;

pub use device_repo::DeviceRepo;
pub use threshold_repo::ThresholdRepo;
pub use vital_sign_repo::VitalSignRepo;
