//! Entity models and DTOs.
//!
//! Each submodule contains a `Serialize` entity struct matching the
//! database row and a create/upsert DTO for inserts.

pub mod device;
pub mod threshold;
pub mod vital_sign;
