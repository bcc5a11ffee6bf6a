//! Event bus and observer fan-out infrastructure.
//!
//! Building blocks for the real-time side of the pipeline:
//!
//! - [`EventBus`] -- in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`PatientEvent`] -- the canonical per-patient event envelope
//!   (`new-vital` / `alert`).
//! - [`SubscriptionRegistry`] -- the observer-to-patient subscription
//!   contract, with [`LocalSubscriptionRegistry`] as the single-instance
//!   concurrent-map implementation.

pub mod bus;
pub mod registry;

pub use bus::{EventBus, PatientEvent};
pub use registry::{LocalSubscriptionRegistry, SubscriptionRegistry};
