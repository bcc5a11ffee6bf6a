//! Observer WebSocket infrastructure.
//!
//! Observers connect here, send subscribe/unsubscribe commands, and
//! receive the events for the patients they follow.

pub mod handler;

pub use handler::ws_handler;
