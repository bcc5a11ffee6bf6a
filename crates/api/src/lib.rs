//! Vitalstream API server library.
//!
//! Exposes the core building blocks (config, state, error handling,
//! routes, WebSocket infrastructure, broadcaster) so integration tests
//! and the binary entrypoint can both access them.

pub mod broadcaster;
pub mod config;
pub mod error;
pub mod handlers;
pub mod query;
pub mod response;
pub mod routes;
pub mod state;
pub mod ws;
