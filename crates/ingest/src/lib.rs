//! Ingestion gateway: telemetry transport consumer and processing
//! pipeline.
//!
//! The transport task consumes framed messages from the telemetry broker
//! WebSocket and pushes them into a bounded buffer; the pipeline task
//! drains the buffer and runs each message independently through
//! normalize → classify → alert → persist → publish. A failure in one
//! message never affects any other.

pub mod metrics;
pub mod pipeline;
pub mod transport;

pub use metrics::{IngestCounters, IngestStats};
pub use pipeline::Processor;
pub use transport::{TransportClient, TransportFrame};
