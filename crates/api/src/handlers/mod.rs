pub mod devices;
pub mod ingest;
pub mod thresholds;
pub mod vitals;
