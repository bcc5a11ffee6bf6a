/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Telemetry broker WebSocket URL.
    pub telemetry_ws_url: String,
    /// Bounded buffer size between transport and processing.
    pub ingest_buffer_size: usize,
    /// Per-observer delivery queue capacity.
    pub observer_queue_capacity: usize,
    /// Event bus broadcast channel capacity.
    pub event_bus_capacity: usize,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                      |
    /// |---------------------------|------------------------------|
    /// | `HOST`                    | `0.0.0.0`                    |
    /// | `PORT`                    | `3000`                       |
    /// | `CORS_ORIGINS`            | `http://localhost:5173`      |
    /// | `REQUEST_TIMEOUT_SECS`    | `30`                         |
    /// | `TELEMETRY_WS_URL`        | `ws://localhost:9001/stream` |
    /// | `INGEST_BUFFER_SIZE`      | `1024`                       |
    /// | `OBSERVER_QUEUE_CAPACITY` | `64`                         |
    /// | `EVENT_BUS_CAPACITY`      | `1024`                       |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let telemetry_ws_url = std::env::var("TELEMETRY_WS_URL")
            .unwrap_or_else(|_| "ws://localhost:9001/stream".into());

        let ingest_buffer_size: usize = std::env::var("INGEST_BUFFER_SIZE")
            .unwrap_or_else(|_| "1024".into())
            .parse()
            .expect("INGEST_BUFFER_SIZE must be a valid usize");

        let observer_queue_capacity: usize = std::env::var("OBSERVER_QUEUE_CAPACITY")
            .unwrap_or_else(|_| "64".into())
            .parse()
            .expect("OBSERVER_QUEUE_CAPACITY must be a valid usize");

        let event_bus_capacity: usize = std::env::var("EVENT_BUS_CAPACITY")
            .unwrap_or_else(|_| "1024".into())
            .parse()
            .expect("EVENT_BUS_CAPACITY must be a valid usize");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            telemetry_ws_url,
            ingest_buffer_size,
            observer_queue_capacity,
            event_bus_capacity,
        }
    }
}
