//! API Configuration Module
//!
//! Configuration is loaded from environment variables with sensible defaults
//! for development.

use std::path::PathBuf;

/// API configuration for binding, CORS, the event channel, and persistence.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host to bind the HTTP listener to.
    pub bind_host: String,

    /// Port for the HTTP listener.
    pub port: u16,

    /// Allowed CORS origins (comma-separated in env var).
    /// Empty means allow all origins (dev mode).
    pub cors_origins: Vec<String>,

    /// Buffer capacity of the broadcast channel; a subscriber that falls this
    /// many events behind is disconnected and must reconverge via snapshot.
    pub event_capacity: usize,

    /// Path of the JSON snapshot file.
    pub snapshot_path: PathBuf,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_host: "0.0.0.0".to_string(),
            port: 3001,
            cors_origins: Vec::new(), // Empty = allow all
            event_capacity: 1000,
            snapshot_path: PathBuf::from("status.json"),
        }
    }
}

impl ApiConfig {
    /// Create ApiConfig from environment variables.
    ///
    /// Environment variables:
    /// - `BEACON_BIND`: Listener host (default: 0.0.0.0)
    /// - `PORT` / `BEACON_PORT`: Listener port (default: 3001)
    /// - `BEACON_CORS_ORIGINS`: Comma-separated allowed origins (empty = allow all)
    /// - `BEACON_EVENT_CAPACITY`: Broadcast buffer size (default: 1000)
    /// - `BEACON_SNAPSHOT_PATH`: Snapshot file location (default: status.json)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let bind_host = std::env::var("BEACON_BIND").unwrap_or(defaults.bind_host);

        let port = std::env::var("PORT")
            .ok()
            .or_else(|| std::env::var("BEACON_PORT").ok())
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.port);

        let cors_origins = std::env::var("BEACON_CORS_ORIGINS")
            .ok()
            .map(|s| {
                s.split(',')
                    .map(|o| o.trim().to_string())
                    .filter(|o| !o.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        let event_capacity = std::env::var("BEACON_EVENT_CAPACITY")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.event_capacity);

        let snapshot_path = std::env::var("BEACON_SNAPSHOT_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.snapshot_path);

        Self {
            bind_host,
            port,
            cors_origins,
            event_capacity,
            snapshot_path,
        }
    }

    /// Check if a given origin is allowed.
    pub fn is_origin_allowed(&self, origin: &str) -> bool {
        if self.cors_origins.is_empty() {
            // Dev mode: allow all
            return true;
        }
        self.cors_origins.iter().any(|allowed| allowed == origin)
    }
}
