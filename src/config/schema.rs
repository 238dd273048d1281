//! Configuration schema definitions.

use serde::{Deserialize, Serialize};

/// Root configuration for the server.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// Listener configuration (port, backlog).
    pub listener: ListenerConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Service port to bind (e.g., "8080").
    pub port: String,

    /// Maximum pending not-yet-accepted connections queued by the OS.
    pub backlog: u32,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            port: "8080".to_string(),
            backlog: 10,
        }
    }
}
