//! Listener and CORS settings.

use serde::{Deserialize, Serialize};

/// Where the HTTP server listens and how long it drains on shutdown.
/// Missing keys fall back to [`ServerConfig::default`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Upper bound on waiting for in-flight requests after a signal.
    pub shutdown_grace_seconds: u64,
    pub cors: CorsConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            shutdown_grace_seconds: 30,
            cors: CorsConfig::default(),
        }
    }
}

impl ServerConfig {
    /// `host:port`, as passed to the listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Cross-origin policy for the browser front end.
///
/// An origin of `"*"` allows any origin; credentials are then never
/// advertised, since browsers reject that combination.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub allowed_methods: Vec<String>,
    pub allowed_headers: Vec<String>,
    pub allow_credentials: bool,
    /// Preflight cache lifetime.
    pub max_age_seconds: u64,
}

impl Default for CorsConfig {
    fn default() -> Self {
        let owned = |items: &[&str]| items.iter().map(|s| s.to_string()).collect();
        Self {
            allowed_origins: owned(&["http://localhost:3001"]),
            allowed_methods: owned(&["GET", "POST", "PATCH", "DELETE", "OPTIONS"]),
            allowed_headers: owned(&["authorization", "content-type"]),
            allow_credentials: true,
            max_age_seconds: 3600,
        }
    }
}
