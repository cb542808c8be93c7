//! Store selection and PostgreSQL pool sizing.

use serde::{Deserialize, Serialize};

/// Which user-store implementation backs the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// PostgreSQL via sqlx.
    #[default]
    Postgres,
    /// Process-local store; data is lost on restart.
    Memory,
}

/// `[database]` section. `url` is only required for the Postgres backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub backend: StoreBackend,
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    /// Also bounds how long a request waits for a free connection.
    pub connect_timeout_seconds: u64,
    pub idle_timeout_seconds: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Postgres,
            url: String::new(),
            max_connections: 20,
            min_connections: 2,
            connect_timeout_seconds: 10,
            idle_timeout_seconds: 300,
        }
    }
}
