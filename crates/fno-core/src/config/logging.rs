//! `[logging]` section.

use serde::{Deserialize, Serialize};

/// Subscriber settings read by the binaries. `RUST_LOG` wins over `level`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// An `EnvFilter` directive, e.g. `info` or `fno_api=debug,info`.
    pub level: String,
    /// `json` for structured output; anything else is human-readable.
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
