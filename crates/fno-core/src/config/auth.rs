//! `[auth]` section: token signing, role names, password bounds.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Upper bound on `jwt_ttl_minutes`: one year.
pub const MAX_JWT_TTL_MINUTES: u64 = 365 * 24 * 60;

/// Authentication settings. Everything except `jwt_secret` has a default;
/// an empty secret fails [`AuthConfig::validate`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// HMAC-SHA256 signing key.
    pub jwt_secret: String,
    /// Written to and required in the `iss` claim.
    pub jwt_issuer: String,
    pub jwt_ttl_minutes: u64,
    /// Clock skew tolerated on `exp`.
    pub jwt_leeway_seconds: u64,
    /// Role given on self-registration. Must be seeded.
    pub default_role: String,
    /// Role name that unlocks admin routes.
    pub admin_role: String,
    pub password_min_length: usize,
    pub password_max_length: usize,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            jwt_issuer: "fno-platform".to_string(),
            jwt_ttl_minutes: 60,
            jwt_leeway_seconds: 5,
            default_role: "USER".to_string(),
            admin_role: "ADMIN".to_string(),
            password_min_length: 8,
            password_max_length: 100,
        }
    }
}

impl AuthConfig {
    /// Rejects configurations the server must not start with.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.jwt_secret.trim().is_empty() {
            return Err(AppError::configuration(
                "auth.jwt_secret is required (set FNO__AUTH__JWT_SECRET)",
            ));
        }
        if self.jwt_issuer.trim().is_empty() {
            return Err(AppError::configuration("auth.jwt_issuer must not be empty"));
        }
        if self.jwt_ttl_minutes == 0 || self.jwt_ttl_minutes > MAX_JWT_TTL_MINUTES {
            return Err(AppError::configuration(format!(
                "auth.jwt_ttl_minutes must be between 1 and {MAX_JWT_TTL_MINUTES}"
            )));
        }
        if self.password_min_length > self.password_max_length {
            return Err(AppError::configuration(
                "auth.password_min_length exceeds auth.password_max_length",
            ));
        }
        Ok(())
    }
}
