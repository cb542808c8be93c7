//! Signing access tokens.

use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};

use fno_core::config::AuthConfig;
use fno_core::error::AppError;
use fno_core::result::AppResult;

use super::claims::Claims;
use crate::identity::Identity;

/// Creates HS256-signed access tokens.
#[derive(Clone)]
pub struct JwtEncoder {
    encoding_key: EncodingKey,
    issuer: String,
    ttl: Duration,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("issuer", &self.issuer)
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            issuer: config.jwt_issuer.clone(),
            ttl: Duration::minutes(config.jwt_ttl_minutes as i64),
        }
    }

    /// Issues a signed access token for an authenticated caller.
    pub fn issue(&self, identity: &Identity) -> AppResult<String> {
        let now = Utc::now();
        let expires_at = now + self.ttl;
        let claims = Claims {
            sub: identity.id,
            email: identity.email.clone(),
            role: identity.role.name.clone(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            iss: self.issuer.clone(),
        };
        self.sign(&claims)
    }

    /// Signs arbitrary claims with this encoder's key.
    pub fn sign(&self, claims: &Claims) -> AppResult<String> {
        encode(&Header::default(), claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode access token: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use fno_core::types::{RoleId, UserId};

    use super::*;
    use crate::identity::RoleView;
    use crate::jwt::JwtDecoder;

    #[test]
    fn test_issue_returns_token_carrying_the_caller() {
        let config = AuthConfig {
            jwt_secret: "test-secret".to_string(),
            jwt_ttl_minutes: 15,
            ..AuthConfig::default()
        };
        let identity = Identity {
            id: UserId::new(),
            email: "ivan@example.com".to_string(),
            first_name: "Иван".to_string(),
            last_name: "Иванов".to_string(),
            patronymic: None,
            full_name: "Иванов Иван".to_string(),
            role: RoleView {
                id: RoleId::new(),
                name: "USER".to_string(),
            },
        };

        let token = JwtEncoder::new(&config).issue(&identity).unwrap();
        let claims = JwtDecoder::new(&config).decode(&token).unwrap();

        assert_eq!(claims.sub, identity.id);
        assert_eq!(claims.email, "ivan@example.com");
        assert_eq!(claims.role, "USER");
        assert_eq!(claims.iss, "fno-platform");
        assert_eq!(claims.exp - claims.iat, 15 * 60);
    }
}
