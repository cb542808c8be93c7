//! Exchanging credentials for an access token.

use serde::Serialize;
use tracing::info;

use fno_auth::{CredentialVerifier, Identity, JwtEncoder};
use fno_core::error::AppError;
use fno_core::result::AppResult;

/// The only message a failed login ever produces.
pub const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Successful login payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResult {
    pub access_token: String,
    pub user: Identity,
}

/// Verifies credentials and issues tokens.
#[derive(Clone)]
pub struct AuthService {
    credentials: CredentialVerifier,
    encoder: JwtEncoder,
}

impl AuthService {
    /// Creates a new auth service.
    pub fn new(credentials: CredentialVerifier, encoder: JwtEncoder) -> Self {
        Self {
            credentials,
            encoder,
        }
    }

    /// Logs a user in. Unknown email, wrong password, and a deactivated
    /// account all fail with the same authentication error.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<LoginResult> {
        let identity = self
            .credentials
            .verify(email, password)
            .await?
            .ok_or_else(|| AppError::authentication(INVALID_CREDENTIALS))?;

        let token = self.encoder.issue(&identity)?;
        info!(user_id = %identity.id, "User logged in");

        Ok(LoginResult {
            access_token: token,
            user: identity,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use fno_auth::{JwtDecoder, PasswordHasher};
    use fno_core::config::AuthConfig;
    use fno_core::error::ErrorKind;
    use fno_database::MemoryUserStore;

    use super::*;
    use crate::user::{RegisterUser, UserService};

    fn auth_config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "test-secret".to_string(),
            ..AuthConfig::default()
        }
    }

    async fn setup() -> AuthService {
        let store = Arc::new(MemoryUserStore::with_roles(&["USER", "ADMIN"]).await);
        let config = auth_config();
        let users = UserService::new(store.clone(), PasswordHasher::new(), &config);
        users
            .register(RegisterUser {
                email: "ivan@example.com".to_string(),
                password: "password123".to_string(),
                first_name: "Иван".to_string(),
                last_name: "Иванов".to_string(),
                patronymic: None,
                iin: "880125301713".to_string(),
            })
            .await
            .unwrap();

        AuthService::new(
            CredentialVerifier::new(store, PasswordHasher::new()),
            JwtEncoder::new(&config),
        )
    }

    #[tokio::test]
    async fn test_login_issues_token_with_advisory_role() {
        let auth = setup().await;
        let result = auth.login(" Ivan@Example.com ", "password123").await.unwrap();
        assert_eq!(result.user.email, "ivan@example.com");

        let claims = JwtDecoder::new(&auth_config())
            .decode(&result.access_token)
            .unwrap();
        assert_eq!(claims.sub, result.user.id);
        assert_eq!(claims.role, "USER");
        assert_eq!(claims.iss, "fno-platform");

        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("accessToken").is_some());
        assert_eq!(json["user"]["fullName"], "Иванов Иван");
    }

    #[tokio::test]
    async fn test_login_failures_are_uniform() {
        let auth = setup().await;
        for (email, password) in [
            ("ivan@example.com", "wrong-password"),
            ("nobody@example.com", "password123"),
        ] {
            let err = auth.login(email, password).await.unwrap_err();
            assert!(err.is(ErrorKind::Authentication));
            assert_eq!(err.message, INVALID_CREDENTIALS);
        }
    }
}
