//! Resolving a bearer token into an [`Identity`].

use std::sync::Arc;

use tracing::debug;

use fno_core::error::AppError;
use fno_core::result::AppResult;
use fno_database::UserStore;

use super::INVALID_TOKEN;
use super::decoder::JwtDecoder;
use crate::identity::Identity;

/// Verifies tokens and rebuilds the caller from the store.
///
/// One store read per verification; the role claim inside the token is
/// never consulted.
#[derive(Clone)]
pub struct TokenVerifier {
    decoder: JwtDecoder,
    store: Arc<dyn UserStore>,
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenVerifier")
            .field("decoder", &self.decoder)
            .finish_non_exhaustive()
    }
}

impl TokenVerifier {
    /// Creates a verifier over the given decoder and store.
    pub fn new(decoder: JwtDecoder, store: Arc<dyn UserStore>) -> Self {
        Self { decoder, store }
    }

    /// Verifies `token` and returns the caller's current identity.
    ///
    /// A missing or deactivated subject is indistinguishable from a bad
    /// signature. Store failures propagate as-is.
    pub async fn verify(&self, token: &str) -> AppResult<Identity> {
        let claims = self.decoder.decode(token)?;

        match self.store.find_user_by_id(claims.sub).await? {
            Some(user) if user.is_active => Ok(Identity::from(&user)),
            Some(_) => {
                debug!(user_id = %claims.sub, "Token subject is deactivated");
                Err(AppError::authentication(INVALID_TOKEN))
            }
            None => {
                debug!(user_id = %claims.sub, "Token subject no longer exists");
                Err(AppError::authentication(INVALID_TOKEN))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use fno_core::config::AuthConfig;
    use fno_core::error::ErrorKind;
    use fno_database::MemoryUserStore;
    use fno_entity::user::{NewUser, UserChanges};

    use super::*;
    use crate::jwt::JwtEncoder;

    fn auth_config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "test-secret".to_string(),
            ..AuthConfig::default()
        }
    }

    async fn setup() -> (MemoryUserStore, TokenVerifier, JwtEncoder) {
        let store = MemoryUserStore::with_roles(&["USER", "ADMIN"]).await;
        let config = auth_config();
        let verifier = TokenVerifier::new(JwtDecoder::new(&config), Arc::new(store.clone()));
        (store, verifier, JwtEncoder::new(&config))
    }

    async fn insert(store: &MemoryUserStore) -> fno_entity::user::User {
        let role = store.find_role_by_name("USER").await.unwrap().unwrap();
        store
            .insert_user(NewUser {
                email: "ivan@example.com".to_string(),
                password_hash: "$argon2id$stub".to_string(),
                first_name: "Иван".to_string(),
                last_name: "Иванов".to_string(),
                patronymic: None,
                iin: "880125301713".to_string(),
                role_id: role.id,
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_verify_resolves_current_role() {
        let (store, verifier, encoder) = setup().await;
        let user = insert(&store).await;
        let token = encoder.issue(&Identity::from(&user)).unwrap();

        let admin = store.find_role_by_name("ADMIN").await.unwrap().unwrap();
        store
            .update_user(
                user.id,
                UserChanges {
                    role_id: Some(admin.id),
                    ..UserChanges::default()
                },
            )
            .await
            .unwrap();

        let identity = verifier.verify(&token).await.unwrap();
        assert_eq!(identity.role.name, "ADMIN");
    }

    #[tokio::test]
    async fn test_deactivated_user_rejected() {
        let (store, verifier, encoder) = setup().await;
        let user = insert(&store).await;
        let token = encoder.issue(&Identity::from(&user)).unwrap();
        assert!(verifier.verify(&token).await.is_ok());

        store
            .update_user(
                user.id,
                UserChanges {
                    is_active: Some(false),
                    ..UserChanges::default()
                },
            )
            .await
            .unwrap();

        let err = verifier.verify(&token).await.unwrap_err();
        assert!(err.is(ErrorKind::Authentication));
        assert_eq!(err.message, INVALID_TOKEN);
    }

    #[tokio::test]
    async fn test_unknown_subject_rejected() {
        let (store, verifier, encoder) = setup().await;
        let user = insert(&store).await;
        let mut ghost = user.clone();
        ghost.id = fno_core::types::UserId::new();
        let token = encoder.issue(&Identity::from(&ghost)).unwrap();

        let err = verifier.verify(&token).await.unwrap_err();
        assert_eq!(err.message, INVALID_TOKEN);
    }
}
