//! Email + password verification for login.

use std::sync::Arc;

use tracing::debug;

use fno_core::result::AppResult;
use fno_database::UserStore;

use crate::identity::Identity;
use crate::password::PasswordHasher;

/// Normalizes an email for lookup: trimmed and lowercased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Checks login credentials against the store.
#[derive(Clone)]
pub struct CredentialVerifier {
    store: Arc<dyn UserStore>,
    hasher: PasswordHasher,
}

impl CredentialVerifier {
    /// Creates a verifier over the given store.
    pub fn new(store: Arc<dyn UserStore>, hasher: PasswordHasher) -> Self {
        Self { store, hasher }
    }

    /// Returns the identity when the credentials match an active user,
    /// `None` otherwise. The caller decides how to report a miss.
    pub async fn verify(&self, email: &str, password: &str) -> AppResult<Option<Identity>> {
        let email = normalize_email(email);
        let Some(credentials) = self.store.find_user_by_email(&email).await? else {
            debug!("Login attempt for unknown email");
            return Ok(None);
        };

        if !credentials.user.is_active {
            debug!(user_id = %credentials.user.id, "Login attempt for deactivated user");
            return Ok(None);
        }

        let matches = self
            .hasher
            .verify(password.to_string(), credentials.password_hash)
            .await?;
        if !matches {
            debug!(user_id = %credentials.user.id, "Login attempt with wrong password");
            return Ok(None);
        }

        Ok(Some(Identity::from(&credentials.user)))
    }
}
