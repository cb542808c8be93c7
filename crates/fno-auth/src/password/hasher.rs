//! Argon2id password hashing and verification.

use argon2::{
    Argon2,
    password_hash::{
        PasswordHash, PasswordHasher as ArgonHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};
use tracing::warn;

use fno_core::error::{AppError, ErrorKind};
use fno_core::result::AppResult;

/// Hashes and verifies passwords with Argon2id.
///
/// Each hash gets its own random salt; the PHC string embeds the salt and
/// cost parameters so verification needs no extra state.
#[derive(Debug, Clone, Copy, Default)]
pub struct PasswordHasher;

impl PasswordHasher {
    /// Creates a new password hasher instance.
    pub fn new() -> Self {
        Self
    }

    /// Hashes a plaintext password with a fresh salt.
    pub fn hash_password(&self, password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))
    }

    /// Checks a plaintext password against a stored hash.
    ///
    /// A stored hash that cannot be parsed counts as a mismatch.
    pub fn verify_password(&self, password: &str, hash: &str) -> bool {
        let parsed = match PasswordHash::new(hash) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!(error = %e, "Stored password hash is malformed");
                return false;
            }
        };
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }

    /// [`Self::hash_password`] on the blocking pool.
    pub async fn hash(&self, password: String) -> AppResult<String> {
        let hasher = *self;
        tokio::task::spawn_blocking(move || hasher.hash_password(&password))
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Internal, "Hashing task failed", e))?
    }

    /// [`Self::verify_password`] on the blocking pool.
    pub async fn verify(&self, password: String, hash: String) -> AppResult<bool> {
        let hasher = *self;
        tokio::task::spawn_blocking(move || hasher.verify_password(&password, &hash))
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Internal, "Verification task failed", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_round_trip() {
        let hasher = PasswordHasher::new();
        let hash = hasher.hash_password("correct horse").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(hasher.verify_password("correct horse", &hash));
        assert!(!hasher.verify_password("wrong horse", &hash));
    }

    #[test]
    fn test_same_password_hashes_differently() {
        let hasher = PasswordHasher::new();
        let a = hasher.hash_password("password123").unwrap();
        let b = hasher.hash_password("password123").unwrap();
        assert_ne!(a, b);
        assert!(hasher.verify_password("password123", &a));
        assert!(hasher.verify_password("password123", &b));
    }

    #[test]
    fn test_malformed_hash_is_mismatch() {
        let hasher = PasswordHasher::new();
        assert!(!hasher.verify_password("password123", "not-a-phc-string"));
        assert!(!hasher.verify_password("password123", ""));
    }

    #[tokio::test]
    async fn test_async_wrappers() {
        let hasher = PasswordHasher::new();
        let hash = hasher.hash("password123".to_string()).await.unwrap();
        assert!(hasher.verify("password123".to_string(), hash).await.unwrap());
    }
}
