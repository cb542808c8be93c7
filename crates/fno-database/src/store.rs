//! The user-store boundary.
//!
//! Uniqueness of email and IIN is enforced by the store itself; callers
//! write optimistically and inspect [`StoreError::UniqueViolation`].

use async_trait::async_trait;
use thiserror::Error;

use fno_core::error::AppError;
use fno_core::types::{RoleId, UserId};
use fno_entity::user::{NewUser, Role, User, UserChanges, UserCredentials};

/// Errors surfaced by a [`UserStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique constraint rejected the write.
    #[error("unique constraint violated on [{}]", .fields.join(", "))]
    UniqueViolation {
        /// Offending field names (or raw constraint names when unknown).
        fields: Vec<String>,
    },
    /// Any other storage failure.
    #[error(transparent)]
    Backend(#[from] AppError),
}

impl StoreError {
    /// Returns `true` if a violated field name contains `field`
    /// (case-insensitive).
    pub fn violates(&self, field: &str) -> bool {
        match self {
            Self::UniqueViolation { fields } => {
                let needle = field.to_lowercase();
                fields.iter().any(|f| f.to_lowercase().contains(&needle))
            }
            Self::Backend(_) => false,
        }
    }
}

impl From<StoreError> for AppError {
    /// Callers that care which field collided inspect the error first;
    /// anything left over becomes a generic conflict.
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UniqueViolation { .. } => {
                AppError::conflict("User with this data already exists")
            }
            StoreError::Backend(e) => e,
        }
    }
}

/// A specialized `Result` for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence operations the user lifecycle and auth flows need.
///
/// Every lookup distinguishes "not found" (`Ok(None)`) from failure.
/// Two implementations are provided:
/// - PostgreSQL ([`crate::PgUserStore`])
/// - In-memory ([`crate::MemoryUserStore`])
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Find a user by id, regardless of active status.
    async fn find_user_by_id(&self, id: UserId) -> StoreResult<Option<User>>;

    /// Find the credential projection by normalized email.
    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<UserCredentials>>;

    /// Find a role by id.
    async fn find_role_by_id(&self, id: RoleId) -> StoreResult<Option<Role>>;

    /// Find a role by its unique name.
    async fn find_role_by_name(&self, name: &str) -> StoreResult<Option<Role>>;

    /// Insert a user and return the stored record.
    async fn insert_user(&self, user: NewUser) -> StoreResult<User>;

    /// Apply a partial update. Returns `None` if the user does not exist.
    async fn update_user(&self, id: UserId, changes: UserChanges) -> StoreResult<Option<User>>;

    /// List users whose active flag is set, oldest first.
    async fn list_active_users(&self) -> StoreResult<Vec<User>>;

    /// Check that the store backend is reachable.
    async fn health_check(&self) -> StoreResult<bool>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_violates_matches_substring_case_insensitively() {
        let err = StoreError::UniqueViolation {
            fields: vec!["Email".to_string()],
        };
        assert!(err.violates("email"));
        assert!(!err.violates("iin"));
    }

    #[test]
    fn test_into_app_error() {
        let err: AppError = StoreError::UniqueViolation {
            fields: vec!["phone".to_string()],
        }
        .into();
        assert!(err.is(fno_core::error::ErrorKind::Conflict));
    }

    #[test]
    fn test_backend_error_never_violates() {
        let err = StoreError::from(AppError::database("down"));
        assert!(!err.violates("email"));
    }
}
