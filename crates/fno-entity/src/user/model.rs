//! User entity projections.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use fno_core::types::{RoleId, UserId};

use super::name::format_full_name;
use super::role::Role;

/// A user as returned by every outward-facing read.
///
/// This projection has no password-hash field; code holding a `User`
/// cannot leak the hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier.
    pub id: UserId,
    /// Normalized (lowercase, trimmed) email address.
    pub email: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Optional patronymic.
    pub patronymic: Option<String>,
    /// Individual Identification Number.
    pub iin: String,
    /// The role the user currently belongs to.
    pub role: Role,
    /// `false` once the user has been soft-deleted.
    pub is_active: bool,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Returns the display name `last first [patronymic]`.
    pub fn full_name(&self) -> String {
        format_full_name(&self.last_name, &self.first_name, self.patronymic.as_deref())
    }
}

/// The credential projection used only by login.
///
/// Deliberately not `Serialize`.
#[derive(Debug, Clone)]
pub struct UserCredentials {
    /// The user record.
    pub user: User,
    /// Stored password hash (PHC string).
    pub password_hash: String,
}

/// Data required to insert a user. All fields are already normalized
/// and validated.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Normalized email.
    pub email: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Trimmed given name.
    pub first_name: String,
    /// Trimmed family name.
    pub last_name: String,
    /// Trimmed patronymic, `None` when blank.
    pub patronymic: Option<String>,
    /// Checksum-valid IIN.
    pub iin: String,
    /// Assigned role.
    pub role_id: RoleId,
}

/// A partial update. `None` leaves the column untouched.
///
/// `patronymic` is tri-state: `Some(None)` clears the column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    /// New normalized email.
    pub email: Option<String>,
    /// New given name.
    pub first_name: Option<String>,
    /// New family name.
    pub last_name: Option<String>,
    /// New patronymic, or `Some(None)` to clear it.
    pub patronymic: Option<Option<String>>,
    /// New IIN.
    pub iin: Option<String>,
    /// New role.
    pub role_id: Option<RoleId>,
    /// New active flag.
    pub is_active: Option<bool>,
}

impl UserChanges {
    /// Returns `true` if no column would change.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Applies the changes to an in-memory record.
    pub fn apply_to(&self, user: &mut User, role: Option<Role>) {
        if let Some(email) = &self.email {
            user.email = email.clone();
        }
        if let Some(first_name) = &self.first_name {
            user.first_name = first_name.clone();
        }
        if let Some(last_name) = &self.last_name {
            user.last_name = last_name.clone();
        }
        if let Some(patronymic) = &self.patronymic {
            user.patronymic = patronymic.clone();
        }
        if let Some(iin) = &self.iin {
            user.iin = iin.clone();
        }
        if let Some(role) = role {
            user.role = role;
        }
        if let Some(is_active) = self.is_active {
            user.is_active = is_active;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> User {
        let now = Utc::now();
        User {
            id: UserId::new(),
            email: "ivan@example.com".to_string(),
            first_name: "Иван".to_string(),
            last_name: "Иванов".to_string(),
            patronymic: Some("Иванович".to_string()),
            iin: "880125301713".to_string(),
            role: Role::new(RoleId::new(), "USER"),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_full_name_is_derived() {
        let mut user = sample();
        assert_eq!(user.full_name(), "Иванов Иван Иванович");
        user.patronymic = None;
        assert_eq!(user.full_name(), "Иванов Иван");
    }

    #[test]
    fn test_apply_clears_patronymic() {
        let mut user = sample();
        let changes = UserChanges {
            patronymic: Some(None),
            first_name: Some("Пётр".to_string()),
            ..UserChanges::default()
        };
        changes.apply_to(&mut user, None);
        assert_eq!(user.patronymic, None);
        assert_eq!(user.first_name, "Пётр");
        assert_eq!(user.email, "ivan@example.com");
    }

    #[test]
    fn test_empty_changes() {
        assert!(UserChanges::default().is_empty());
        let changes = UserChanges {
            is_active: Some(false),
            ..UserChanges::default()
        };
        assert!(!changes.is_empty());
    }
}
