//! The request-scoped caller representation.

use serde::{Deserialize, Serialize};

use fno_core::types::{RoleId, UserId};
use fno_entity::user::{Role, User};

/// Role as exposed on an identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleView {
    /// Role id.
    pub id: RoleId,
    /// Role name.
    pub name: String,
}

impl From<&Role> for RoleView {
    fn from(role: &Role) -> Self {
        Self {
            id: role.id,
            name: role.name.clone(),
        }
    }
}

/// A resolved, trusted caller.
///
/// Rebuilt from the store on every request and never persisted, so the
/// role always reflects the current stored assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub id: UserId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub patronymic: Option<String>,
    pub full_name: String,
    pub role: RoleView,
}

impl Identity {
    /// Returns `true` if the caller's current role has the given name.
    pub fn has_role(&self, name: &str) -> bool {
        self.role.name == name
    }
}

impl From<&User> for Identity {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            patronymic: user.patronymic.clone(),
            full_name: user.full_name(),
            role: RoleView::from(&user.role),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_serializes_camel_case_with_full_name() {
        let now = Utc::now();
        let user = User {
            id: UserId::new(),
            email: "ivan@example.com".to_string(),
            first_name: "Иван".to_string(),
            last_name: "Иванов".to_string(),
            patronymic: None,
            iin: "880125301713".to_string(),
            role: Role::new(RoleId::new(), "USER"),
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        let json = serde_json::to_value(Identity::from(&user)).unwrap();
        assert_eq!(json["fullName"], "Иванов Иван");
        assert_eq!(json["firstName"], "Иван");
        assert_eq!(json["role"]["name"], "USER");
        assert!(json["patronymic"].is_null());
        assert!(json.get("iin").is_none());
    }
}
