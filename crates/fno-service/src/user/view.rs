//! Public user representation.

use chrono::{DateTime, Utc};
use serde::Serialize;

use fno_auth::RoleView;
use fno_core::types::UserId;
use fno_entity::user::User;

/// A user as returned to API clients. Has no password-hash field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: UserId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub patronymic: Option<String>,
    pub full_name: String,
    pub iin: String,
    pub role: RoleView,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        Self {
            full_name: user.full_name(),
            role: RoleView::from(&user.role),
            id: user.id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            patronymic: user.patronymic,
            iin: user.iin,
            is_active: user.is_active,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}
