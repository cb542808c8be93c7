//! Raw inputs to the user lifecycle operations.
//!
//! Values arrive exactly as the client sent them; normalization and
//! validation happen inside [`super::UserService`].

/// Self-registration input.
#[derive(Debug, Clone, Default)]
pub struct RegisterUser {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub patronymic: Option<String>,
    pub iin: String,
}

/// Admin creation input. Without `role_id` the default role is used.
#[derive(Debug, Clone, Default)]
pub struct CreateUser {
    pub profile: RegisterUser,
    pub role_id: Option<String>,
}

/// Partial update. `None` means "leave unchanged".
///
/// `patronymic` is tri-state: `Some(None)` clears the value.
#[derive(Debug, Clone, Default)]
pub struct UpdateUser {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub patronymic: Option<Option<String>>,
    pub iin: Option<String>,
    pub role_id: Option<String>,
}

impl UpdateUser {
    /// Whether the patch touches the role. Only presence matters.
    pub fn has_role_id(&self) -> bool {
        self.role_id.is_some()
    }
}
