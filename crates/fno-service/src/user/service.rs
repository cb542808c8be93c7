//! User lifecycle operations.

use std::sync::Arc;

use tracing::{error, info};

use fno_auth::PasswordHasher;
use fno_core::config::AuthConfig;
use fno_core::error::AppError;
use fno_core::result::AppResult;
use fno_core::types::{RoleId, UserId};
use fno_database::{StoreError, UserStore};
use fno_entity::user::{NewUser, User, UserChanges, UserCredentials};

use super::input::{CreateUser, RegisterUser, UpdateUser};
use super::validation;
use super::view::UserView;

/// Registration, admin creation, lookup, update, and soft delete.
#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn UserStore>,
    hasher: PasswordHasher,
    default_role: String,
    password_min: usize,
    password_max: usize,
}

impl std::fmt::Debug for UserService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserService")
            .field("default_role", &self.default_role)
            .finish_non_exhaustive()
    }
}

/// Maps a store write failure to the client-facing conflict message.
/// Email is reported before IIN when both collide.
fn map_write_error(err: StoreError) -> AppError {
    if err.violates("email") {
        AppError::conflict("Email already exists")
    } else if err.violates("iin") {
        AppError::conflict("IIN already exists")
    } else {
        err.into()
    }
}

impl UserService {
    /// Creates a new user service.
    pub fn new(store: Arc<dyn UserStore>, hasher: PasswordHasher, config: &AuthConfig) -> Self {
        Self {
            store,
            hasher,
            default_role: config.default_role.clone(),
            password_min: config.password_min_length,
            password_max: config.password_max_length,
        }
    }

    /// Self-registration with the default role.
    pub async fn register(&self, input: RegisterUser) -> AppResult<UserView> {
        let (new_user, password) = self.validate_profile(input)?;
        let password_hash = self.hasher.hash(password).await?;
        let role_id = self.default_role_id().await?;

        let user = self
            .store
            .insert_user(NewUser {
                password_hash,
                role_id,
                ..new_user
            })
            .await
            .map_err(map_write_error)?;

        info!(user_id = %user.id, "User registered");
        Ok(user.into())
    }

    /// Admin creation. An explicit role must exist.
    pub async fn create(&self, input: CreateUser) -> AppResult<UserView> {
        let (new_user, password) = self.validate_profile(input.profile)?;
        let requested_role = input
            .role_id
            .as_deref()
            .map(validation::role_id)
            .transpose()?;

        let password_hash = self.hasher.hash(password).await?;
        let role_id = match requested_role {
            Some(role_id) => self.existing_role(role_id).await?,
            None => self.default_role_id().await?,
        };

        let user = self
            .store
            .insert_user(NewUser {
                password_hash,
                role_id,
                ..new_user
            })
            .await
            .map_err(map_write_error)?;

        info!(user_id = %user.id, role = %user.role.name, "User created");
        Ok(user.into())
    }

    /// All active users.
    pub async fn find_all(&self) -> AppResult<Vec<UserView>> {
        let users = self.store.list_active_users().await?;
        Ok(users.into_iter().map(UserView::from).collect())
    }

    /// A single user regardless of active status.
    pub async fn find_one(&self, id: UserId) -> AppResult<UserView> {
        self.require_user(id).await.map(UserView::from)
    }

    /// Internal lookup; `None` when absent.
    pub async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        Ok(self.store.find_user_by_id(id).await?)
    }

    /// Credential projection by email, including the hash.
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<UserCredentials>> {
        let email = fno_auth::credentials::normalize_email(email);
        Ok(self.store.find_user_by_email(&email).await?)
    }

    /// Partial update. Existence is checked before the role.
    pub async fn update(&self, id: UserId, input: UpdateUser) -> AppResult<UserView> {
        let changes = Self::validate_changes(&input)?;
        self.require_user(id).await?;

        if let Some(role_id) = changes.role_id {
            self.existing_role(role_id).await?;
        }

        let user = self
            .store
            .update_user(id, changes)
            .await
            .map_err(map_write_error)?
            .ok_or_else(|| user_not_found(id))?;

        info!(user_id = %id, "User updated");
        Ok(user.into())
    }

    /// Soft delete: the row stays, the active flag drops.
    pub async fn remove(&self, id: UserId) -> AppResult<UserView> {
        self.require_user(id).await?;

        let changes = UserChanges {
            is_active: Some(false),
            ..UserChanges::default()
        };
        let user = self
            .store
            .update_user(id, changes)
            .await?
            .ok_or_else(|| user_not_found(id))?;

        info!(user_id = %id, "User deactivated");
        Ok(user.into())
    }

    async fn require_user(&self, id: UserId) -> AppResult<User> {
        self.store
            .find_user_by_id(id)
            .await?
            .ok_or_else(|| user_not_found(id))
    }

    async fn existing_role(&self, role_id: RoleId) -> AppResult<RoleId> {
        match self.store.find_role_by_id(role_id).await? {
            Some(role) => Ok(role.id),
            None => Err(AppError::not_found(format!(
                "Role with ID {role_id} not found"
            ))),
        }
    }

    async fn default_role_id(&self) -> AppResult<RoleId> {
        match self.store.find_role_by_name(&self.default_role).await? {
            Some(role) => Ok(role.id),
            None => {
                error!(role = %self.default_role, "Default role is missing; run `fno-cli seed`");
                Err(AppError::configuration(format!(
                    "Default {} role not found. Please run database seed: fno-cli seed",
                    self.default_role
                )))
            }
        }
    }

    /// Validates a full profile. The returned `NewUser` still needs a
    /// hash and a role.
    fn validate_profile(&self, input: RegisterUser) -> AppResult<(NewUser, String)> {
        let email = validation::email(&input.email)?;
        validation::password(&input.password, self.password_min, self.password_max)?;
        let first_name = validation::required_name("firstName", &input.first_name)?;
        let last_name = validation::required_name("lastName", &input.last_name)?;
        let patronymic = validation::optional_name("patronymic", input.patronymic.as_deref())?;
        let iin = validation::iin(&input.iin)?;

        let new_user = NewUser {
            email,
            password_hash: String::new(),
            first_name,
            last_name,
            patronymic,
            iin,
            role_id: RoleId::default(),
        };
        Ok((new_user, input.password))
    }

    fn validate_changes(input: &UpdateUser) -> AppResult<UserChanges> {
        Ok(UserChanges {
            email: input.email.as_deref().map(validation::email).transpose()?,
            first_name: input
                .first_name
                .as_deref()
                .map(|v| validation::required_name("firstName", v))
                .transpose()?,
            last_name: input
                .last_name
                .as_deref()
                .map(|v| validation::required_name("lastName", v))
                .transpose()?,
            patronymic: input
                .patronymic
                .as_ref()
                .map(|v| validation::optional_name("patronymic", v.as_deref()))
                .transpose()?,
            iin: input.iin.as_deref().map(validation::iin).transpose()?,
            role_id: input
                .role_id
                .as_deref()
                .map(validation::role_id)
                .transpose()?,
            is_active: None,
        })
    }
}

fn user_not_found(id: UserId) -> AppError {
    AppError::not_found(format!("User with ID {id} not found"))
}
