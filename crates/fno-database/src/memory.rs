//! In-memory user store using a Tokio mutex, for tests and single-node development.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use tracing::{debug, info};

use fno_core::error::AppError;
use fno_core::types::{RoleId, UserId};
use fno_entity::user::{NewUser, Role, User, UserChanges, UserCredentials};

use crate::store::{StoreError, StoreResult, UserStore};

#[derive(Debug, Clone)]
struct StoredUser {
    user: User,
    password_hash: String,
}

#[derive(Debug, Default)]
struct InnerState {
    roles: Vec<Role>,
    /// Insertion order doubles as creation order.
    users: Vec<StoredUser>,
}

impl InnerState {
    /// Mirrors the `users_email_key` / `users_iin_key` constraints,
    /// reporting the first violated one.
    fn check_unique(&self, email: Option<&str>, iin: Option<&str>, skip: Option<UserId>) -> StoreResult<()> {
        let others = || self.users.iter().filter(move |s| Some(s.user.id) != skip);

        if let Some(email) = email {
            if others().any(|s| s.user.email == email) {
                return Err(StoreError::UniqueViolation {
                    fields: vec!["email".to_string()],
                });
            }
        }
        if let Some(iin) = iin {
            if others().any(|s| s.user.iin == iin) {
                return Err(StoreError::UniqueViolation {
                    fields: vec!["iin".to_string()],
                });
            }
        }
        Ok(())
    }

    fn role(&self, id: RoleId) -> StoreResult<Role> {
        self.roles
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| {
                StoreError::Backend(AppError::database(format!(
                    "Foreign key violation: role {id} does not exist"
                )))
            })
    }
}

/// Process-local [`UserStore`]. Data is lost when the process exits.
#[derive(Debug, Clone, Default)]
pub struct MemoryUserStore {
    state: Arc<Mutex<InnerState>>,
}

impl MemoryUserStore {
    /// Creates an empty store with no roles.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store with the given roles already seeded.
    pub async fn with_roles(names: &[&str]) -> Self {
        let store = Self::new();
        for name in names {
            store.seed_role(name).await;
        }
        store
    }

    /// Inserts a role if no role with that name exists and returns it.
    pub async fn seed_role(&self, name: &str) -> Role {
        let mut state = self.state.lock().await;
        if let Some(existing) = state.roles.iter().find(|r| r.name == name) {
            return existing.clone();
        }
        let role = Role::new(RoleId::new(), name);
        state.roles.push(role.clone());
        info!(role = %name, "Seeded role");
        role
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_user_by_id(&self, id: UserId) -> StoreResult<Option<User>> {
        let state = self.state.lock().await;
        Ok(state
            .users
            .iter()
            .find(|s| s.user.id == id)
            .map(|s| s.user.clone()))
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<UserCredentials>> {
        let state = self.state.lock().await;
        Ok(state
            .users
            .iter()
            .find(|s| s.user.email == email)
            .map(|s| UserCredentials {
                user: s.user.clone(),
                password_hash: s.password_hash.clone(),
            }))
    }

    async fn find_role_by_id(&self, id: RoleId) -> StoreResult<Option<Role>> {
        let state = self.state.lock().await;
        Ok(state.roles.iter().find(|r| r.id == id).cloned())
    }

    async fn find_role_by_name(&self, name: &str) -> StoreResult<Option<Role>> {
        let state = self.state.lock().await;
        Ok(state.roles.iter().find(|r| r.name == name).cloned())
    }

    async fn insert_user(&self, new_user: NewUser) -> StoreResult<User> {
        let mut state = self.state.lock().await;

        state.check_unique(Some(&new_user.email), Some(&new_user.iin), None)?;
        let role = state.role(new_user.role_id)?;

        let now = Utc::now();
        let user = User {
            id: UserId::new(),
            email: new_user.email,
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            patronymic: new_user.patronymic,
            iin: new_user.iin,
            role,
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        state.users.push(StoredUser {
            user: user.clone(),
            password_hash: new_user.password_hash,
        });
        debug!(user_id = %user.id, "User inserted into memory store");

        Ok(user)
    }

    async fn update_user(&self, id: UserId, changes: UserChanges) -> StoreResult<Option<User>> {
        let mut state = self.state.lock().await;

        if !state.users.iter().any(|s| s.user.id == id) {
            return Ok(None);
        }

        state.check_unique(changes.email.as_deref(), changes.iin.as_deref(), Some(id))?;
        let role = changes.role_id.map(|role_id| state.role(role_id)).transpose()?;

        let Some(stored) = state.users.iter_mut().find(|s| s.user.id == id) else {
            return Ok(None);
        };
        changes.apply_to(&mut stored.user, role);
        stored.user.updated_at = Utc::now();

        Ok(Some(stored.user.clone()))
    }

    async fn list_active_users(&self) -> StoreResult<Vec<User>> {
        let state = self.state.lock().await;
        Ok(state
            .users
            .iter()
            .filter(|s| s.user.is_active)
            .map(|s| s.user.clone())
            .collect())
    }

    async fn health_check(&self) -> StoreResult<bool> {
        Ok(true)
    }
}
