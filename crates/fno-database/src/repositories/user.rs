//! PostgreSQL user store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::debug;

use fno_core::error::{AppError, ErrorKind};
use fno_core::types::{RoleId, UserId};
use fno_entity::user::{NewUser, Role, User, UserChanges, UserCredentials};

use super::map_write_error;
use crate::store::{StoreResult, UserStore};

/// Column list shared by every user read. `u` is the user row
/// (or CTE) and `r` the joined role.
const USER_COLUMNS: &str = "u.id, u.email, u.first_name, u.last_name, u.patronymic, u.iin, \
     u.is_active, u.created_at, u.updated_at, r.id AS role_id, r.name AS role_name";

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: UserId,
    email: String,
    first_name: String,
    last_name: String,
    patronymic: Option<String>,
    iin: String,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    role_id: RoleId,
    role_name: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            email: row.email,
            first_name: row.first_name,
            last_name: row.last_name,
            patronymic: row.patronymic,
            iin: row.iin,
            role: Role::new(row.role_id, row.role_name),
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CredentialRow {
    #[sqlx(flatten)]
    user: UserRow,
    password_hash: String,
}

#[derive(Debug, sqlx::FromRow)]
struct RoleRow {
    id: RoleId,
    name: String,
}

fn read_error(context: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| AppError::with_source(ErrorKind::Database, context, e)
}

/// [`UserStore`] over the `users` and `user_roles` tables.
#[derive(Debug, Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    /// Create a new store over the given pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_user_by_id(&self, id: UserId) -> StoreResult<Option<User>> {
        let sql = format!(
            "SELECT {USER_COLUMNS} FROM users u JOIN user_roles r ON r.id = u.role_id WHERE u.id = $1"
        );
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(read_error("Failed to find user by id"))?;
        Ok(row.map(User::from))
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<UserCredentials>> {
        let sql = format!(
            "SELECT {USER_COLUMNS}, u.password_hash FROM users u \
             JOIN user_roles r ON r.id = u.role_id WHERE u.email = $1"
        );
        let row = sqlx::query_as::<_, CredentialRow>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(read_error("Failed to find user by email"))?;
        Ok(row.map(|row| UserCredentials {
            user: row.user.into(),
            password_hash: row.password_hash,
        }))
    }

    async fn find_role_by_id(&self, id: RoleId) -> StoreResult<Option<Role>> {
        let row = sqlx::query_as::<_, RoleRow>("SELECT id, name FROM user_roles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(read_error("Failed to find role by id"))?;
        Ok(row.map(|r| Role::new(r.id, r.name)))
    }

    async fn find_role_by_name(&self, name: &str) -> StoreResult<Option<Role>> {
        let row = sqlx::query_as::<_, RoleRow>("SELECT id, name FROM user_roles WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(read_error("Failed to find role by name"))?;
        Ok(row.map(|r| Role::new(r.id, r.name)))
    }

    async fn insert_user(&self, new_user: NewUser) -> StoreResult<User> {
        let sql = format!(
            "WITH u AS ( \
                 INSERT INTO users (id, email, password_hash, first_name, last_name, patronymic, iin, role_id) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
                 RETURNING * \
             ) \
             SELECT {USER_COLUMNS} FROM u JOIN user_roles r ON r.id = u.role_id"
        );
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(UserId::new())
            .bind(&new_user.email)
            .bind(&new_user.password_hash)
            .bind(&new_user.first_name)
            .bind(&new_user.last_name)
            .bind(&new_user.patronymic)
            .bind(&new_user.iin)
            .bind(new_user.role_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_write_error(e, "Failed to insert user"))?;

        debug!(user_id = %row.id, "User inserted");
        Ok(row.into())
    }

    async fn update_user(&self, id: UserId, changes: UserChanges) -> StoreResult<Option<User>> {
        let (clear_or_set_patronymic, patronymic) = match changes.patronymic {
            Some(value) => (true, value),
            None => (false, None),
        };

        let sql = format!(
            "WITH u AS ( \
                 UPDATE users SET \
                     email = COALESCE($2, email), \
                     first_name = COALESCE($3, first_name), \
                     last_name = COALESCE($4, last_name), \
                     patronymic = CASE WHEN $5 THEN $6 ELSE patronymic END, \
                     iin = COALESCE($7, iin), \
                     role_id = COALESCE($8, role_id), \
                     is_active = COALESCE($9, is_active), \
                     updated_at = NOW() \
                 WHERE id = $1 \
                 RETURNING * \
             ) \
             SELECT {USER_COLUMNS} FROM u JOIN user_roles r ON r.id = u.role_id"
        );
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(id)
            .bind(changes.email)
            .bind(changes.first_name)
            .bind(changes.last_name)
            .bind(clear_or_set_patronymic)
            .bind(patronymic)
            .bind(changes.iin)
            .bind(changes.role_id)
            .bind(changes.is_active)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_write_error(e, "Failed to update user"))?;

        Ok(row.map(User::from))
    }

    async fn list_active_users(&self) -> StoreResult<Vec<User>> {
        let sql = format!(
            "SELECT {USER_COLUMNS} FROM users u JOIN user_roles r ON r.id = u.role_id \
             WHERE u.is_active ORDER BY u.created_at ASC"
        );
        let rows = sqlx::query_as::<_, UserRow>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(read_error("Failed to list users"))?;
        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn health_check(&self) -> StoreResult<bool> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(read_error("Database health check failed"))?;
        Ok(true)
    }
}
