//! Role seeding and listing.

use sqlx::PgPool;
use tracing::info;

use fno_core::error::{AppError, ErrorKind};
use fno_core::result::AppResult;
use fno_core::types::RoleId;
use fno_entity::user::Role;

/// Repository for the `user_roles` table.
#[derive(Debug, Clone)]
pub struct RoleRepository {
    pool: PgPool,
}

impl RoleRepository {
    /// Create a new role repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert the role if missing; existing rows keep their id.
    pub async fn upsert(&self, name: &str) -> AppResult<Role> {
        let (id, name): (RoleId, String) = sqlx::query_as(
            "INSERT INTO user_roles (id, name) VALUES ($1, $2) \
             ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name \
             RETURNING id, name",
        )
        .bind(RoleId::new())
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to upsert role", e))?;

        info!(role = %name, role_id = %id, "Role ensured");
        Ok(Role::new(id, name))
    }

    /// List all roles by name.
    pub async fn list(&self) -> AppResult<Vec<Role>> {
        let rows: Vec<(RoleId, String)> =
            sqlx::query_as("SELECT id, name FROM user_roles ORDER BY name ASC")
                .fetch_all(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to list roles", e)
                })?;
        Ok(rows.into_iter().map(|(id, name)| Role::new(id, name)).collect())
    }
}
