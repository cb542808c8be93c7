//! Role seeding.

use fno_core::config::AppConfig;
use fno_core::error::AppError;
use fno_database::RoleRepository;

use crate::output;

/// Upsert the default and admin roles, then list every role.
/// Running it twice changes nothing.
pub async fn execute(config: &AppConfig) -> Result<(), AppError> {
    let pool = super::connect_postgres(config).await?;
    let roles = RoleRepository::new(pool.pool().clone());

    let result = async {
        for name in [&config.auth.default_role, &config.auth.admin_role] {
            roles.upsert(name).await?;
        }
        roles.list().await
    }
    .await;
    pool.close().await;

    let all = result?;
    output::print_success("Roles seeded.");
    output::print_roles(&all);
    Ok(())
}
