//! Database migrations.

use fno_core::config::AppConfig;
use fno_core::error::AppError;

use crate::output;

/// Apply all pending migrations.
pub async fn execute(config: &AppConfig) -> Result<(), AppError> {
    let pool = super::connect_postgres(config).await?;

    println!("Running database migrations...");
    let result = fno_database::migration::run_migrations(pool.pool()).await;
    pool.close().await;
    result?;

    output::print_success("All migrations applied successfully.");
    Ok(())
}
