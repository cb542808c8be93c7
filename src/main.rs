//! FNO Server: user management and authentication backend.
//!
//! Main entry point that wires the crates together and starts the server.

use tracing_subscriber::{EnvFilter, fmt};

use fno_core::config::AppConfig;
use fno_core::error::AppError;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Load and validate configuration from files and environment.
fn load_configuration() -> Result<AppConfig, AppError> {
    let base = std::env::var("FNO_CONFIG").unwrap_or_else(|_| "config/default".to_string());
    let env = std::env::var("FNO_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load_from(&base, &env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Connect the store, apply migrations, serve until a shutdown signal.
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        backend = ?config.database.backend,
        "Starting FNO server"
    );

    let (store, pool) = fno_api::connect_store(&config).await?;

    if let Some(ref pool) = pool {
        fno_database::migration::run_migrations(pool.pool()).await?;
    }

    let result = fno_api::serve(config, store).await;

    if let Some(pool) = pool {
        pool.close().await;
    }
    result
}
