//! CLI command definitions and dispatch.

pub mod admin;
pub mod migrate;
pub mod seed;
pub mod serve;

use clap::{Parser, Subcommand};

use fno_core::config::{AppConfig, StoreBackend};
use fno_core::error::AppError;
use fno_database::DatabasePool;

/// FNO platform administration
#[derive(Debug, Parser)]
#[command(name = "fno-cli", version, about, long_about = None)]
pub struct Cli {
    /// Base configuration file, without extension
    #[arg(short, long, default_value = "config/default")]
    pub config: String,

    /// Environment overlay (`config/<env>.toml`); falls back to `FNO_ENV`
    #[arg(short, long)]
    pub env: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the HTTP server
    Serve(serve::ServeArgs),
    /// Run pending database migrations
    Migrate,
    /// Ensure the default and admin roles exist
    Seed,
    /// Admin user management
    Admin(admin::AdminArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        let config = self.load_config()?;
        match &self.command {
            Commands::Serve(args) => serve::execute(args, config).await,
            Commands::Migrate => migrate::execute(&config).await,
            Commands::Seed => seed::execute(&config).await,
            Commands::Admin(args) => admin::execute(args, &config).await,
        }
    }

    fn load_config(&self) -> Result<AppConfig, AppError> {
        let env = self
            .env
            .clone()
            .or_else(|| std::env::var("FNO_ENV").ok())
            .unwrap_or_else(|| "development".to_string());
        AppConfig::load_from(&self.config, &env)
    }
}

/// Helper: connect to PostgreSQL. Commands that persist anything refuse
/// the in-memory backend, since their effect would vanish on exit.
pub async fn connect_postgres(config: &AppConfig) -> Result<DatabasePool, AppError> {
    if config.database.backend != StoreBackend::Postgres {
        return Err(AppError::configuration(
            "This command requires database.backend = \"postgres\"",
        ));
    }
    DatabasePool::connect(&config.database).await
}
