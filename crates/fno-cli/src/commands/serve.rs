//! Start the FNO server.

use clap::Args;

use fno_core::config::AppConfig;
use fno_core::error::AppError;

/// Arguments for the serve command
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Override the server port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Override the server host
    #[arg(long)]
    pub host: Option<String>,

    /// Skip running migrations on startup
    #[arg(long)]
    pub no_migrate: bool,
}

/// Execute the serve command
pub async fn execute(args: &ServeArgs, mut config: AppConfig) -> Result<(), AppError> {
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(ref host) = args.host {
        config.server.host = host.clone();
    }

    println!("Starting FNO server...");
    println!("  Host: {}", config.server.host);
    println!("  Port: {}", config.server.port);

    let (store, pool) = fno_api::connect_store(&config).await?;

    if let Some(ref pool) = pool {
        if !args.no_migrate {
            fno_database::migration::run_migrations(pool.pool()).await?;
        }
    }

    let result = fno_api::serve(config, store).await;
    if let Some(pool) = pool {
        pool.close().await;
    }
    result
}
