//! Admin user management commands.

use std::sync::Arc;

use clap::{Args, Subcommand};

use fno_auth::PasswordHasher;
use fno_core::config::AppConfig;
use fno_core::error::AppError;
use fno_database::{PgUserStore, UserStore};
use fno_service::{CreateUser, RegisterUser, UserService};

use crate::output;

/// Arguments for admin commands
#[derive(Debug, Args)]
pub struct AdminArgs {
    /// Admin subcommand
    #[command(subcommand)]
    pub command: AdminCommand,
}

/// Admin subcommands
#[derive(Debug, Subcommand)]
pub enum AdminCommand {
    /// Create a user holding the admin role
    Create {
        /// Email
        #[arg(short, long)]
        email: Option<String>,
        /// First name
        #[arg(long)]
        first_name: Option<String>,
        /// Last name
        #[arg(long)]
        last_name: Option<String>,
        /// Patronymic
        #[arg(long)]
        patronymic: Option<String>,
        /// 12-digit IIN
        #[arg(long)]
        iin: Option<String>,
        /// Password (will prompt if not provided)
        #[arg(short, long)]
        password: Option<String>,
    },
}

fn input_error(e: dialoguer::Error) -> AppError {
    AppError::internal(format!("Input error: {e}"))
}

fn prompt(value: &Option<String>, label: &str) -> Result<String, AppError> {
    match value {
        Some(v) => Ok(v.clone()),
        None => dialoguer::Input::new()
            .with_prompt(label)
            .interact_text()
            .map_err(input_error),
    }
}

/// Execute admin commands
pub async fn execute(args: &AdminArgs, config: &AppConfig) -> Result<(), AppError> {
    match &args.command {
        AdminCommand::Create {
            email,
            first_name,
            last_name,
            patronymic,
            iin,
            password,
        } => {
            let email = prompt(email, "Admin email")?;
            let first_name = prompt(first_name, "First name")?;
            let last_name = prompt(last_name, "Last name")?;
            let iin = prompt(iin, "IIN")?;
            let password = match password {
                Some(p) => p.clone(),
                None => dialoguer::Password::new()
                    .with_prompt("Admin password")
                    .with_confirmation("Confirm password", "Passwords do not match")
                    .interact()
                    .map_err(input_error)?,
            };

            let pool = super::connect_postgres(config).await?;
            let store: Arc<dyn UserStore> = Arc::new(PgUserStore::new(pool.pool().clone()));
            let users = UserService::new(Arc::clone(&store), PasswordHasher::new(), &config.auth);

            let result = async {
                let admin_role = store
                    .find_role_by_name(&config.auth.admin_role)
                    .await?
                    .ok_or_else(|| {
                        AppError::configuration(format!(
                            "{} role not found. Run `fno-cli seed` first",
                            config.auth.admin_role
                        ))
                    })?;

                users
                    .create(CreateUser {
                        profile: RegisterUser {
                            email,
                            password,
                            first_name,
                            last_name,
                            patronymic: patronymic.clone(),
                            iin,
                        },
                        role_id: Some(admin_role.id.to_string()),
                    })
                    .await
            }
            .await;
            pool.close().await;

            let user = result?;
            output::print_success(&format!(
                "Admin user '{}' created (id: {})",
                user.email, user.id
            ));
        }
    }

    Ok(())
}
