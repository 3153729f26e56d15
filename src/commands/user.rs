//! User management CLI commands.

use clap::{Args, Subcommand};

use chirpy_auth::AccountManager;
use chirpy_core::config::AppConfig;
use chirpy_core::error::AppError;
use chirpy_core::types::UserId;

use crate::output::{self, OutputFormat};

/// Arguments for user commands
#[derive(Debug, Args)]
pub struct UserArgs {
    /// User subcommand
    #[command(subcommand)]
    pub command: UserCommand,
}

/// User subcommands
#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// Register a new user
    Create {
        /// Login email
        #[arg(short, long)]
        email: String,
        /// Password (prompted when omitted)
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Grant the Chirpy Red membership
    Upgrade {
        /// User ID
        user_id: UserId,
    },
}

/// Execute user commands
pub async fn execute(
    args: &UserArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let db = super::connect(config).await?;
    let accounts = AccountManager::from_config(&config.auth, db.users());

    let result = match &args.command {
        UserCommand::Create { email, password } => {
            let password = super::read_password(password.as_deref(), true)?;
            accounts.register(email, &password).await
        }
        UserCommand::Upgrade { user_id } => accounts.upgrade_membership(*user_id).await,
    };

    db.close().await;
    let user = result?;

    output::print_item(&user, format);
    Ok(())
}
