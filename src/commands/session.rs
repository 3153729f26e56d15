//! Session CLI commands: login, refresh and revoke.

use clap::{Args, Subcommand};

use chirpy_auth::SessionManager;
use chirpy_core::config::AppConfig;
use chirpy_core::error::AppError;

use crate::output::{self, OutputFormat};

/// Arguments for session commands
#[derive(Debug, Args)]
pub struct SessionArgs {
    /// Session subcommand
    #[command(subcommand)]
    pub command: SessionCommand,
}

/// Session subcommands
#[derive(Debug, Subcommand)]
pub enum SessionCommand {
    /// Log in and print an access token and a refresh token
    Login {
        /// Login email
        #[arg(short, long)]
        email: String,
        /// Password (prompted when omitted)
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Exchange a refresh token for a new access token
    Refresh {
        /// Refresh token
        token: String,
    },
    /// Revoke a refresh token
    Revoke {
        /// Refresh token
        token: String,
    },
}

/// Execute session commands
pub async fn execute(
    args: &SessionArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let db = super::connect(config).await?;
    let sessions = SessionManager::from_config(&config.auth, db.users(), db.refresh_tokens());

    let result = run(&sessions, &args.command, format).await;
    db.close().await;
    result
}

async fn run(
    sessions: &SessionManager,
    command: &SessionCommand,
    format: OutputFormat,
) -> Result<(), AppError> {
    match command {
        SessionCommand::Login { email, password } => {
            let password = super::read_password(password.as_deref(), false)?;
            let login = sessions.login(email, &password).await?;
            output::print_item(&login, format);
        }
        SessionCommand::Refresh { token } => {
            let grant = sessions.refresh(token).await?;
            output::print_item(&grant, format);
        }
        SessionCommand::Revoke { token } => {
            sessions.revoke_session(token).await?;
            output::print_success("Refresh token revoked.");
        }
    }

    Ok(())
}
