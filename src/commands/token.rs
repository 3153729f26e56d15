//! Access-token CLI commands. These need only the signing secret.

use clap::{Args, Subcommand};
use serde::Serialize;

use chirpy_auth::jwt::ttl_from_seconds;
use chirpy_auth::{JwtDecoder, JwtEncoder};
use chirpy_core::config::AppConfig;
use chirpy_core::error::AppError;
use chirpy_core::types::UserId;

use crate::output::{self, OutputFormat};

/// Arguments for token commands
#[derive(Debug, Args)]
pub struct TokenArgs {
    /// Token subcommand
    #[command(subcommand)]
    pub command: TokenCommand,
}

/// Token subcommands
#[derive(Debug, Subcommand)]
pub enum TokenCommand {
    /// Issue an access token for a user
    Issue {
        /// Subject user ID
        user_id: UserId,
        /// Lifetime in seconds (defaults to `auth.access_token_ttl_seconds`)
        #[arg(long)]
        ttl_seconds: Option<u64>,
    },
    /// Verify an access token and print its subject
    Verify {
        /// Access token
        token: String,
    },
}

#[derive(Debug, Serialize)]
struct VerifiedToken {
    subject: UserId,
}

/// Execute token commands
pub fn execute(args: &TokenArgs, config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    match &args.command {
        TokenCommand::Issue {
            user_id,
            ttl_seconds,
        } => {
            let encoder = JwtEncoder::from_config(&config.auth);
            let grant = match ttl_seconds {
                Some(0) => {
                    return Err(AppError::validation("--ttl-seconds must be positive"));
                }
                Some(secs) => encoder.issue(*user_id, ttl_from_seconds(*secs))?,
                None => encoder.issue_default(*user_id)?,
            };
            output::print_item(&grant, format);
        }
        TokenCommand::Verify { token } => {
            let subject = JwtDecoder::from_config(&config.auth).verify(token)?;
            output::print_item(&VerifiedToken { subject }, format);
        }
    }

    Ok(())
}
