//! CLI command definitions and dispatch.

pub mod migrate;
pub mod session;
pub mod token;
pub mod user;

use clap::{Parser, Subcommand};

use chirpy_core::config::AppConfig;
use chirpy_core::error::AppError;
use chirpy_database::DatabasePool;

use crate::output::OutputFormat;

/// Chirpy: credential and session administration
#[derive(Debug, Parser)]
#[command(name = "chirpy", version, about, long_about = None)]
pub struct Cli {
    /// Explicit configuration file (skips the `config/` layering)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Environment overlay loaded from `config/{env}`
    #[arg(long, env = "CHIRPY_ENV", default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// User account management
    User(user::UserArgs),
    /// Login, refresh and revoke sessions
    Session(session::SessionArgs),
    /// Issue and inspect access tokens
    Token(token::TokenArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: &AppConfig) -> Result<(), AppError> {
        match &self.command {
            Commands::Migrate(args) => migrate::execute(args, config).await,
            Commands::User(args) => user::execute(args, config, self.format).await,
            Commands::Session(args) => session::execute(args, config, self.format).await,
            Commands::Token(args) => token::execute(args, config, self.format),
        }
    }
}

/// Helper: open the database pool from config
pub async fn connect(config: &AppConfig) -> Result<DatabasePool, AppError> {
    DatabasePool::connect(&config.database).await
}

/// Helper: read a password, prompting when it was not given on the command
/// line.
pub fn read_password(given: Option<&str>, confirm: bool) -> Result<String, AppError> {
    if let Some(password) = given {
        return Ok(password.to_string());
    }

    let mut prompt = dialoguer::Password::new().with_prompt("Password");
    if confirm {
        prompt = prompt.with_confirmation("Confirm password", "Passwords do not match");
    }
    prompt
        .interact()
        .map_err(|e| AppError::internal(format!("Input error: {e}")))
}
