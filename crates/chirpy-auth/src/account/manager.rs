//! Account lifecycle: registration, credential changes, membership.

use std::sync::Arc;

use tracing::info;
use validator::Validate;

use chirpy_core::config::AuthConfig;
use chirpy_core::error::AppError;
use chirpy_core::types::UserId;
use chirpy_database::repositories::UserRepository;
use chirpy_entity::user::{CreateUser, UpdateCredentials, User};

use crate::password::{PasswordHasher, PasswordValidator};

/// Creates and updates user accounts.
///
/// Plaintext passwords stop here: only hashes reach the repository.
#[derive(Clone)]
pub struct AccountManager {
    user_repo: Arc<dyn UserRepository>,
    password_hasher: Arc<PasswordHasher>,
    password_validator: PasswordValidator,
}

impl std::fmt::Debug for AccountManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountManager")
            .field("password_validator", &self.password_validator)
            .finish_non_exhaustive()
    }
}

impl AccountManager {
    /// Creates an account manager from its collaborators.
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        password_hasher: Arc<PasswordHasher>,
        password_validator: PasswordValidator,
    ) -> Self {
        Self {
            user_repo,
            password_hasher,
            password_validator,
        }
    }

    /// Wires an account manager from auth configuration.
    pub fn from_config(config: &AuthConfig, user_repo: Arc<dyn UserRepository>) -> Self {
        Self::new(
            user_repo,
            Arc::new(PasswordHasher::new()),
            PasswordValidator::new(config),
        )
    }

    /// Registers a new user. A taken email is a conflict.
    pub async fn register(&self, email: &str, password: &str) -> Result<User, AppError> {
        let email = validate_email(email)?;
        self.password_validator.validate(password)?;

        let password_hash = self.password_hasher.hash(password)?;
        let user = self
            .user_repo
            .create(&CreateUser {
                email,
                password_hash,
            })
            .await?;

        info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    /// Replaces the email and password of `subject`.
    pub async fn update_credentials(
        &self,
        subject: UserId,
        email: &str,
        password: &str,
    ) -> Result<User, AppError> {
        let email = validate_email(email)?;
        self.password_validator.validate(password)?;

        let password_hash = self.password_hasher.hash(password)?;
        let user = self
            .user_repo
            .update_credentials(&UpdateCredentials {
                id: subject,
                email,
                password_hash,
            })
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {subject} not found")))?;

        info!(user_id = %user.id, "User credentials updated");
        Ok(user)
    }

    /// Grants the paid membership to `user_id`.
    pub async fn upgrade_membership(&self, user_id: UserId) -> Result<User, AppError> {
        let user = self
            .user_repo
            .upgrade_to_chirpy_red(user_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {user_id} not found")))?;

        info!(user_id = %user.id, "User upgraded to Chirpy Red");
        Ok(user)
    }
}

/// Email as submitted for registration or a credential change.
#[derive(Debug, Validate)]
struct EmailInput {
    #[validate(email(message = "Email must be a valid address"))]
    email: String,
}

/// Trims the address and checks it is a well-formed email.
fn validate_email(email: &str) -> Result<String, AppError> {
    let input = EmailInput {
        email: email.trim().to_string(),
    };
    if input.email.is_empty() {
        return Err(AppError::validation("Email is required"));
    }
    input
        .validate()
        .map_err(|_| AppError::validation("Email must be a valid address"))?;
    Ok(input.email)
}
