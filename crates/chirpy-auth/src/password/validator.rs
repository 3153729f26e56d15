//! Password policy for new credentials.

use chirpy_core::config::AuthConfig;
use chirpy_core::error::AppError;

/// Upper bound on accepted password length, in bytes.
const MAX_PASSWORD_BYTES: usize = 1024;

/// Validates new passwords against the configured policy.
#[derive(Debug, Clone)]
pub struct PasswordValidator {
    /// Minimum password length in characters.
    min_length: usize,
}

impl PasswordValidator {
    /// Creates a new validator from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self::with_min_length(config.password_min_length)
    }

    /// Creates a validator with an explicit minimum length.
    pub fn with_min_length(min_length: usize) -> Self {
        Self { min_length }
    }

    /// Returns the first policy violation, if any.
    pub fn validate(&self, password: &str) -> Result<(), AppError> {
        if password.trim().is_empty() {
            return Err(AppError::validation("Password is required"));
        }

        if password.chars().count() < self.min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters long",
                self.min_length
            )));
        }

        if password.len() > MAX_PASSWORD_BYTES {
            return Err(AppError::validation(format!(
                "Password must be at most {MAX_PASSWORD_BYTES} bytes long"
            )));
        }

        Ok(())
    }
}
