//! Authentication configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::secret::Secret;

/// Longest accepted access-token lifetime (7 days).
pub const MAX_ACCESS_TOKEN_TTL_SECONDS: u64 = 7 * 24 * 60 * 60;

/// Longest accepted refresh-token window (10 years).
pub const MAX_REFRESH_TOKEN_TTL_DAYS: u64 = 3650;

/// Credential, token, and trusted-caller configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for access-token signing (HMAC-SHA256).
    pub jwt_secret: Secret,
    /// Shared key presented by trusted server-to-server callers.
    pub api_key: Secret,
    /// Authorization scheme that prefixes the trusted-caller key.
    #[serde(default = "default_api_key_scheme")]
    pub api_key_scheme: String,
    /// Access token TTL in seconds.
    #[serde(default = "default_access_ttl")]
    pub access_token_ttl_seconds: u64,
    /// Refresh token validity window in days.
    #[serde(default = "default_refresh_ttl")]
    pub refresh_token_ttl_days: u64,
    /// Minimum password length for new credentials.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
}

impl AuthConfig {
    /// Builds a configuration with the given secrets and default windows.
    pub fn with_secrets(jwt_secret: impl Into<Secret>, api_key: impl Into<Secret>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            api_key: api_key.into(),
            api_key_scheme: default_api_key_scheme(),
            access_token_ttl_seconds: default_access_ttl(),
            refresh_token_ttl_days: default_refresh_ttl(),
            password_min_length: default_password_min(),
        }
    }

    /// Checks that secrets are present and windows are within bounds.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.jwt_secret.is_empty() {
            return Err(AppError::configuration("auth.jwt_secret must not be empty"));
        }
        if self.api_key.is_empty() {
            return Err(AppError::configuration("auth.api_key must not be empty"));
        }
        if self.api_key_scheme.trim().is_empty() || self.api_key_scheme.contains(char::is_whitespace) {
            return Err(AppError::configuration(
                "auth.api_key_scheme must be a single non-empty word",
            ));
        }
        if !(1..=MAX_ACCESS_TOKEN_TTL_SECONDS).contains(&self.access_token_ttl_seconds) {
            return Err(AppError::configuration(format!(
                "auth.access_token_ttl_seconds must be between 1 and {MAX_ACCESS_TOKEN_TTL_SECONDS}"
            )));
        }
        if !(1..=MAX_REFRESH_TOKEN_TTL_DAYS).contains(&self.refresh_token_ttl_days) {
            return Err(AppError::configuration(format!(
                "auth.refresh_token_ttl_days must be between 1 and {MAX_REFRESH_TOKEN_TTL_DAYS}"
            )));
        }
        Ok(())
    }
}

fn default_api_key_scheme() -> String {
    "ApiKey".to_string()
}

fn default_access_ttl() -> u64 {
    3600
}

fn default_refresh_ttl() -> u64 {
    60
}

fn default_password_min() -> usize {
    8
}
