//! Access-token issuance.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};

use chirpy_core::config::AuthConfig;
use chirpy_core::error::AppError;
use chirpy_core::secret::Secret;
use chirpy_core::types::UserId;

use super::claims::Claims;

/// A freshly issued access token and its expiry instant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessGrant {
    /// The signed JWT.
    pub token: String,
    /// When the token stops verifying.
    pub expires_at: DateTime<Utc>,
}

/// Signs access tokens with the server secret.
#[derive(Clone)]
pub struct JwtEncoder {
    encoding_key: EncodingKey,
    /// Default lifetime used by [`JwtEncoder::issue_default`].
    access_ttl: Duration,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("access_ttl", &self.access_ttl)
            .finish_non_exhaustive()
    }
}

impl JwtEncoder {
    /// Creates an encoder for `secret` whose default lifetime is `access_ttl`.
    pub fn new(secret: &Secret, access_ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            access_ttl,
        }
    }

    /// Creates an encoder from auth configuration.
    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(
            &config.jwt_secret,
            ttl_from_seconds(config.access_token_ttl_seconds),
        )
    }

    /// Issues a token for `subject` valid for `ttl`.
    pub fn issue(&self, subject: UserId, ttl: Duration) -> Result<AccessGrant, AppError> {
        let claims = Claims::new(subject, ttl)?;

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode access token: {e}")))?;

        Ok(AccessGrant {
            token,
            expires_at: claims.expires_at(),
        })
    }

    /// Issues a token for `subject` with the configured lifetime.
    pub fn issue_default(&self, subject: UserId) -> Result<AccessGrant, AppError> {
        self.issue(subject, self.access_ttl)
    }
}

/// Converts a configured lifetime in seconds, saturating at the largest
/// representable duration. Issuing with a saturated lifetime fails cleanly.
pub fn ttl_from_seconds(seconds: u64) -> Duration {
    i64::try_from(seconds)
        .ok()
        .and_then(Duration::try_seconds)
        .unwrap_or(Duration::MAX)
}

/// Issues a signed access token for `subject`, keyed by `secret`, valid for
/// `ttl`.
pub fn issue(subject: UserId, secret: &Secret, ttl: Duration) -> Result<String, AppError> {
    JwtEncoder::new(secret, ttl)
        .issue_default(subject)
        .map(|grant| grant.token)
}
