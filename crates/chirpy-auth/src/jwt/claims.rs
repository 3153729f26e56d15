//! JWT claims structure used in access tokens.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use chirpy_core::error::AppError;
use chirpy_core::types::UserId;

/// Fixed `iss` claim of every token this service issues.
pub const ISSUER: &str = "chirpy";

/// JWT claims payload embedded in every access token.
///
/// `sub` stays a string on the wire; it is parsed into a [`UserId`] only
/// after the signature and expiry checks pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Issuer, always [`ISSUER`].
    pub iss: String,
    /// Subject, the user ID.
    pub sub: String,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

impl Claims {
    /// Claims for `subject` valid for `ttl` from now.
    ///
    /// A `ttl` that lands outside the representable calendar is a
    /// validation error.
    pub fn new(subject: UserId, ttl: Duration) -> Result<Self, AppError> {
        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(ttl)
            .ok_or_else(|| AppError::validation("Access token lifetime is out of range"))?;

        Ok(Self {
            iss: ISSUER.to_string(),
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        })
    }

    /// Returns the expiration as a `DateTime<Utc>`.
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    /// Checks whether this token has expired.
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}
