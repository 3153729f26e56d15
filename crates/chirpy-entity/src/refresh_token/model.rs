//! Refresh token entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use chirpy_core::types::UserId;

/// A long-lived opaque credential exchanged for new access tokens.
///
/// Only `revoked_at` and `updated_at` ever change after insert, and
/// `revoked_at` never goes back to `None`. Rows are kept after expiry or
/// revocation for audit.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RefreshToken {
    /// The token value itself (64 hex characters), primary key.
    pub token: String,
    /// The user this token authenticates.
    pub user_id: UserId,
    /// When the token was issued.
    pub created_at: DateTime<Utc>,
    /// When the row was last written.
    pub updated_at: DateTime<Utc>,
    /// End of the validity window.
    pub expires_at: DateTime<Utc>,
    /// When the token was explicitly revoked, if ever.
    pub revoked_at: Option<DateTime<Utc>>,
}

/// Lifecycle state of a refresh token at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenState {
    /// Usable for refresh.
    Active,
    /// Past `expires_at`; never persisted as such.
    Expired,
    /// Explicitly revoked.
    Revoked,
}

impl TokenState {
    /// Return the state as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Expired => "expired",
            Self::Revoked => "revoked",
        }
    }
}

impl std::fmt::Display for TokenState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl RefreshToken {
    /// State of the token at `now`. Revocation wins over expiry.
    pub fn state_at(&self, now: DateTime<Utc>) -> TokenState {
        if self.revoked_at.is_some() {
            TokenState::Revoked
        } else if now >= self.expires_at {
            TokenState::Expired
        } else {
            TokenState::Active
        }
    }

    /// Whether the token may be exchanged for an access token at `now`.
    pub fn is_usable_at(&self, now: DateTime<Utc>) -> bool {
        self.state_at(now) == TokenState::Active
    }

    /// Whether the token has been revoked.
    pub fn is_revoked(&self) -> bool {
        self.revoked_at.is_some()
    }
}

/// Data required to persist a newly issued refresh token.
#[derive(Debug, Clone)]
pub struct CreateRefreshToken {
    /// Token value.
    pub token: String,
    /// Owning user.
    pub user_id: UserId,
    /// Issue instant; also the initial `updated_at`.
    pub created_at: DateTime<Utc>,
    /// End of the validity window.
    pub expires_at: DateTime<Utc>,
}

impl CreateRefreshToken {
    /// Builds the row that will be stored, with `revoked_at` unset.
    pub fn into_record(self) -> RefreshToken {
        RefreshToken {
            token: self.token,
            user_id: self.user_id,
            created_at: self.created_at,
            updated_at: self.created_at,
            expires_at: self.expires_at,
            revoked_at: None,
        }
    }
}
