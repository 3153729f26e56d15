//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use chirpy_core::types::UserId;

/// A registered account.
///
/// The serialized form is the public profile: the password hash is never
/// written out.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: UserId,
    /// Login email, unique across accounts.
    pub email: String,
    /// Argon2 password hash in PHC string format.
    #[serde(skip_serializing, default)]
    #[sqlx(rename = "hashed_password")]
    pub password_hash: String,
    /// Whether the account holds the paid membership.
    pub is_chirpy_red: bool,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a new user.
#[derive(Debug, Clone)]
pub struct CreateUser {
    /// Login email.
    pub email: String,
    /// Pre-hashed password.
    pub password_hash: String,
}

/// Replacement credentials for an existing user.
#[derive(Debug, Clone)]
pub struct UpdateCredentials {
    /// The user to update.
    pub id: UserId,
    /// New login email.
    pub email: String,
    /// New pre-hashed password.
    pub password_hash: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_profile_omits_password_hash() {
        let now = Utc::now();
        let user = User {
            id: UserId::new(),
            email: "walt@breakingbad.com".to_string(),
            password_hash: "$argon2id$v=19$...".to_string(),
            is_chirpy_red: false,
            created_at: now,
            updated_at: now,
        };

        let json = serde_json::to_value(&user).expect("serialize");
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["email"], "walt@breakingbad.com");
    }
}
