//! Resource ownership checks.

use tracing::warn;

use chirpy_core::error::AppError;
use chirpy_core::types::UserId;
use chirpy_entity::refresh_token::RefreshToken;
use chirpy_entity::user::User;

/// A resource that belongs to exactly one user.
pub trait Owned {
    /// The owning user.
    fn owner_id(&self) -> UserId;
}

impl Owned for User {
    fn owner_id(&self) -> UserId {
        self.id
    }
}

impl Owned for RefreshToken {
    fn owner_id(&self) -> UserId {
        self.user_id
    }
}

/// Allows mutating actions only when the caller owns the resource.
///
/// A refusal is a forbidden error, never an authentication error: the
/// caller is known, just not entitled.
#[derive(Debug, Clone, Copy, Default)]
pub struct OwnershipGuard;

impl OwnershipGuard {
    /// Creates a new guard.
    pub fn new() -> Self {
        Self
    }

    /// Allows the action iff `subject` is `owner`.
    pub fn authorize_owner_action(&self, subject: UserId, owner: UserId) -> Result<(), AppError> {
        authorize_owner_action(subject, owner)
    }

    /// Allows the action iff `subject` owns `resource`.
    pub fn authorize_owned<R: Owned + ?Sized>(
        &self,
        subject: UserId,
        resource: &R,
    ) -> Result<(), AppError> {
        authorize_owner_action(subject, resource.owner_id())
    }
}

/// Allows the action iff `subject` is `owner`.
pub fn authorize_owner_action(subject: UserId, owner: UserId) -> Result<(), AppError> {
    if subject == owner {
        return Ok(());
    }

    warn!(subject = %subject, owner = %owner, "Action on another user's resource denied");
    Err(AppError::forbidden(
        "You do not have permission to modify this resource",
    ))
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use chirpy_core::error::ErrorKind;
    use chirpy_entity::refresh_token::CreateRefreshToken;

    use super::*;

    #[test]
    fn test_owner_is_allowed() {
        let id = UserId::new();
        assert!(authorize_owner_action(id, id).is_ok());
    }

    #[test]
    fn test_other_user_is_forbidden() {
        let err = OwnershipGuard::new()
            .authorize_owner_action(UserId::new(), UserId::new())
            .unwrap_err();
        assert!(err.is(ErrorKind::Forbidden));
        assert_eq!(err.status_code(), 403);
    }

    #[test]
    fn test_authorize_owned_uses_owner_id() {
        let owner = UserId::new();
        let now = Utc::now();
        let token = CreateRefreshToken {
            token: "ab".repeat(32),
            user_id: owner,
            created_at: now,
            expires_at: now + Duration::days(60),
        }
        .into_record();

        let guard = OwnershipGuard::new();
        assert!(guard.authorize_owned(owner, &token).is_ok());
        assert!(
            guard
                .authorize_owned(UserId::new(), &token)
                .unwrap_err()
                .is(ErrorKind::Forbidden)
        );
    }
}
