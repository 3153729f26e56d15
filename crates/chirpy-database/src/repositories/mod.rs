//! Repository traits and their PostgreSQL implementations.
//!
//! Storage backends report uniqueness violations as
//! [`ErrorKind::Conflict`](chirpy_core::error::ErrorKind::Conflict) so
//! callers never inspect backend-specific error shapes.

pub mod refresh_token;
pub mod user;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use chirpy_core::error::{AppError, ErrorKind};
use chirpy_core::result::AppResult;
use chirpy_core::types::UserId;
use chirpy_entity::refresh_token::{CreateRefreshToken, RefreshToken};
use chirpy_entity::user::{CreateUser, UpdateCredentials, User};

pub use refresh_token::PgRefreshTokenRepository;
pub use user::PgUserRepository;

/// Persistence of user records.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Find a user by primary key.
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>>;

    /// Find a user by email (case-insensitive).
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Insert a new user. A taken email yields a `Conflict` error.
    async fn create(&self, data: &CreateUser) -> AppResult<User>;

    /// Replace email and password hash. `None` if the user does not exist.
    async fn update_credentials(&self, data: &UpdateCredentials) -> AppResult<Option<User>>;

    /// Set the membership flag. `None` if the user does not exist.
    async fn upgrade_to_chirpy_red(&self, id: UserId) -> AppResult<Option<User>>;
}

/// Persistence of refresh tokens.
///
/// Every method is a single-row atomic operation.
#[async_trait]
pub trait RefreshTokenRepository: Send + Sync + 'static {
    /// Insert a new token with `revoked_at` unset. A duplicate token value
    /// yields a `Conflict` error.
    async fn create(&self, data: &CreateRefreshToken) -> AppResult<RefreshToken>;

    /// Point lookup by token value.
    async fn find_by_token(&self, token: &str) -> AppResult<Option<RefreshToken>>;

    /// Stamp `revoked_at` and `updated_at` unless the token is already
    /// revoked, in which case the row is left untouched. Returns the row as
    /// stored afterwards, or `None` if no such token exists.
    async fn revoke(&self, token: &str, revoked_at: DateTime<Utc>)
    -> AppResult<Option<RefreshToken>>;
}

/// Map a sqlx error from a write, tagging unique violations as conflicts.
pub(crate) fn map_write_error(err: sqlx::Error, context: &str, conflict: &str) -> AppError {
    if let sqlx::Error::Database(db) = &err {
        if db.is_unique_violation() {
            return AppError::conflict(conflict);
        }
    }
    AppError::with_source(ErrorKind::Database, context, err)
}

/// Map a sqlx error from a read.
pub(crate) fn map_read_error(err: sqlx::Error, context: &str) -> AppError {
    AppError::with_source(ErrorKind::Database, context, err)
}
