//! Refresh-token persistence and lifecycle operations.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use chirpy_core::config::AuthConfig;
use chirpy_core::error::AppError;
use chirpy_core::types::UserId;
use chirpy_database::repositories::RefreshTokenRepository;
use chirpy_entity::refresh_token::{CreateRefreshToken, RefreshToken};

use super::generator::generate_refresh_token;

/// Default validity window for new refresh tokens.
pub const DEFAULT_REFRESH_TTL_DAYS: i64 = 60;

/// Issues, looks up and revokes refresh tokens over a repository.
#[derive(Clone)]
pub struct RefreshTokenStore {
    repo: Arc<dyn RefreshTokenRepository>,
    /// Validity window applied by [`RefreshTokenStore::issue_for`].
    ttl: Duration,
}

impl std::fmt::Debug for RefreshTokenStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefreshTokenStore")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl RefreshTokenStore {
    /// Creates a store with an explicit validity window.
    pub fn new(repo: Arc<dyn RefreshTokenRepository>, ttl: Duration) -> Self {
        Self { repo, ttl }
    }

    /// Creates a store using `refresh_token_ttl_days` from configuration.
    pub fn from_config(repo: Arc<dyn RefreshTokenRepository>, config: &AuthConfig) -> Self {
        let ttl = i64::try_from(config.refresh_token_ttl_days)
            .ok()
            .and_then(Duration::try_days)
            .unwrap_or(Duration::MAX);
        Self::new(repo, ttl)
    }

    /// Validity window of tokens issued by this store.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Generates a new random token value.
    pub fn generate(&self) -> Result<String, AppError> {
        generate_refresh_token()
    }

    /// Persists `token` for `user_id` with `revoked_at` unset.
    ///
    /// An existing token with the same value is a conflict.
    pub async fn create(
        &self,
        token: String,
        user_id: UserId,
        created_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Result<RefreshToken, AppError> {
        let data = CreateRefreshToken {
            token,
            user_id,
            created_at,
            expires_at,
        };
        self.repo.create(&data).await
    }

    /// Generates and persists a token for `user_id`, valid from now for the
    /// configured window.
    pub async fn issue_for(&self, user_id: UserId) -> Result<RefreshToken, AppError> {
        let token = self.generate()?;
        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(self.ttl)
            .ok_or_else(|| AppError::configuration("Refresh token lifetime is out of range"))?;
        let record = self.create(token, user_id, now, expires_at).await?;

        debug!(user_id = %user_id, expires_at = %record.expires_at, "Refresh token issued");
        Ok(record)
    }

    /// Looks up a token by value.
    pub async fn get(&self, token: &str) -> Result<RefreshToken, AppError> {
        self.repo
            .find_by_token(token)
            .await?
            .ok_or_else(|| AppError::not_found("Refresh token not found"))
    }

    /// Marks a token revoked at `revoked_at`.
    ///
    /// Revoking twice leaves the first timestamp in place.
    pub async fn revoke(
        &self,
        token: &str,
        revoked_at: DateTime<Utc>,
    ) -> Result<RefreshToken, AppError> {
        self.repo
            .revoke(token, revoked_at)
            .await?
            .ok_or_else(|| AppError::not_found("Refresh token not found"))
    }
}

#[cfg(test)]
mod tests {
    use chirpy_core::error::ErrorKind;
    use chirpy_database::memory::MemoryRefreshTokenRepository;

    use super::*;

    fn store() -> RefreshTokenStore {
        RefreshTokenStore::new(
            Arc::new(MemoryRefreshTokenRepository::new()),
            Duration::days(DEFAULT_REFRESH_TTL_DAYS),
        )
    }

    #[tokio::test]
    async fn test_issue_for_uses_window() {
        let store = store();
        let user_id = UserId::new();

        let record = store.issue_for(user_id).await.unwrap();
        assert_eq!(record.user_id, user_id);
        assert_eq!(record.token.len(), 64);
        assert_eq!(record.expires_at - record.created_at, Duration::days(60));
        assert_eq!(record.updated_at, record.created_at);

        let fetched = store.get(&record.token).await.unwrap();
        assert!(fetched.revoked_at.is_none());
    }

    #[tokio::test]
    async fn test_oversized_window_fails_without_storing() {
        let repo = Arc::new(MemoryRefreshTokenRepository::new());
        let mut config = AuthConfig::with_secrets("jwt", "key");
        config.refresh_token_ttl_days = u64::MAX;
        let store = RefreshTokenStore::from_config(repo.clone(), &config);

        let err = store.issue_for(UserId::new()).await.unwrap_err();
        assert!(err.is(ErrorKind::Configuration));
        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn test_create_duplicate_is_conflict() {
        let store = store();
        let now = Utc::now();
        let token = store.generate().unwrap();

        store
            .create(token.clone(), UserId::new(), now, now + Duration::days(1))
            .await
            .unwrap();
        let err = store
            .create(token, UserId::new(), now, now + Duration::days(1))
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::Conflict));
    }

    #[tokio::test]
    async fn test_get_unknown_is_not_found() {
        let err = store().get(&"ab".repeat(32)).await.unwrap_err();
        assert!(err.is(ErrorKind::NotFound));
    }

    #[tokio::test]
    async fn test_revoke_keeps_first_timestamp() {
        let store = store();
        let record = store.issue_for(UserId::new()).await.unwrap();
        let first = Utc::now();

        let revoked = store.revoke(&record.token, first).await.unwrap();
        assert_eq!(revoked.revoked_at, Some(first));
        assert_eq!(revoked.updated_at, first);

        let again = store
            .revoke(&record.token, first + Duration::minutes(5))
            .await
            .unwrap();
        assert_eq!(again.revoked_at, Some(first));
        assert_eq!(again.updated_at, first);
    }

    #[tokio::test]
    async fn test_revoke_unknown_is_not_found() {
        let err = store().revoke(&"cd".repeat(32), Utc::now()).await.unwrap_err();
        assert!(err.is(ErrorKind::NotFound));
    }
}
