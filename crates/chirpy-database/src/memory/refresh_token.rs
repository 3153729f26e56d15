//! In-memory refresh token storage.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use chirpy_core::error::AppError;
use chirpy_core::result::AppResult;
use chirpy_entity::refresh_token::{CreateRefreshToken, RefreshToken};

use crate::repositories::RefreshTokenRepository;

/// Refresh tokens keyed by token value.
///
/// Unlike the `refresh_tokens.user_id` foreign key in Postgres, `create` does
/// not check that the owning user exists. Callers that care must seed the user
/// in [`MemoryUserRepository`](super::MemoryUserRepository) first.
#[derive(Debug, Clone, Default)]
pub struct MemoryRefreshTokenRepository {
    rows: Arc<RwLock<HashMap<String, RefreshToken>>>,
}

impl MemoryRefreshTokenRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored tokens, revoked and expired ones included.
    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    /// Whether no token has been stored yet.
    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

#[async_trait]
impl RefreshTokenRepository for MemoryRefreshTokenRepository {
    async fn create(&self, data: &CreateRefreshToken) -> AppResult<RefreshToken> {
        let mut rows = self.rows.write().await;
        if rows.contains_key(&data.token) {
            return Err(AppError::conflict("refresh token already exists"));
        }
        let record = data.clone().into_record();
        rows.insert(record.token.clone(), record.clone());
        Ok(record)
    }

    async fn find_by_token(&self, token: &str) -> AppResult<Option<RefreshToken>> {
        Ok(self.rows.read().await.get(token).cloned())
    }

    async fn revoke(
        &self,
        token: &str,
        revoked_at: DateTime<Utc>,
    ) -> AppResult<Option<RefreshToken>> {
        let mut rows = self.rows.write().await;
        let Some(record) = rows.get_mut(token) else {
            return Ok(None);
        };
        if record.revoked_at.is_none() {
            record.revoked_at = Some(revoked_at);
            record.updated_at = revoked_at;
        }
        Ok(Some(record.clone()))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use chirpy_core::error::ErrorKind;
    use chirpy_core::types::UserId;

    use super::*;

    fn new_token(token: &str) -> CreateRefreshToken {
        let now = Utc::now();
        CreateRefreshToken {
            token: token.to_string(),
            user_id: UserId::new(),
            created_at: now,
            expires_at: now + Duration::days(60),
        }
    }

    #[tokio::test]
    async fn test_create_then_find() {
        let repo = MemoryRefreshTokenRepository::new();
        let created = repo.create(&new_token("a")).await.expect("create");
        assert!(created.revoked_at.is_none());

        let found = repo.find_by_token("a").await.expect("find").expect("present");
        assert_eq!(found.user_id, created.user_id);
        assert!(repo.find_by_token("b").await.expect("find").is_none());
    }

    #[tokio::test]
    async fn test_duplicate_token_is_conflict() {
        let repo = MemoryRefreshTokenRepository::new();
        repo.create(&new_token("a")).await.expect("create");
        let err = repo.create(&new_token("a")).await.expect_err("duplicate");
        assert_eq!(err.kind, ErrorKind::Conflict);
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_revoke_keeps_first_timestamp() {
        let repo = MemoryRefreshTokenRepository::new();
        repo.create(&new_token("a")).await.expect("create");

        let first = Utc::now();
        let later = first + Duration::minutes(5);
        repo.revoke("a", first).await.expect("revoke");
        let again = repo.revoke("a", later).await.expect("revoke").expect("present");

        assert_eq!(again.revoked_at, Some(first));
        assert_eq!(again.updated_at, first);
    }

    #[tokio::test]
    async fn test_revoke_unknown_returns_none() {
        let repo = MemoryRefreshTokenRepository::new();
        assert!(repo.revoke("missing", Utc::now()).await.expect("revoke").is_none());
    }
}
