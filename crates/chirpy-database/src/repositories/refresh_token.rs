//! Refresh token repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use chirpy_core::result::AppResult;
use chirpy_entity::refresh_token::{CreateRefreshToken, RefreshToken};

use super::{RefreshTokenRepository, map_read_error, map_write_error};

/// PostgreSQL-backed refresh token storage.
#[derive(Debug, Clone)]
pub struct PgRefreshTokenRepository {
    pool: PgPool,
}

impl PgRefreshTokenRepository {
    /// Create a new refresh token repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RefreshTokenRepository for PgRefreshTokenRepository {
    async fn create(&self, data: &CreateRefreshToken) -> AppResult<RefreshToken> {
        sqlx::query_as::<_, RefreshToken>(
            "INSERT INTO refresh_tokens (token, created_at, updated_at, user_id, expires_at, revoked_at) \
             VALUES ($1, $2, $2, $3, $4, NULL) RETURNING *",
        )
        .bind(&data.token)
        .bind(data.created_at)
        .bind(data.user_id)
        .bind(data.expires_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            map_write_error(e, "Failed to create refresh token", "refresh token already exists")
        })
    }

    async fn find_by_token(&self, token: &str) -> AppResult<Option<RefreshToken>> {
        sqlx::query_as::<_, RefreshToken>("SELECT * FROM refresh_tokens WHERE token = $1")
            .bind(token)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_read_error(e, "Failed to find refresh token"))
    }

    async fn revoke(
        &self,
        token: &str,
        revoked_at: DateTime<Utc>,
    ) -> AppResult<Option<RefreshToken>> {
        // SET expressions see the pre-update row, so an already revoked
        // token keeps both of its timestamps.
        sqlx::query_as::<_, RefreshToken>(
            "UPDATE refresh_tokens \
             SET revoked_at = COALESCE(revoked_at, $2), \
                 updated_at = CASE WHEN revoked_at IS NULL THEN $2 ELSE updated_at END \
             WHERE token = $1 RETURNING *",
        )
        .bind(token)
        .bind(revoked_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_read_error(e, "Failed to revoke refresh token"))
    }
}
