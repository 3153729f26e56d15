//! In-memory user storage.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use chirpy_core::error::AppError;
use chirpy_core::result::AppResult;
use chirpy_core::types::UserId;
use chirpy_entity::user::{CreateUser, UpdateCredentials, User};

use crate::repositories::UserRepository;

/// Users keyed by id; email uniqueness is checked case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct MemoryUserRepository {
    rows: Arc<RwLock<HashMap<UserId, User>>>,
}

impl MemoryUserRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Case folding matches Postgres `LOWER()`, which is Unicode-aware.
fn same_email(stored: &str, candidate: &str) -> bool {
    stored.to_lowercase() == candidate.to_lowercase()
}

fn email_taken(rows: &HashMap<UserId, User>, email: &str, except: Option<UserId>) -> bool {
    rows.values()
        .any(|u| Some(u.id) != except && same_email(&u.email, email))
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        Ok(self.rows.read().await.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self
            .rows
            .read()
            .await
            .values()
            .find(|u| same_email(&u.email, email))
            .cloned())
    }

    async fn create(&self, data: &CreateUser) -> AppResult<User> {
        let mut rows = self.rows.write().await;
        if email_taken(&rows, &data.email, None) {
            return Err(AppError::conflict("email already exists"));
        }

        let now = Utc::now();
        let user = User {
            id: UserId::new(),
            email: data.email.clone(),
            password_hash: data.password_hash.clone(),
            is_chirpy_red: false,
            created_at: now,
            updated_at: now,
        };
        rows.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update_credentials(&self, data: &UpdateCredentials) -> AppResult<Option<User>> {
        let mut rows = self.rows.write().await;
        if !rows.contains_key(&data.id) {
            return Ok(None);
        }
        if email_taken(&rows, &data.email, Some(data.id)) {
            return Err(AppError::conflict("email already exists"));
        }

        let Some(user) = rows.get_mut(&data.id) else {
            return Ok(None);
        };
        user.email = data.email.clone();
        user.password_hash = data.password_hash.clone();
        user.updated_at = Utc::now();
        Ok(Some(user.clone()))
    }

    async fn upgrade_to_chirpy_red(&self, id: UserId) -> AppResult<Option<User>> {
        let mut rows = self.rows.write().await;
        Ok(rows.get_mut(&id).map(|user| {
            user.is_chirpy_red = true;
            user.updated_at = Utc::now();
            user.clone()
        }))
    }
}
