//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use http::header::AUTHORIZATION;
use http::{HeaderMap, HeaderValue};

use chirpy_auth::{AccountManager, OwnershipGuard, SessionManager, TrustedCallerGuard};
use chirpy_core::config::AuthConfig;
use chirpy_database::{MemoryRefreshTokenRepository, MemoryUserRepository};
use chirpy_entity::user::User;

/// Signing secret used by every test app.
pub const JWT_SECRET: &str = "integration-signing-secret";

/// Trusted-caller key used by every test app.
pub const API_KEY: &str = "f271c81ff7084ee5b99a5091b42d486e";

/// Services wired over in-memory repositories.
pub struct TestApp {
    /// Auth configuration the services were built from
    pub config: AuthConfig,
    /// Session flows
    pub sessions: SessionManager,
    /// Account flows
    pub accounts: AccountManager,
    /// Ownership checks
    pub owners: OwnershipGuard,
    /// Trusted-caller checks
    pub trusted: TrustedCallerGuard,
    /// Direct access to stored users
    pub users: Arc<MemoryUserRepository>,
    /// Direct access to stored refresh tokens
    pub tokens: Arc<MemoryRefreshTokenRepository>,
}

impl TestApp {
    /// Create a new test application
    pub fn new() -> Self {
        let config = AuthConfig::with_secrets(JWT_SECRET, API_KEY);
        let users = Arc::new(MemoryUserRepository::new());
        let tokens = Arc::new(MemoryRefreshTokenRepository::new());

        Self {
            sessions: SessionManager::from_config(&config, users.clone(), tokens.clone()),
            accounts: AccountManager::from_config(&config, users.clone()),
            owners: OwnershipGuard::new(),
            trusted: TrustedCallerGuard::from_config(&config),
            config,
            users,
            tokens,
        }
    }

    /// Register a user through the account flow
    pub async fn create_test_user(&self, email: &str, password: &str) -> User {
        self.accounts
            .register(email, password)
            .await
            .expect("Failed to create test user")
    }
}

/// Headers carrying `Authorization: {value}`
pub fn authorization(value: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(value).expect("valid header value"),
    );
    headers
}

/// Headers carrying a bearer token
pub fn bearer(token: &str) -> HeaderMap {
    authorization(&format!("Bearer {token}"))
}
