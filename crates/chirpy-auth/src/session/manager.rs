//! Session lifecycle manager: login, refresh and revoke flows.
//!
//! A refresh token moves from active to expired with time alone, or from
//! active to revoked through [`SessionManager::revoke_session`]. Only an
//! active token can be exchanged for a new access token.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use http::HeaderMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use chirpy_core::config::AuthConfig;
use chirpy_core::error::{AppError, ErrorKind};
use chirpy_core::types::UserId;
use chirpy_database::repositories::{RefreshTokenRepository, UserRepository};
use chirpy_entity::refresh_token::TokenState;
use chirpy_entity::user::User;

use crate::credentials::bearer_token;
use crate::jwt::{AccessGrant, JwtDecoder, JwtEncoder};
use crate::password::PasswordHasher;
use crate::refresh::{RefreshTokenStore, is_well_formed};

/// Message for every failed login, whatever the cause.
const LOGIN_FAILED: &str = "incorrect email or password";

/// Message for every rejected refresh token or access token.
const UNAUTHORIZED: &str = "invalid or expired credentials";

/// Result of a successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResult {
    /// Short-lived access token.
    pub access: AccessGrant,
    /// Long-lived refresh token value.
    pub refresh_token: String,
    /// When the refresh token stops working.
    pub refresh_expires_at: DateTime<Utc>,
    /// The authenticated user's public profile.
    pub user: User,
}

/// Manages the complete session lifecycle.
#[derive(Clone)]
pub struct SessionManager {
    /// JWT encoder for token generation.
    jwt_encoder: Arc<JwtEncoder>,
    /// JWT decoder for token validation.
    jwt_decoder: Arc<JwtDecoder>,
    /// Refresh token persistence.
    refresh_store: Arc<RefreshTokenStore>,
    /// User repository.
    user_repo: Arc<dyn UserRepository>,
    /// Password hasher.
    password_hasher: Arc<PasswordHasher>,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("refresh_store", &self.refresh_store)
            .finish_non_exhaustive()
    }
}

impl SessionManager {
    /// Creates a new session manager from its collaborators.
    pub fn new(
        jwt_encoder: Arc<JwtEncoder>,
        jwt_decoder: Arc<JwtDecoder>,
        refresh_store: Arc<RefreshTokenStore>,
        user_repo: Arc<dyn UserRepository>,
        password_hasher: Arc<PasswordHasher>,
    ) -> Self {
        Self {
            jwt_encoder,
            jwt_decoder,
            refresh_store,
            user_repo,
            password_hasher,
        }
    }

    /// Wires a session manager from auth configuration and repositories.
    pub fn from_config(
        config: &AuthConfig,
        user_repo: Arc<dyn UserRepository>,
        token_repo: Arc<dyn RefreshTokenRepository>,
    ) -> Self {
        Self::new(
            Arc::new(JwtEncoder::from_config(config)),
            Arc::new(JwtDecoder::from_config(config)),
            Arc::new(RefreshTokenStore::from_config(token_repo, config)),
            user_repo,
            Arc::new(PasswordHasher::new()),
        )
    }

    /// Performs the login flow:
    ///
    /// 1. Find the user by email
    /// 2. Verify the password
    /// 3. Issue an access token with the default lifetime
    /// 4. Issue and persist a refresh token
    ///
    /// Steps 1 and 2 fail with one generic authentication error.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResult, AppError> {
        let user = match self.user_repo.find_by_email(email).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                info!("Login rejected: unknown email");
                return Err(AppError::authentication(LOGIN_FAILED));
            }
            Err(e) => {
                error!(error = %e, "User lookup failed during login");
                return Err(AppError::authentication(LOGIN_FAILED));
            }
        };

        match self.password_hasher.verify(password, &user.password_hash) {
            Ok(true) => {}
            Ok(false) => {
                info!(user_id = %user.id, "Login rejected: wrong password");
                return Err(AppError::authentication(LOGIN_FAILED));
            }
            Err(e) => {
                error!(user_id = %user.id, error = %e, "Stored password hash is unusable");
                return Err(AppError::authentication(LOGIN_FAILED));
            }
        }

        let access = self.jwt_encoder.issue_default(user.id)?;
        let refresh = self.refresh_store.issue_for(user.id).await?;

        info!(user_id = %user.id, "Login successful");

        Ok(LoginResult {
            access,
            refresh_token: refresh.token,
            refresh_expires_at: refresh.expires_at,
            user,
        })
    }

    /// Exchanges an active refresh token for a new access token.
    ///
    /// The refresh token itself is left unchanged. Unknown, expired and
    /// revoked tokens all yield the same authentication error.
    pub async fn refresh(&self, refresh_token: &str) -> Result<AccessGrant, AppError> {
        let record = match self.refresh_store.get(refresh_token).await {
            Ok(record) => record,
            Err(e) if e.is(ErrorKind::NotFound) => {
                warn!(reason = "not_found", "Refresh rejected");
                return Err(AppError::authentication(UNAUTHORIZED));
            }
            Err(e) => {
                error!(error = %e, "Refresh token lookup failed");
                return Err(AppError::authentication(UNAUTHORIZED));
            }
        };

        let state = record.state_at(Utc::now());
        if state != TokenState::Active {
            warn!(user_id = %record.user_id, reason = %state, "Refresh rejected");
            return Err(AppError::authentication(UNAUTHORIZED));
        }

        let grant = self.jwt_encoder.issue_default(record.user_id)?;
        info!(user_id = %record.user_id, "Access token refreshed");
        Ok(grant)
    }

    /// Revokes a refresh token.
    ///
    /// Succeeds for any well-formed token, including unknown ones and ones
    /// already revoked. A value that is not 64 hex characters is a
    /// validation error.
    pub async fn revoke_session(&self, refresh_token: &str) -> Result<(), AppError> {
        if !is_well_formed(refresh_token) {
            return Err(AppError::validation("Malformed refresh token"));
        }

        match self.refresh_store.revoke(refresh_token, Utc::now()).await {
            Ok(record) => {
                info!(user_id = %record.user_id, "Refresh token revoked");
                Ok(())
            }
            Err(e) if e.is(ErrorKind::NotFound) => {
                debug!("Revoke requested for unknown refresh token");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Resolves the caller from an `Authorization: Bearer` header.
    pub fn authenticate(&self, headers: &HeaderMap) -> Result<UserId, AppError> {
        let token = bearer_token(headers).map_err(|e| {
            debug!(reason = %e, "Bearer credential rejected");
            AppError::authentication(UNAUTHORIZED)
        })?;

        self.jwt_decoder
            .verify(&token)
            .map_err(|_| AppError::authentication(UNAUTHORIZED))
    }
}
