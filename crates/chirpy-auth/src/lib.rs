//! # chirpy-auth
//!
//! Credential handling and session flows for Chirpy.
//!
//! ## Modules
//!
//! - `password`: Argon2id password hashing and policy enforcement
//! - `jwt`: access-token issuance and verification
//! - `credentials`: bearer token and API key extraction from headers
//! - `refresh`: refresh-token generation and lifecycle
//! - `session`: login, refresh and revoke flows
//! - `guard`: ownership and trusted-caller checks
//! - `account`: registration, credential updates and membership

pub mod account;
pub mod credentials;
pub mod guard;
pub mod jwt;
pub mod password;
pub mod refresh;
pub mod session;

pub use account::AccountManager;
pub use credentials::{ExtractionError, api_key, bearer_token, extract_credential};
pub use guard::{Owned, OwnershipGuard, TrustedCallerGuard, authorize_owner_action};
pub use jwt::{AccessGrant, Claims, JwtDecoder, JwtEncoder, TokenError};
pub use password::{PasswordHasher, PasswordValidator};
pub use refresh::{RefreshTokenStore, generate_refresh_token};
pub use session::{LoginResult, SessionManager};
