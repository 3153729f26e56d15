//! Refresh-token generation and lifecycle.

pub mod generator;
pub mod store;

pub use generator::{REFRESH_TOKEN_BYTES, generate_refresh_token, is_well_formed};
pub use store::RefreshTokenStore;
