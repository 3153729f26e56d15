//! Signed, short-lived access tokens.
//!
//! Tokens are HS256 JWTs carrying `{iss, sub, iat, exp}`. They are never
//! stored server-side, so an issued token stays valid until it expires.

pub mod claims;
pub mod decoder;
pub mod encoder;
pub mod error;

pub use claims::{Claims, ISSUER};
pub use decoder::{JwtDecoder, verify};
pub use encoder::{AccessGrant, JwtEncoder, issue, ttl_from_seconds};
pub use error::TokenError;
