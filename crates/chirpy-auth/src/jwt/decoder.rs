//! Access-token verification.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::Deserialize;
use tracing::debug;

use chirpy_core::config::AuthConfig;
use chirpy_core::secret::Secret;
use chirpy_core::types::UserId;

use super::claims::{Claims, ISSUER};
use super::error::TokenError;

/// Signing schemes this service accepts, as spelled in the JWT header.
const HMAC_ALGORITHMS: [&str; 3] = ["HS256", "HS384", "HS512"];

/// The only header field inspected before the library parses the token.
#[derive(Deserialize)]
struct RawHeader {
    alg: String,
}

/// Verifies access tokens against the server secret.
///
/// Verification is pure: no I/O, no shared mutable state.
#[derive(Clone)]
pub struct JwtDecoder {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish_non_exhaustive()
    }
}

impl JwtDecoder {
    /// Creates a decoder for `secret`.
    pub fn new(secret: &Secret) -> Self {
        // Any HMAC variant is accepted; asymmetric and `none` are not.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];
        validation.set_issuer(&[ISSUER]);
        validation.validate_aud = false;
        // Expiry is checked below with no leeway.
        validation.validate_exp = false;
        validation.leeway = 0;

        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Creates a decoder from auth configuration.
    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(&config.jwt_secret)
    }

    /// Verifies `token` and returns its subject.
    ///
    /// Checks, in order: structure, signing scheme, signature, expiry,
    /// subject format.
    pub fn verify(&self, token: &str) -> Result<UserId, TokenError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            let reason = match TokenError::from(e) {
                TokenError::Malformed if names_foreign_scheme(token) => {
                    TokenError::UnexpectedScheme
                }
                other => other,
            };
            debug!(reason = %reason, "Access token rejected");
            reason
        })?;

        if data.claims.is_expired() {
            debug!(exp = data.claims.exp, "Access token expired");
            return Err(TokenError::Expired);
        }

        data.claims.sub.parse::<UserId>().map_err(|_| {
            debug!("Access token subject is not a user id");
            TokenError::ClaimInvalid
        })
    }
}

/// Whether the header of `token` decodes and names an algorithm outside the
/// HMAC family, including `none` and names the JWT library does not know.
fn names_foreign_scheme(token: &str) -> bool {
    let Some(segment) = token.split('.').next() else {
        return false;
    };
    let Ok(bytes) = URL_SAFE_NO_PAD.decode(segment.trim_end_matches('=')) else {
        return false;
    };
    match serde_json::from_slice::<RawHeader>(&bytes) {
        Ok(header) => !HMAC_ALGORITHMS.contains(&header.alg.as_str()),
        Err(_) => false,
    }
}

/// Verifies `token` against `secret` and returns its subject.
pub fn verify(token: &str, secret: &Secret) -> Result<UserId, TokenError> {
    JwtDecoder::new(secret).verify(token)
}
