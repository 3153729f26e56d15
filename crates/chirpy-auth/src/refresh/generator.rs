//! Opaque refresh-token values.

use rand::TryRngCore;
use rand::rngs::OsRng;

use chirpy_core::error::AppError;

/// Number of random bytes behind each token.
pub const REFRESH_TOKEN_BYTES: usize = 32;

/// Draws a fresh token from the OS CSPRNG, hex-encoded (64 characters).
pub fn generate_refresh_token() -> Result<String, AppError> {
    let mut bytes = [0u8; REFRESH_TOKEN_BYTES];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| AppError::internal(format!("Entropy source failed: {e}")))?;
    Ok(hex::encode(bytes))
}

/// Whether `token` has the shape of a generated refresh token.
pub fn is_well_formed(token: &str) -> bool {
    token.len() == REFRESH_TOKEN_BYTES * 2 && token.bytes().all(|b| b.is_ascii_hexdigit())
}
