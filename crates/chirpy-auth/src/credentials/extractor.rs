//! Pulls bearer tokens and API keys out of the `Authorization` header.

use http::HeaderMap;
use http::header::AUTHORIZATION;
use thiserror::Error;

use chirpy_core::error::AppError;

/// Scheme for end-user access tokens.
pub const BEARER_SCHEME: &str = "Bearer";

/// Default scheme for trusted server-to-server keys.
pub const API_KEY_SCHEME: &str = "ApiKey";

/// Why no credential could be read from the headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ExtractionError {
    /// No `Authorization` header.
    #[error("authorization header is missing")]
    Missing,
    /// The header does not start with the expected scheme and a space.
    #[error("authorization header has the wrong scheme")]
    WrongScheme,
    /// Nothing but whitespace follows the scheme.
    #[error("authorization credential is empty")]
    Empty,
}

impl From<ExtractionError> for AppError {
    fn from(_: ExtractionError) -> Self {
        AppError::authentication("missing or malformed credentials")
    }
}

/// Reads the credential that follows `scheme` in the `Authorization` header.
///
/// The scheme match is case-sensitive and must be followed by whitespace.
/// Surrounding whitespace is trimmed from the credential.
pub fn extract_credential(headers: &HeaderMap, scheme: &str) -> Result<String, ExtractionError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or(ExtractionError::Missing)?
        .to_str()
        .map_err(|_| ExtractionError::WrongScheme)?;

    let rest = value
        .strip_prefix(scheme)
        .ok_or(ExtractionError::WrongScheme)?;

    if !rest.starts_with(char::is_whitespace) {
        return Err(ExtractionError::WrongScheme);
    }

    let credential = rest.trim();
    if credential.is_empty() {
        return Err(ExtractionError::Empty);
    }

    Ok(credential.to_string())
}

/// Reads an `Authorization: Bearer <token>` credential.
pub fn bearer_token(headers: &HeaderMap) -> Result<String, ExtractionError> {
    extract_credential(headers, BEARER_SCHEME)
}

/// Reads an `Authorization: ApiKey <key>` credential.
pub fn api_key(headers: &HeaderMap) -> Result<String, ExtractionError> {
    extract_credential(headers, API_KEY_SCHEME)
}
