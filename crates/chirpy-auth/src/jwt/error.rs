//! Access-token verification failures.

use thiserror::Error;

use chirpy_core::error::AppError;

/// Why an access token was rejected.
///
/// The variants are for logging and tests. Once converted into an
/// [`AppError`] they all become the same authentication failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    /// The value is not a decodable JWT.
    #[error("token is malformed")]
    Malformed,
    /// The signature does not match the server secret.
    #[error("token signature is invalid")]
    SignatureInvalid,
    /// `exp` has passed.
    #[error("token has expired")]
    Expired,
    /// The header names an algorithm outside the HMAC family.
    #[error("token uses an unexpected signing scheme")]
    UnexpectedScheme,
    /// A claim (subject or issuer) is not what this service issues.
    #[error("token claims are invalid")]
    ClaimInvalid,
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        match err.kind() {
            ErrorKind::InvalidSignature => Self::SignatureInvalid,
            ErrorKind::ExpiredSignature => Self::Expired,
            ErrorKind::InvalidAlgorithm
            | ErrorKind::InvalidAlgorithmName
            | ErrorKind::InvalidKeyFormat
            | ErrorKind::MissingAlgorithm => Self::UnexpectedScheme,
            ErrorKind::InvalidIssuer
            | ErrorKind::InvalidSubject
            | ErrorKind::InvalidAudience
            | ErrorKind::ImmatureSignature
            | ErrorKind::MissingRequiredClaim(_) => Self::ClaimInvalid,
            _ => Self::Malformed,
        }
    }
}

impl From<TokenError> for AppError {
    fn from(_: TokenError) -> Self {
        AppError::authentication("invalid or expired token")
    }
}
