//! Authentication of trusted server-to-server callers.

use http::HeaderMap;
use subtle::ConstantTimeEq;
use tracing::warn;

use chirpy_core::config::AuthConfig;
use chirpy_core::error::AppError;
use chirpy_core::secret::Secret;

use crate::credentials::{API_KEY_SCHEME, extract_credential};

/// Accepts requests that carry the shared API key.
#[derive(Debug, Clone)]
pub struct TrustedCallerGuard {
    api_key: Secret,
    scheme: String,
}

impl TrustedCallerGuard {
    /// Creates a guard for `api_key` using the default `ApiKey` scheme.
    pub fn new(api_key: Secret) -> Self {
        Self::with_scheme(api_key, API_KEY_SCHEME)
    }

    /// Creates a guard that reads the key after a custom scheme.
    pub fn with_scheme(api_key: Secret, scheme: impl Into<String>) -> Self {
        Self {
            api_key,
            scheme: scheme.into(),
        }
    }

    /// Creates a guard from auth configuration.
    pub fn from_config(config: &AuthConfig) -> Self {
        Self::with_scheme(config.api_key.clone(), config.api_key_scheme.clone())
    }

    /// Allows the request iff it presents the configured key.
    pub fn authorize(&self, headers: &HeaderMap) -> Result<(), AppError> {
        let presented = extract_credential(headers, &self.scheme).map_err(|e| {
            warn!(reason = %e, "Trusted caller credential rejected");
            AppError::authentication("invalid API key")
        })?;

        // An empty configured key never matches.
        let matches: bool = presented.as_bytes().ct_eq(self.api_key.as_bytes()).into();
        if self.api_key.is_empty() || !matches {
            warn!("Trusted caller presented a wrong API key");
            return Err(AppError::authentication("invalid API key"));
        }

        Ok(())
    }
}
