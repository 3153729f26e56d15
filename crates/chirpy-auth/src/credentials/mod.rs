//! Credential extraction from request headers.

pub mod extractor;

pub use extractor::{
    API_KEY_SCHEME, BEARER_SCHEME, ExtractionError, api_key, bearer_token, extract_credential,
};
