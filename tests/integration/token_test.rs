//! Integration tests for access-token issuance and verification.

use std::time::Duration as StdDuration;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{Duration, Utc};

use chirpy_auth::jwt::{self, TokenError};
use chirpy_auth::{ExtractionError, bearer_token};
use chirpy_core::error::ErrorKind;
use chirpy_core::secret::Secret;
use chirpy_core::types::UserId;

mod helpers;

use helpers::authorization;

#[test]
fn test_round_trip() {
    let key = Secret::new("k");
    let subject = UserId::new();
    let token = jwt::issue(subject, &key, Duration::hours(1)).expect("issue");
    assert_eq!(jwt::verify(&token, &key), Ok(subject));
}

#[tokio::test]
async fn test_expiry() {
    let key = Secret::new("k");
    let token = jwt::issue(UserId::new(), &key, Duration::milliseconds(1)).expect("issue");
    tokio::time::sleep(StdDuration::from_millis(10)).await;
    assert_eq!(jwt::verify(&token, &key), Err(TokenError::Expired));
}

#[test]
fn test_key_isolation_and_malformed() {
    let token = jwt::issue(UserId::new(), &Secret::new("k1"), Duration::hours(1)).expect("issue");
    assert_eq!(
        jwt::verify(&token, &Secret::new("k2")),
        Err(TokenError::SignatureInvalid)
    );
    assert_eq!(
        jwt::verify("not-a-token", &Secret::new("k1")),
        Err(TokenError::Malformed)
    );
}

#[test]
fn test_none_algorithm_is_rejected() {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none","typ":"JWT"}"#);
    let claims = serde_json::json!({
        "iss": "chirpy",
        "sub": UserId::new().to_string(),
        "iat": Utc::now().timestamp(),
        "exp": Utc::now().timestamp() + 3600,
    });
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
    let token = format!("{header}.{payload}.");

    assert_eq!(
        jwt::verify(&token, &Secret::new("k")),
        Err(TokenError::UnexpectedScheme)
    );
}

#[test]
fn test_oversized_ttl_is_rejected_not_panicking() {
    let err = jwt::issue(UserId::new(), &Secret::new("k"), Duration::days(365 * 300_000))
        .expect_err("lifetime past the calendar");
    assert!(err.is(ErrorKind::Validation));
}

#[test]
fn test_header_extraction() {
    assert_eq!(
        bearer_token(&authorization("Bearer  ")),
        Err(ExtractionError::Empty)
    );
    assert_eq!(
        bearer_token(&http::HeaderMap::new()),
        Err(ExtractionError::Missing)
    );
    assert_eq!(
        bearer_token(&authorization("Basic abc")),
        Err(ExtractionError::WrongScheme)
    );
}
