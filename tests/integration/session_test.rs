//! Integration tests for the login, refresh and revoke flows.

mod helpers;

use std::sync::Arc;

use chrono::{Duration, Utc};

use chirpy_auth::RefreshTokenStore;
use chirpy_core::error::ErrorKind;
use chirpy_database::RefreshTokenRepository;

use helpers::{TestApp, bearer};

#[tokio::test]
async fn test_login_then_refresh_keeps_subject() {
    let app = TestApp::new();
    let user = app
        .create_test_user("saul@bettercall.com", "123456789")
        .await;

    let login = app
        .sessions
        .login("saul@bettercall.com", "123456789")
        .await
        .expect("login");

    assert_eq!(login.user.id, user.id);
    assert_eq!(login.refresh_token.len(), 64);
    assert!(login.refresh_token.chars().all(|c| c.is_ascii_hexdigit()));

    let ttl = login.access.expires_at - Utc::now();
    assert!(ttl > Duration::minutes(59) && ttl <= Duration::hours(1));
    assert!(login.refresh_expires_at > Utc::now() + Duration::days(59));

    let subject = app
        .sessions
        .authenticate(&bearer(&login.access.token))
        .expect("authenticate");
    assert_eq!(subject, user.id);

    let refreshed = app
        .sessions
        .refresh(&login.refresh_token)
        .await
        .expect("refresh");
    let subject = app
        .sessions
        .authenticate(&bearer(&refreshed.token))
        .expect("authenticate refreshed");
    assert_eq!(subject, user.id);
}

#[tokio::test]
async fn test_login_email_is_case_insensitive() {
    let app = TestApp::new();
    app.create_test_user("walt@breakingbad.com", "04234567")
        .await;

    let login = app.sessions.login("WALT@breakingbad.com", "04234567").await;
    assert!(login.is_ok());
}

#[tokio::test]
async fn test_revoked_token_never_refreshes() {
    let app = TestApp::new();
    app.create_test_user("saul@bettercall.com", "123456789")
        .await;
    let login = app
        .sessions
        .login("saul@bettercall.com", "123456789")
        .await
        .expect("login");

    app.sessions
        .revoke_session(&login.refresh_token)
        .await
        .expect("revoke");

    for _ in 0..3 {
        let err = app
            .sessions
            .refresh(&login.refresh_token)
            .await
            .expect_err("revoked token must not refresh");
        assert!(err.is(ErrorKind::Authentication));
        assert_eq!(err.status_code(), 401);
    }

    // Revoking again is a no-op that still succeeds.
    app.sessions
        .revoke_session(&login.refresh_token)
        .await
        .expect("second revoke");
}

#[tokio::test]
async fn test_refresh_token_lifecycle() {
    let app = TestApp::new();
    let user = app
        .create_test_user("jesse@breakingbad.com", "magnets!")
        .await;
    let store = RefreshTokenStore::new(app.tokens.clone(), Duration::days(60));

    let record = store.issue_for(user.id).await.expect("issue");
    let fetched = store.get(&record.token).await.expect("get");
    assert!(fetched.revoked_at.is_none());
    assert_eq!(fetched.updated_at, fetched.created_at);

    let first = Utc::now();
    store.revoke(&record.token, first).await.expect("revoke");
    store
        .revoke(&record.token, first + Duration::seconds(30))
        .await
        .expect("revoke again");
    let stored = app
        .tokens
        .find_by_token(&record.token)
        .await
        .expect("lookup")
        .expect("present");
    assert_eq!(stored.revoked_at, Some(first));

    let created = Utc::now() - Duration::days(61);
    let expired = store.generate().expect("generate");
    store
        .create(expired.clone(), user.id, created, created + Duration::days(60))
        .await
        .expect("create expired");
    let err = app.sessions.refresh(&expired).await.expect_err("expired");
    assert!(err.is(ErrorKind::Authentication));
}

#[tokio::test]
async fn test_refresh_failures_share_one_message() {
    let app = TestApp::new();
    let user = app
        .create_test_user("skyler@breakingbad.com", "car-wash-1")
        .await;
    let store = RefreshTokenStore::new(app.tokens.clone(), Duration::days(60));

    let revoked = store.issue_for(user.id).await.expect("issue");
    store
        .revoke(&revoked.token, Utc::now())
        .await
        .expect("revoke");

    let unknown = app
        .sessions
        .refresh(&"0".repeat(64))
        .await
        .expect_err("unknown");
    let revoked = app
        .sessions
        .refresh(&revoked.token)
        .await
        .expect_err("revoked");
    assert_eq!(unknown.message, revoked.message);
}

#[tokio::test]
async fn test_user_cannot_act_on_another_users_resource() {
    let app = TestApp::new();
    let a = app.create_test_user("a@example.com", "password-a").await;
    let b = app.create_test_user("b@example.com", "password-b").await;

    let login_a = app
        .sessions
        .login("a@example.com", "password-a")
        .await
        .expect("login a");
    let login_b = app
        .sessions
        .login("b@example.com", "password-b")
        .await
        .expect("login b");

    let subject_a = app
        .sessions
        .authenticate(&bearer(&login_a.access.token))
        .expect("auth a");
    let subject_b = app
        .sessions
        .authenticate(&bearer(&login_b.access.token))
        .expect("auth b");

    let err = app
        .owners
        .authorize_owned(subject_a, &b)
        .expect_err("a must not act on b");
    assert!(err.is(ErrorKind::Forbidden));
    assert_eq!(err.status_code(), 403);

    app.owners
        .authorize_owned(subject_b, &b)
        .expect("b may act on own resource");
    app.owners
        .authorize_owner_action(subject_a, a.id)
        .expect("a may act on own resource");
}

#[tokio::test]
async fn test_unauthenticated_and_forbidden_are_distinct() {
    let app = TestApp::new();
    let owner = app.create_test_user("owner@example.com", "password1").await;

    let err = app
        .sessions
        .authenticate(&bearer("garbage"))
        .expect_err("bad token");
    assert!(err.is(ErrorKind::Authentication));

    let tokens: Arc<dyn RefreshTokenRepository> = app.tokens.clone();
    let store = RefreshTokenStore::new(tokens, Duration::days(60));
    let record = store.issue_for(owner.id).await.expect("issue");

    let stranger = chirpy_core::types::UserId::new();
    let err = app
        .owners
        .authorize_owned(stranger, &record)
        .expect_err("stranger");
    assert!(err.is(ErrorKind::Forbidden));
}
