//! Integration tests for account registration and membership.

mod helpers;

use chirpy_core::error::ErrorKind;
use chirpy_core::types::UserId;

use helpers::{API_KEY, TestApp, authorization};

#[tokio::test]
async fn test_duplicate_registration_conflicts() {
    let app = TestApp::new();
    app.create_test_user("walt@breakingbad.com", "04234567")
        .await;

    let err = app
        .accounts
        .register("Walt@BreakingBad.com", "another-password")
        .await
        .expect_err("duplicate email");
    assert!(err.is(ErrorKind::Conflict));
    assert_eq!(err.status_code(), 409);
}

#[tokio::test]
async fn test_public_profile_hides_hash() {
    let app = TestApp::new();
    let user = app
        .create_test_user("walt@breakingbad.com", "04234567")
        .await;

    let json = serde_json::to_value(&user).expect("serialize");
    assert!(json.get("password_hash").is_none());
    assert!(json.get("hashed_password").is_none());
    assert_eq!(json["is_chirpy_red"], false);
}

#[tokio::test]
async fn test_update_credentials_changes_login() {
    let app = TestApp::new();
    let user = app
        .create_test_user("walt@breakingbad.com", "04234567")
        .await;
    let login = app
        .sessions
        .login("walt@breakingbad.com", "04234567")
        .await
        .expect("login");
    let subject = app
        .sessions
        .authenticate(&helpers::bearer(&login.access.token))
        .expect("authenticate");

    let updated = app
        .accounts
        .update_credentials(subject, "heisenberg@breakingbad.com", "losPollos1")
        .await
        .expect("update");
    assert_eq!(updated.id, user.id);
    assert_eq!(updated.email, "heisenberg@breakingbad.com");

    let err = app
        .sessions
        .login("walt@breakingbad.com", "04234567")
        .await
        .expect_err("old credentials");
    assert!(err.is(ErrorKind::Authentication));

    app.sessions
        .login("heisenberg@breakingbad.com", "losPollos1")
        .await
        .expect("new credentials");
}

#[tokio::test]
async fn test_update_credentials_to_taken_email_conflicts() {
    let app = TestApp::new();
    app.create_test_user("walt@breakingbad.com", "04234567")
        .await;
    let jesse = app
        .create_test_user("jesse@breakingbad.com", "magnets!")
        .await;

    let err = app
        .accounts
        .update_credentials(jesse.id, "walt@breakingbad.com", "magnets!")
        .await
        .expect_err("taken email");
    assert!(err.is(ErrorKind::Conflict));
}

#[tokio::test]
async fn test_trusted_caller_upgrades_membership() {
    let app = TestApp::new();
    let user = app
        .create_test_user("walt@breakingbad.com", "04234567")
        .await;

    let err = app
        .trusted
        .authorize(&authorization("ApiKey wrong-key"))
        .expect_err("wrong key");
    assert!(err.is(ErrorKind::Authentication));

    app.trusted
        .authorize(&authorization(&format!("ApiKey {API_KEY}")))
        .expect("matching key");

    let upgraded = app
        .accounts
        .upgrade_membership(user.id)
        .await
        .expect("upgrade");
    assert!(upgraded.is_chirpy_red);

    let err = app
        .accounts
        .upgrade_membership(UserId::new())
        .await
        .expect_err("unknown user");
    assert!(err.is(ErrorKind::NotFound));
}
