mod common;

use chrono::{Duration, Utc};
use common::{Sent, TestContext, PASSWORD};
use timetrack_auth::services::credentials::CredentialStore;
use timetrack_auth::services::verification::TokenIssuer;
use timetrack_auth::types::{error::AppError, token::TokenPurpose, user::UserPatch};

#[tokio::test]
async fn test_register_sends_verification_mail() {
    println!("\n\n[+] Running test: test_register_sends_verification_mail");
    let ctx = TestContext::new().await;

    println!("[>] Registering a@x.com");
    ctx.state.auth.register("a@x.com", PASSWORD).await.unwrap();

    let user = ctx.db.find_user_by_email("a@x.com").await.unwrap().expect("user missing");
    assert!(!user.is_verified);
    assert_ne!(user.password, PASSWORD);

    let sent = ctx.mailbox.sent();
    assert_eq!(sent.len(), 1);
    let Sent::Verification { email, token } = &sent[0] else {
        panic!("expected a verification mail, got {:?}", sent[0]);
    };
    assert_eq!(email, "a@x.com");
    assert_eq!(token.len(), 64);
    println!("[/] Test passed: registration stored an unverified user and mailed a token.");
}

#[tokio::test]
async fn test_register_normalizes_email() {
    let ctx = TestContext::new().await;
    ctx.state.auth.register("  Mixed.Case@X.com ", PASSWORD).await.unwrap();

    assert!(ctx.db.find_user_by_email("mixed.case@x.com").await.unwrap().is_some());
    assert_eq!(ctx.mailbox.last().email(), "mixed.case@x.com");
}

#[tokio::test]
async fn test_register_duplicate_is_conflict_and_changes_nothing() {
    println!("\n\n[+] Running test: test_register_duplicate_is_conflict_and_changes_nothing");
    let ctx = TestContext::new().await;
    ctx.state.auth.register("a@x.com", PASSWORD).await.unwrap();
    let before = ctx.db.find_user_by_email("a@x.com").await.unwrap().unwrap();

    println!("[>] Registering a@x.com again with another password");
    let err = ctx.state.auth.register("A@x.com", "another-password").await.unwrap_err();
    println!("[<] Got: {err}");
    assert!(matches!(err, AppError::Conflict(_)));

    let after = ctx.db.find_user_by_email("a@x.com").await.unwrap().unwrap();
    assert_eq!(before, after);
    assert_eq!(ctx.mailbox.sent().len(), 1);
    println!("[/] Test passed: duplicate registration rejected without side effects.");
}

#[tokio::test]
async fn test_register_rejects_bad_input() {
    let ctx = TestContext::new().await;

    let err = ctx.state.auth.register("not-an-email", PASSWORD).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let err = ctx.state.auth.register("a@x.com", "short").await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    assert!(ctx.db.find_user_by_email("a@x.com").await.unwrap().is_none());
    assert!(ctx.mailbox.sent().is_empty());
}

#[tokio::test]
async fn test_mail_failure_keeps_the_account() {
    let ctx = TestContext::new().await;
    ctx.mailbox.set_failing(true);

    let err = ctx.state.auth.register("a@x.com", PASSWORD).await.unwrap_err();
    assert!(matches!(err, AppError::Internal(_)));

    // the user row is not rolled back; a retry is a conflict
    assert!(ctx.db.find_user_by_email("a@x.com").await.unwrap().is_some());
    ctx.mailbox.set_failing(false);
    let err = ctx.state.auth.register("a@x.com", PASSWORD).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn test_issued_token_resolves_to_its_email() {
    let ctx = TestContext::new().await;
    let tokens = &ctx.state.tokens;

    let first = tokens.issue("a@x.com", TokenPurpose::EmailVerification).await.unwrap();
    let second = tokens.issue("b@x.com", TokenPurpose::EmailVerification).await.unwrap();
    assert_ne!(first, second);

    assert_eq!(tokens.resolve(&first, TokenPurpose::EmailVerification).await.unwrap(), "a@x.com");
    assert_eq!(tokens.resolve(&second, TokenPurpose::EmailVerification).await.unwrap(), "b@x.com");
    // resolving does not spend it
    assert_eq!(tokens.resolve(&first, TokenPurpose::EmailVerification).await.unwrap(), "a@x.com");
}

#[tokio::test]
async fn test_unknown_token_is_not_found() {
    let ctx = TestContext::new().await;

    let err = ctx.state.tokens.resolve("deadbeef", TokenPurpose::EmailVerification).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let err = ctx.state.auth.verify("deadbeef").await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_empty_token_is_validation_error() {
    let ctx = TestContext::new().await;
    let err = ctx.state.auth.verify("  ").await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn test_token_cannot_be_used_twice() {
    let ctx = TestContext::new().await;
    ctx.state.auth.register("a@x.com", PASSWORD).await.unwrap();
    let token = ctx.mailbox.last().token().to_string();

    let user = ctx.state.auth.verify(&token).await.unwrap();
    assert!(user.is_verified);

    let err = ctx.state.auth.verify(&token).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_expired_token_is_not_found() {
    let ctx = TestContext::new().await;
    let stale = TokenIssuer::new(ctx.db.clone(), Duration::seconds(-1));

    let token = stale.issue("a@x.com", TokenPurpose::EmailVerification).await.unwrap();
    let err = stale.resolve(&token, TokenPurpose::EmailVerification).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    // the regular issuer reads the same rows and agrees
    let err = ctx.state.tokens.consume(&token, TokenPurpose::EmailVerification).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_reset_token_does_not_verify_email() {
    let ctx = TestContext::new().await;
    ctx.state.auth.register("a@x.com", PASSWORD).await.unwrap();

    let reset = ctx.state.tokens.issue("a@x.com", TokenPurpose::PasswordReset).await.unwrap();
    let err = ctx.state.auth.verify(&reset).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let user = ctx.db.find_user_by_email("a@x.com").await.unwrap().unwrap();
    assert!(!user.is_verified);
}

#[tokio::test]
async fn test_unverified_login_is_forbidden() {
    let ctx = TestContext::new().await;
    ctx.state.auth.register("a@x.com", PASSWORD).await.unwrap();

    let err = ctx.state.auth.login("a@x.com", PASSWORD).await.unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));
}

#[tokio::test]
async fn test_bad_credentials_look_the_same() {
    println!("\n\n[+] Running test: test_bad_credentials_look_the_same");
    let ctx = TestContext::new().await;
    ctx.verified_user("a@x.com").await;

    println!("[>] Logging in with a wrong password");
    let wrong_password = ctx.state.auth.login("a@x.com", "wrong-password").await.unwrap_err();
    println!("[>] Logging in with an unknown email");
    let unknown_email = ctx.state.auth.login("nobody@x.com", PASSWORD).await.unwrap_err();

    let (AppError::Validation(a), AppError::Validation(b)) = (&wrong_password, &unknown_email) else {
        panic!("expected validation errors, got {wrong_password:?} and {unknown_email:?}");
    };
    assert_eq!(a, b);
    println!("[/] Test passed: both failures carry the same message.");
}

#[tokio::test]
async fn test_register_verify_login_end_to_end() {
    println!("\n\n[+] Running test: test_register_verify_login_end_to_end");
    let ctx = TestContext::new().await;

    ctx.state.auth.register("a@x.com", PASSWORD).await.unwrap();
    let token = ctx.mailbox.last().token().to_string();
    println!("[<] Received verification token.");

    let user = ctx.state.auth.verify(&token).await.unwrap();
    assert_eq!(user.email, "a@x.com");

    let session = ctx.state.auth.login("A@X.com", PASSWORD).await.unwrap();
    assert!(!session.is_empty());

    let claims = ctx.state.sessions.verify(&session).unwrap();
    assert_eq!(claims.sub, user.id);
    assert!(claims.exp > Utc::now().timestamp());
    println!("[/] Test passed: session token issued for the verified user.");
}

#[tokio::test]
async fn test_purge_drops_spent_and_expired_tokens() {
    let ctx = TestContext::new().await;
    let stale = TokenIssuer::new(ctx.db.clone(), Duration::seconds(-60));

    stale.issue("old@x.com", TokenPurpose::EmailVerification).await.unwrap();
    let spent = ctx.state.tokens.issue("a@x.com", TokenPurpose::EmailVerification).await.unwrap();
    ctx.state.tokens.consume(&spent, TokenPurpose::EmailVerification).await.unwrap();
    let fresh = ctx.state.tokens.issue("b@x.com", TokenPurpose::EmailVerification).await.unwrap();

    let removed = ctx.db.purge_verifications(Utc::now()).await.unwrap();
    assert_eq!(removed, 2);
    assert_eq!(ctx.state.tokens.resolve(&fresh, TokenPurpose::EmailVerification).await.unwrap(), "b@x.com");
}

#[tokio::test]
async fn test_unique_email_index_is_conflict() {
    let ctx = TestContext::new().await;
    ctx.db.create_user("dup@x.com", "hash-one").await.unwrap();

    // straight to the store, past the service's existence check
    let err = ctx.db.create_user("dup@x.com", "hash-two").await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    let stored = ctx.db.find_user_by_email("dup@x.com").await.unwrap().unwrap();
    assert_eq!(stored.password, "hash-one");
}

#[tokio::test]
async fn test_concurrent_registrations_one_wins() {
    println!("\n\n[+] Running test: test_concurrent_registrations_one_wins");
    let ctx = TestContext::new().await;

    println!("[>] Registering race@x.com twice at once");
    let (a, b) = tokio::join!(
        ctx.state.auth.register("race@x.com", PASSWORD),
        ctx.state.auth.register("race@x.com", PASSWORD),
    );
    println!("[<] Results: {a:?} / {b:?}");

    let outcomes = [a, b];
    assert_eq!(outcomes.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(outcomes.iter().any(|r| matches!(r, Err(AppError::Conflict(_)))));
    assert_eq!(ctx.mailbox.sent().len(), 1);
    println!("[/] Test passed: exactly one registration went through.");
}

#[tokio::test]
async fn test_update_to_taken_email_is_conflict() {
    let ctx = TestContext::new().await;
    ctx.db.create_user("a@x.com", "hash-a").await.unwrap();
    let b = ctx.db.create_user("b@x.com", "hash-b").await.unwrap();

    let patch = UserPatch { email: Some("a@x.com".into()), ..Default::default() };
    let err = ctx.db.update_user(b.clone(), patch).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    let unchanged = ctx.db.find_user_by_id(b.id).await.unwrap().unwrap();
    assert_eq!(unchanged.email, "b@x.com");
}
