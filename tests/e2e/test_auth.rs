use crate::e2e::helpers;

use helpers::assertions::assert_logged_out;
use helpers::backend::{CUSTOMER_EMAIL, STAFF_EMAIL};
use helpers::TestContext;
use pretty_assertions::assert_eq;
use storefront_client::error::AppError;
use test_context::test_context;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_log_in_and_persist_tokens(ctx: &TestContext) {
    let tokens = ctx.client.login_customer().await;

    assert!(tokens.access.as_deref().unwrap().starts_with("access-"));
    assert!(tokens.refresh.is_some());

    // A new process reading the same token file is still logged in
    let reopened = ctx.reopen();
    assert_eq!(reopened.access_token(), tokens.access.clone());

    let user = reopened.auth.current_user().await.unwrap().expect("Missing user");
    assert_eq!(user.email, CUSTOMER_EMAIL);
    assert!(!user.is_staff);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_bad_credentials(ctx: &TestContext) {
    let err = ctx
        .client
        .auth
        .login(CUSTOMER_EMAIL, "wrong-password")
        .await
        .unwrap_err();

    match &err {
        AppError::InvalidCredentials(detail) => assert_eq!(
            detail.as_deref(),
            Some("No active account found with the given credentials")
        ),
        other => panic!("Expected invalid credentials, got {:?}", other),
    }
    assert_logged_out(&ctx.client);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_no_user_when_logged_out(ctx: &TestContext) {
    let user = ctx.client.auth.current_user().await.unwrap();

    assert!(user.is_none());
    assert_eq!(ctx.backend.hits("/api/auth/token/refresh/"), 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_refresh_expired_token_when_loading_user(ctx: &TestContext) {
    let tokens = ctx.client.login_staff().await;
    ctx.backend.expire_access_tokens();

    let user = ctx.client.auth.current_user().await.unwrap().expect("Missing user");

    assert_eq!(user.email, STAFF_EMAIL);
    assert!(user.is_staff);
    assert_eq!(ctx.backend.hits("/api/auth/token/refresh/"), 1);

    // New access token persisted, refresh token kept
    assert_ne!(ctx.client.access_token(), tokens.access);
    assert_eq!(ctx.client.session().tokens().refresh(), tokens.refresh);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_clear_tokens_on_logout(ctx: &TestContext) {
    ctx.client.login_customer().await;
    ctx.client.catalog.categories().await.unwrap();

    let route = ctx.client.auth.logout().await.unwrap();

    assert_eq!(route, "/login");
    assert_eq!(ctx.backend.hits("/api/auth/full-logout/"), 1);
    assert_logged_out(&ctx.client);
    assert_logged_out(&ctx.reopen());

    // Cached responses went with the session
    ctx.client.catalog.categories().await.unwrap();
    assert_eq!(ctx.backend.hits("/api/categories/"), 2);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_build_google_login_url(ctx: &TestContext) {
    assert_eq!(
        ctx.client.auth.google_login_url(),
        format!("{}/accounts/google/login/?process=login", ctx.base_url)
    );

    let route = ctx
        .client
        .auth
        .complete_google_login("google-access", "google-refresh")
        .unwrap();

    assert_eq!(route, "/");
    assert_eq!(ctx.reopen().access_token().as_deref(), Some("google-access"));
}
