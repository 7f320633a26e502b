use crate::e2e::helpers;

use helpers::assertions::{assert_logged_out, assert_request_failed, assert_unauthorized};
use helpers::backend::CSRF_TOKEN;
use helpers::TestContext;
use pretty_assertions::assert_eq;
use reqwest::StatusCode;
use storefront_client::domain::catalog::ProductQuery;
use test_context::test_context;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_send_csrf_cookie_back_on_writes(ctx: &TestContext) {
    // Anonymous write before any cookie was set
    ctx.client.cart.add_item(3, 1).await.unwrap();

    ctx.client.login_customer().await;
    let cart = ctx.client.cart.add_item(5, 2).await.unwrap();

    assert_eq!(cart.item_count(), 3);
    assert_eq!(
        ctx.backend.csrf_headers(),
        vec![None, Some(CSRF_TOKEN.to_string())]
    );
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_serve_repeated_reads_from_cache(ctx: &TestContext) {
    let first = ctx.client.catalog.categories().await.unwrap();
    let second = ctx.client.catalog.categories().await.unwrap();

    assert_eq!(first.len(), 2);
    assert_eq!(second[1].slug, "manga");
    assert_eq!(ctx.backend.hits("/api/categories/"), 1);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_encode_product_search(ctx: &TestContext) {
    let query = ProductQuery {
        search: Some("spider & man".to_string()),
        ..ProductQuery::default()
    };

    let listing = ctx.client.catalog.products(&query).await.unwrap();

    assert_eq!(listing.products()[0].title, "spider & man special");
    assert!(!listing.has_next());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_refresh_and_retry_once(ctx: &TestContext) {
    ctx.client.login_customer().await;
    ctx.backend.expire_access_tokens();

    let orders = ctx.client.orders.list().await.unwrap();

    assert_eq!(orders.len(), 1);
    assert_eq!(ctx.backend.hits("/api/orders/"), 2);
    assert_eq!(ctx.backend.hits("/api/auth/token/refresh/"), 1);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_end_session_when_refresh_is_rejected(ctx: &TestContext) {
    ctx.client.login_customer().await;
    ctx.backend.expire_access_tokens();
    ctx.backend.revoke_refresh_tokens();

    let err = ctx.client.orders.list().await.unwrap_err();

    assert_unauthorized(&err);
    assert_logged_out(&ctx.client);
    assert_eq!(ctx.backend.hits("/api/orders/"), 1);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_share_one_refresh_between_concurrent_calls(ctx: &TestContext) {
    ctx.client.login_customer().await;
    ctx.backend.expire_access_tokens();

    let (first, second) = futures::join!(
        ctx.client.orders.list(),
        ctx.client.auth.current_user()
    );

    assert!(first.is_ok());
    assert!(second.unwrap().is_some());
    assert_eq!(ctx.backend.hits("/api/auth/token/refresh/"), 1);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_not_refresh_without_a_refresh_token(ctx: &TestContext) {
    ctx.client
        .auth
        .complete_google_login("stale-access", "")
        .unwrap();

    let err = ctx.client.orders.list().await.unwrap_err();

    assert_request_failed(&err, StatusCode::UNAUTHORIZED, None);
    assert_eq!(ctx.backend.hits("/api/auth/token/refresh/"), 0);
}
