use axum::{
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use eyre::eyre;
use field_service_api::config::RateLimiterConfig;
use field_service_core::errors::BookingError;
use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::test_utils::{TestContext, authorized, empty_body, send, signed};

#[rstest]
#[case(Method::GET, "/api/v1/field")]
#[case(Method::GET, "/api/v1/field/7b0c5a4e-3c1f-4e8a-9d1b-2f6a8c0e4b12")]
#[case(Method::GET, "/api/v1/field/pagination?page=1&limit=10")]
#[case(Method::POST, "/api/v1/field")]
#[case(Method::PUT, "/api/v1/field/7b0c5a4e-3c1f-4e8a-9d1b-2f6a8c0e4b12")]
#[case(Method::DELETE, "/api/v1/field/7b0c5a4e-3c1f-4e8a-9d1b-2f6a8c0e4b12")]
#[case(Method::GET, "/api/v1/field/schedule/lists/7b0c5a4e-3c1f-4e8a-9d1b-2f6a8c0e4b12?date=2026-11-17")]
#[case(Method::PATCH, "/api/v1/field/schedule/status")]
#[case(Method::GET, "/api/v1/field/schedule/pagination?page=1&limit=10")]
#[case(Method::GET, "/api/v1/field/schedule/7b0c5a4e-3c1f-4e8a-9d1b-2f6a8c0e4b12")]
#[case(Method::POST, "/api/v1/field/schedule")]
#[case(Method::POST, "/api/v1/field/schedule/one-month")]
#[case(Method::PUT, "/api/v1/field/schedule/7b0c5a4e-3c1f-4e8a-9d1b-2f6a8c0e4b12")]
#[case(Method::DELETE, "/api/v1/field/schedule/7b0c5a4e-3c1f-4e8a-9d1b-2f6a8c0e4b12")]
#[case(Method::GET, "/api/v1/time")]
#[case(Method::GET, "/api/v1/time/7b0c5a4e-3c1f-4e8a-9d1b-2f6a8c0e4b12")]
#[case(Method::POST, "/api/v1/time")]
#[tokio::test]
async fn test_unsigned_requests_are_rejected(#[case] method: Method, #[case] uri: &str) {
    // Nothing behind the guard may be reached
    let mut ctx = TestContext::new();
    ctx.users.expect_get_user_by_token().never();
    let app = ctx.into_app();

    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, "Bearer token-123")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(app, request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "unauthorized");
}

#[tokio::test]
async fn test_wrong_signature_is_rejected() {
    let app = TestContext::new().into_app();

    let request = Request::builder()
        .uri("/api/v1/field")
        .header("x-service-name", "booking-service")
        .header("x-request-at", "1700000000")
        .header("x-api-key", "not-the-right-key")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(app, request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_routes_need_bearer_token() {
    let mut ctx = TestContext::new();
    ctx.users.expect_get_user_by_token().never();
    let app = ctx.into_app();

    let (status, _) = send(app, empty_body(signed(Method::GET, "/api/v1/time"))).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_customer_cannot_reach_admin_routes() {
    let mut ctx = TestContext::new().signed_in_as("customer");
    ctx.times.expect_find_all().never();
    let app = ctx.into_app();

    let (status, body) = send(app, empty_body(authorized(Method::GET, "/api/v1/time"))).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "unauthorized");
}

#[tokio::test]
async fn test_user_service_failure_is_unauthorized() {
    let mut ctx = TestContext::new();
    ctx.users
        .expect_get_user_by_token()
        .returning(|_| Err(BookingError::Upstream(eyre!("connection refused"))));
    let app = ctx.into_app();

    let (status, _) = send(app, empty_body(authorized(Method::GET, "/api/v1/time"))).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_reaches_admin_routes() {
    let mut ctx = TestContext::new().signed_in_as("admin");
    ctx.times.expect_find_all().returning(|| Ok(vec![]));
    let app = ctx.into_app();

    let (status, body) = send(app, empty_body(authorized(Method::GET, "/api/v1/time"))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["data"], serde_json::json!([]));
}

#[tokio::test]
async fn test_unknown_path() {
    let app = TestContext::new().into_app();

    let (status, body) = send(app, empty_body(signed(Method::GET, "/api/v2/nothing"))).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Path Not Found");
}

#[tokio::test]
async fn test_welcome() {
    let app = TestContext::new().into_app();

    let request = Request::builder().uri("/").body(Body::empty()).unwrap();
    let (status, body) = send(app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Welcome to field service");
}

#[tokio::test]
async fn test_health() {
    let app = TestContext::new().into_app();

    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let (status, body) = send(app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "ok");
}

#[tokio::test]
async fn test_rate_limit_exceeded() {
    let mut ctx = TestContext::new();
    ctx.config.rate_limiter = RateLimiterConfig {
        max_request: 1,
        time_second: 60,
    };
    let app = ctx.into_app();

    let first = Request::builder().uri("/").body(Body::empty()).unwrap();
    let (status, _) = send(app.clone(), first).await;
    assert_eq!(status, StatusCode::OK);

    let second = Request::builder().uri("/").body(Body::empty()).unwrap();
    let (status, body) = send(app, second).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["message"], "too many requests");
}

#[tokio::test]
async fn test_malformed_uuid_is_bad_request() {
    let app = TestContext::new().into_app();

    let (status, body) = send(
        app,
        empty_body(signed(Method::GET, "/api/v1/field/not-a-uuid")),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");
}
