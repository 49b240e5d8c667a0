use axum::http::{Method, StatusCode};
use chrono::Utc;
use field_service_db::models::DbTime;
use pretty_assertions::assert_eq;
use serde_json::json;
use uuid::Uuid;

use crate::test_utils::{TestContext, authorized, json_body, send};

#[tokio::test]
async fn test_create_time() {
    let mut ctx = TestContext::new().signed_in_as("admin");
    ctx.times.expect_create().times(1).returning(|time| {
        Ok(DbTime {
            id: 1,
            uuid: Uuid::new_v4(),
            start_time: time.start_time,
            end_time: time.end_time,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        })
    });
    let app = ctx.into_app();

    let request = json_body(
        authorized(Method::POST, "/api/v1/time"),
        json!({ "startTime": "19:00:00", "endTime": "20:00:00" }),
    );
    let (status, body) = send(app, request).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["startTime"], "19:00:00");
    assert_eq!(body["data"]["endTime"], "20:00:00");
}

#[tokio::test]
async fn test_create_time_with_inverted_range() {
    let mut ctx = TestContext::new().signed_in_as("admin");
    ctx.times.expect_create().never();
    let app = ctx.into_app();

    let request = json_body(
        authorized(Method::POST, "/api/v1/time"),
        json!({ "startTime": "20:00:00", "endTime": "19:00:00" }),
    );
    let (status, body) = send(app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Unprocessable Entity");
    assert_eq!(body["data"][0]["field"], "endTime");
}

#[tokio::test]
async fn test_create_time_with_bad_clock_value() {
    let mut ctx = TestContext::new().signed_in_as("admin");
    ctx.times.expect_create().never();
    let app = ctx.into_app();

    let request = json_body(
        authorized(Method::POST, "/api/v1/time"),
        json!({ "startTime": "25:00:00", "endTime": "26:00:00" }),
    );
    let (status, _) = send(app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}
