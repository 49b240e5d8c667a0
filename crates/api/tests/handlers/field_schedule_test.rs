use axum::http::{Method, StatusCode};
use chrono::NaiveDate;
use field_service_core::{errors::BookingError, models::field_schedule::FieldScheduleStatus};
use mockall::predicate::eq;
use pretty_assertions::assert_eq;
use serde_json::json;
use uuid::Uuid;

use crate::test_utils::{
    TestContext, authorized, db_field, db_schedule_detail, db_time, empty_body, json_body, send,
    signed,
};

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 11, day).unwrap()
}

#[tokio::test]
async fn test_create_schedules() {
    let mut ctx = TestContext::new().signed_in_as("admin");
    ctx.fields
        .expect_find_by_uuid()
        .returning(|uuid| Ok(db_field(uuid)));
    ctx.times
        .expect_find_by_uuid()
        .returning(|_| Ok(db_time(1, 8)));
    ctx.schedules
        .expect_find_by_date_and_time_id()
        .returning(|_, _, _| Ok(None));
    ctx.schedules
        .expect_create()
        .withf(|rows| rows.len() == 1 && rows[0].date == NaiveDate::from_ymd_opt(2026, 11, 2).unwrap())
        .times(1)
        .returning(|_| Ok(()));
    let app = ctx.into_app();

    let request = json_body(
        authorized(Method::POST, "/api/v1/field/schedule"),
        json!({
            "fieldID": Uuid::new_v4(),
            "date": "2026-11-02",
            "timeIDs": [Uuid::new_v4()],
        }),
    );
    let (status, body) = send(app, request).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "success");
}

#[tokio::test]
async fn test_create_schedules_requires_times() {
    let mut ctx = TestContext::new().signed_in_as("admin");
    ctx.schedules.expect_create().never();
    let app = ctx.into_app();

    let request = json_body(
        authorized(Method::POST, "/api/v1/field/schedule"),
        json!({
            "fieldID": Uuid::new_v4(),
            "date": "2026-11-02",
            "timeIDs": [],
        }),
    );
    let (status, body) = send(app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Unprocessable Entity");
    assert_eq!(body["data"][0]["field"], "time_ids");
}

#[tokio::test]
async fn test_create_schedules_with_malformed_json() {
    let app = TestContext::new().signed_in_as("admin").into_app();

    let request = json_body(
        authorized(Method::POST, "/api/v1/field/schedule"),
        json!({ "fieldID": "not-a-uuid" }),
    );
    let (status, body) = send(app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");
}

#[tokio::test]
async fn test_create_duplicate_schedule_conflicts() {
    let mut ctx = TestContext::new().signed_in_as("admin");
    ctx.fields
        .expect_find_by_uuid()
        .returning(|uuid| Ok(db_field(uuid)));
    ctx.times
        .expect_find_by_uuid()
        .returning(|_| Ok(db_time(1, 8)));
    ctx.schedules
        .expect_find_by_date_and_time_id()
        .returning(|_, _, _| Ok(None));
    // Lost the race: the unique index rejects the insert
    ctx.schedules
        .expect_create()
        .returning(|_| Err(BookingError::FieldScheduleAlreadyExists));
    let app = ctx.into_app();

    let request = json_body(
        authorized(Method::POST, "/api/v1/field/schedule"),
        json!({
            "fieldID": Uuid::new_v4(),
            "date": "2026-11-02",
            "timeIDs": [Uuid::new_v4()],
        }),
    );
    let (status, body) = send(app, request).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "field schedule already exists");
}

#[tokio::test]
async fn test_update_status_with_signature_only() {
    let a = Uuid::new_v4();
    let mut ctx = TestContext::new();
    ctx.users.expect_get_user_by_token().never();
    ctx.schedules
        .expect_find_by_uuid()
        .with(eq(a))
        .returning(|uuid| Ok(db_schedule_detail(uuid, NaiveDate::from_ymd_opt(2026, 11, 2).unwrap())));
    ctx.schedules
        .expect_update_status()
        .with(eq(a), eq(FieldScheduleStatus::Booked))
        .times(1)
        .returning(|_, _| Ok(()));
    let app = ctx.into_app();

    let request = json_body(
        signed(Method::PATCH, "/api/v1/field/schedule/status"),
        json!({ "fieldScheduleIDs": [a] }),
    );
    let (status, _) = send(app, request).await;

    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_update_status_reports_missing_schedule() {
    let missing = Uuid::new_v4();
    let mut ctx = TestContext::new();
    ctx.schedules
        .expect_find_by_uuid()
        .returning(|_| Err(BookingError::FieldScheduleNotFound));
    ctx.schedules.expect_update_status().never();
    let app = ctx.into_app();

    let request = json_body(
        signed(Method::PATCH, "/api/v1/field/schedule/status"),
        json!({ "fieldScheduleIDs": [missing] }),
    );
    let (status, body) = send(app, request).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body["message"],
        format!("field schedule {} not found", missing)
    );
}

#[tokio::test]
async fn test_list_by_field_and_date() {
    let field_uuid = Uuid::new_v4();
    let mut ctx = TestContext::new();
    ctx.fields
        .expect_find_by_uuid()
        .with(eq(field_uuid))
        .returning(|uuid| Ok(db_field(uuid)));
    ctx.schedules
        .expect_find_all_by_field_and_date()
        .with(eq(field_uuid), eq(date(17)))
        .returning(|_, date| Ok(vec![db_schedule_detail(Uuid::new_v4(), date)]));
    let app = ctx.into_app();

    let (status, body) = send(
        app,
        empty_body(signed(
            Method::GET,
            &format!("/api/v1/field/schedule/lists/{}?date=2026-11-17", field_uuid),
        )),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["date"], "17 Nov");
    assert_eq!(body["data"][0]["status"], "Available");
    assert_eq!(body["data"][0]["time"], "08:00:00 - 09:00:00");
}

#[tokio::test]
async fn test_get_schedule_for_customer() {
    let uuid = Uuid::new_v4();
    let mut ctx = TestContext::new().signed_in_as("customer");
    ctx.schedules
        .expect_find_by_uuid()
        .with(eq(uuid))
        .returning(|uuid| Ok(db_schedule_detail(uuid, NaiveDate::from_ymd_opt(2026, 8, 17).unwrap())));
    let app = ctx.into_app();

    let (status, body) = send(
        app,
        empty_body(authorized(
            Method::GET,
            &format!("/api/v1/field/schedule/{}", uuid),
        )),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["date"], "2026-08-17");
    assert_eq!(body["data"]["fieldName"], "Lapangan A");
}

#[tokio::test]
async fn test_generate_one_month() {
    let mut ctx = TestContext::new().signed_in_as("admin");
    ctx.fields
        .expect_find_by_uuid()
        .returning(|uuid| Ok(db_field(uuid)));
    ctx.times
        .expect_find_all()
        .returning(|| Ok(vec![db_time(1, 8), db_time(2, 9)]));
    ctx.schedules
        .expect_find_by_date_and_time_id()
        .returning(|_, _, _| Ok(None));
    ctx.schedules
        .expect_create()
        .withf(|rows| rows.len() == 60)
        .times(1)
        .returning(|_| Ok(()));
    let app = ctx.into_app();

    let request = json_body(
        authorized(Method::POST, "/api/v1/field/schedule/one-month"),
        json!({ "fieldID": Uuid::new_v4() }),
    );
    let (status, _) = send(app, request).await;

    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_delete_schedule() {
    let uuid = Uuid::new_v4();
    let mut ctx = TestContext::new().signed_in_as("admin");
    ctx.schedules
        .expect_find_by_uuid()
        .returning(|uuid| Ok(db_schedule_detail(uuid, NaiveDate::from_ymd_opt(2026, 11, 2).unwrap())));
    ctx.schedules
        .expect_delete()
        .with(eq(uuid))
        .times(1)
        .returning(|_| Ok(()));
    let app = ctx.into_app();

    let (status, _) = send(
        app,
        empty_body(authorized(
            Method::DELETE,
            &format!("/api/v1/field/schedule/{}", uuid),
        )),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
}
