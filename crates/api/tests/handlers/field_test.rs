use axum::http::{Method, StatusCode};
use field_service_core::errors::BookingError;
use mockall::predicate::eq;
use pretty_assertions::assert_eq;
use uuid::Uuid;

use crate::test_utils::{
    Part, TestContext, authorized, db_field, empty_body, multipart_body, send, signed,
};

#[tokio::test]
async fn test_list_fields_with_signature_only() {
    let mut ctx = TestContext::new();
    ctx.fields
        .expect_find_all_without_pagination()
        .returning(|| Ok(vec![db_field(Uuid::new_v4()), db_field(Uuid::new_v4())]));
    let app = ctx.into_app();

    let (status, body) = send(app, empty_body(signed(Method::GET, "/api/v1/field"))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    assert_eq!(body["data"][0]["pricePerHour"], 150_000);
}

#[tokio::test]
async fn test_get_missing_field() {
    let uuid = Uuid::new_v4();
    let mut ctx = TestContext::new();
    ctx.fields
        .expect_find_by_uuid()
        .with(eq(uuid))
        .returning(|_| Err(BookingError::FieldNotFound));
    let app = ctx.into_app();

    let (status, body) = send(
        app,
        empty_body(signed(Method::GET, &format!("/api/v1/field/{}", uuid))),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "field not found");
}

#[tokio::test]
async fn test_paginated_fields_for_customer() {
    let mut ctx = TestContext::new().signed_in_as("customer");
    ctx.fields
        .expect_find_all_with_pagination()
        .withf(|param| param.page == 2 && param.limit == 1 && param.sort_column.as_deref() == Some("name"))
        .returning(|_| Ok((vec![db_field(Uuid::new_v4())], 3)));
    let app = ctx.into_app();

    let (status, body) = send(
        app,
        empty_body(authorized(
            Method::GET,
            "/api/v1/field/pagination?page=2&limit=1&sortColumn=name&sortOrder=asc",
        )),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["totalPage"], 3);
    assert_eq!(body["data"]["nextPage"], 3);
    assert_eq!(body["data"]["previousPage"], 1);
}

#[tokio::test]
async fn test_pagination_limit_is_validated() {
    let mut ctx = TestContext::new().signed_in_as("admin");
    ctx.fields.expect_find_all_with_pagination().never();
    let app = ctx.into_app();

    let (status, body) = send(
        app,
        empty_body(authorized(
            Method::GET,
            "/api/v1/field/pagination?page=1&limit=0",
        )),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Unprocessable Entity");
    assert_eq!(body["data"][0]["field"], "limit");
}

#[tokio::test]
async fn test_pagination_page_is_bounded() {
    let mut ctx = TestContext::new().signed_in_as("admin");
    ctx.fields.expect_find_all_with_pagination().never();
    let app = ctx.into_app();

    let (status, body) = send(
        app,
        empty_body(authorized(
            Method::GET,
            &format!("/api/v1/field/pagination?page={}&limit=100", i64::MAX),
        )),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Unprocessable Entity");
    assert_eq!(body["data"][0]["field"], "page");
}

#[tokio::test]
async fn test_create_field_with_images() {
    let mut ctx = TestContext::new().signed_in_as("admin");
    ctx.storage
        .expect_upload_file()
        .times(2)
        .returning(|object, _, _| Ok(format!("https://cdn/{}", object)));
    ctx.fields
        .expect_create()
        .withf(|field| field.code == "F-02" && field.price_per_hour == 90_000 && field.images.len() == 2)
        .returning(|field| {
            let mut created = db_field(Uuid::new_v4());
            created.code = field.code;
            created.images = field.images;
            Ok(created)
        });
    let app = ctx.into_app();

    let request = multipart_body(
        authorized(Method::POST, "/api/v1/field"),
        vec![
            Part::Text("code", "F-02"),
            Part::Text("name", "Lapangan B"),
            Part::Text("pricePerHour", "90000"),
            Part::File("images", "front.png", vec![1, 2, 3]),
            Part::File("images", "side.png", vec![4, 5, 6]),
        ],
    );
    let (status, body) = send(app, request).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["code"], "F-02");
    let images = body["data"]["images"].as_array().unwrap();
    assert_eq!(images.len(), 2);
    assert!(images[0].as_str().unwrap().ends_with("-front.png"));
    assert!(images[1].as_str().unwrap().ends_with("-side.png"));
}

#[tokio::test]
async fn test_create_field_without_images() {
    let mut ctx = TestContext::new().signed_in_as("admin");
    ctx.storage.expect_upload_file().never();
    ctx.fields.expect_create().never();
    let app = ctx.into_app();

    let request = multipart_body(
        authorized(Method::POST, "/api/v1/field"),
        vec![
            Part::Text("code", "F-02"),
            Part::Text("name", "Lapangan B"),
            Part::Text("pricePerHour", "90000"),
        ],
    );
    let (status, body) = send(app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "invalid upload file");
}

#[tokio::test]
async fn test_create_field_missing_name() {
    let mut ctx = TestContext::new().signed_in_as("admin");
    ctx.fields.expect_create().never();
    let app = ctx.into_app();

    let request = multipart_body(
        authorized(Method::POST, "/api/v1/field"),
        vec![
            Part::Text("code", "F-02"),
            Part::Text("pricePerHour", "90000"),
            Part::File("images", "front.png", vec![1]),
        ],
    );
    let (status, body) = send(app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Unprocessable Entity");
    assert_eq!(body["data"][0]["field"], "name");
}

#[tokio::test]
async fn test_create_field_with_non_numeric_price() {
    let app = TestContext::new().signed_in_as("admin").into_app();

    let request = multipart_body(
        authorized(Method::POST, "/api/v1/field"),
        vec![
            Part::Text("code", "F-02"),
            Part::Text("name", "Lapangan B"),
            Part::Text("pricePerHour", "mahal"),
        ],
    );
    let (status, body) = send(app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["data"][0]["field"], "pricePerHour");
}

#[tokio::test]
async fn test_update_field_keeps_images_when_none_sent() {
    let uuid = Uuid::new_v4();
    let mut ctx = TestContext::new().signed_in_as("admin");
    ctx.storage.expect_upload_file().never();
    ctx.fields
        .expect_find_by_uuid()
        .returning(|uuid| Ok(db_field(uuid)));
    ctx.fields
        .expect_update()
        .withf(|_, changes| changes.images == vec!["https://cdn/a.png".to_string()])
        .returning(|uuid, changes| {
            let mut updated = db_field(uuid);
            updated.name = changes.name;
            Ok(updated)
        });
    let app = ctx.into_app();

    let request = multipart_body(
        authorized(Method::PUT, &format!("/api/v1/field/{}", uuid)),
        vec![
            Part::Text("code", "F-01"),
            Part::Text("name", "Lapangan Baru"),
            Part::Text("pricePerHour", "175000"),
        ],
    );
    let (status, body) = send(app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Lapangan Baru");
}

#[tokio::test]
async fn test_update_field_with_untouched_file_input_keeps_images() {
    let uuid = Uuid::new_v4();
    let mut ctx = TestContext::new().signed_in_as("admin");
    ctx.storage.expect_upload_file().never();
    ctx.fields
        .expect_find_by_uuid()
        .returning(|uuid| Ok(db_field(uuid)));
    ctx.fields
        .expect_update()
        .withf(|_, changes| changes.images == vec!["https://cdn/a.png".to_string()])
        .times(1)
        .returning(|uuid, _| Ok(db_field(uuid)));
    let app = ctx.into_app();

    let request = multipart_body(
        authorized(Method::PUT, &format!("/api/v1/field/{}", uuid)),
        vec![
            Part::Text("code", "F-01"),
            Part::Text("name", "Lapangan A"),
            Part::Text("pricePerHour", "150000"),
            Part::File("images", "", vec![]),
        ],
    );
    let (status, body) = send(app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["images"][0], "https://cdn/a.png");
}

#[tokio::test]
async fn test_delete_field_as_admin() {
    let uuid = Uuid::new_v4();
    let mut ctx = TestContext::new().signed_in_as("admin");
    ctx.fields
        .expect_find_by_uuid()
        .with(eq(uuid))
        .returning(|uuid| Ok(db_field(uuid)));
    ctx.fields
        .expect_delete()
        .with(eq(uuid))
        .times(1)
        .returning(|_| Ok(()));
    let app = ctx.into_app();

    let (status, body) = send(
        app,
        empty_body(authorized(Method::DELETE, &format!("/api/v1/field/{}", uuid))),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
}
