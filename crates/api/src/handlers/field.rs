use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
};
use field_service_core::{
    errors::{BookingError, FieldViolation},
    models::{
        field::{FieldForm, FieldRequest, FieldResponse, UpdateFieldRequest, UploadedImage},
        pagination::{PaginationParam, PaginationResult},
    },
};
use validator::Validate;

use crate::{
    ApiState,
    middleware::{
        error_handling::AppError,
        extract::{UuidPath, ValidQuery},
        response::ApiResponse,
    },
};

/// Multipart part names of the field form.
const PART_CODE: &str = "code";
const PART_NAME: &str = "name";
const PART_PRICE_PER_HOUR: &str = "pricePerHour";
const PART_IMAGES: &str = "images";

/// Text parts plus any image parts found in the form. `images` is `None`
/// when no image part was sent at all.
struct FieldMultipart {
    form: FieldForm,
    images: Option<Vec<UploadedImage>>,
}

fn multipart_error(err: axum::extract::multipart::MultipartError) -> AppError {
    AppError(BookingError::BadRequest(err.body_text()))
}

async fn read_field_multipart(mut multipart: Multipart) -> Result<FieldMultipart, AppError> {
    let mut form = FieldForm::default();
    let mut images: Option<Vec<UploadedImage>> = None;

    while let Some(part) = multipart.next_field().await.map_err(multipart_error)? {
        let Some(name) = part.name().map(str::to_string) else {
            continue;
        };

        match name.as_str() {
            PART_CODE => form.code = Some(part.text().await.map_err(multipart_error)?),
            PART_NAME => form.name = Some(part.text().await.map_err(multipart_error)?),
            PART_PRICE_PER_HOUR => {
                let text = part.text().await.map_err(multipart_error)?;
                let price = text.trim().parse::<i32>().map_err(|_| {
                    AppError(BookingError::Validation(vec![FieldViolation {
                        field: PART_PRICE_PER_HOUR.to_string(),
                        message: "pricePerHour must be a whole number".to_string(),
                    }]))
                })?;
                form.price_per_hour = Some(price);
            }
            PART_IMAGES => {
                let file_name = part.file_name().unwrap_or_default().to_string();
                let content_type = part.content_type().map(str::to_string);
                let data = part.bytes().await.map_err(multipart_error)?.to_vec();

                // Browsers send an empty part for an untouched file input,
                // which counts as no image at all.
                if file_name.is_empty() && data.is_empty() {
                    continue;
                }
                images.get_or_insert_with(Vec::new).push(UploadedImage {
                    file_name,
                    content_type,
                    data,
                });
            }
            _ => {}
        }
    }

    form.validate()?;

    Ok(FieldMultipart { form, images })
}

#[axum::debug_handler]
pub async fn get_all_with_pagination(
    State(state): State<Arc<ApiState>>,
    ValidQuery(param): ValidQuery<PaginationParam>,
) -> Result<ApiResponse<PaginationResult<FieldResponse>>, AppError> {
    let page = state.services.field.get_all_with_pagination(&param).await?;
    Ok(ApiResponse::ok(page))
}

#[axum::debug_handler]
pub async fn get_all_without_pagination(
    State(state): State<Arc<ApiState>>,
) -> Result<ApiResponse<Vec<FieldResponse>>, AppError> {
    let fields = state.services.field.get_all_without_pagination().await?;
    Ok(ApiResponse::ok(fields))
}

#[axum::debug_handler]
pub async fn get_by_uuid(
    State(state): State<Arc<ApiState>>,
    UuidPath(uuid): UuidPath,
) -> Result<ApiResponse<FieldResponse>, AppError> {
    let field = state.services.field.get_by_uuid(uuid).await?;
    Ok(ApiResponse::ok(field))
}

#[axum::debug_handler]
pub async fn create(
    State(state): State<Arc<ApiState>>,
    multipart: Multipart,
) -> Result<ApiResponse<FieldResponse>, AppError> {
    let FieldMultipart { form, images } = read_field_multipart(multipart).await?;

    let request = FieldRequest {
        code: form.code.unwrap_or_default(),
        name: form.name.unwrap_or_default(),
        price_per_hour: form.price_per_hour.unwrap_or_default(),
        images: images.unwrap_or_default(),
    };
    let field = state.services.field.create(request).await?;

    Ok(ApiResponse::created(field))
}

#[axum::debug_handler]
pub async fn update(
    State(state): State<Arc<ApiState>>,
    UuidPath(uuid): UuidPath,
    multipart: Multipart,
) -> Result<ApiResponse<FieldResponse>, AppError> {
    let FieldMultipart { form, images } = read_field_multipart(multipart).await?;

    let request = UpdateFieldRequest {
        code: form.code.unwrap_or_default(),
        name: form.name.unwrap_or_default(),
        price_per_hour: form.price_per_hour.unwrap_or_default(),
        images,
    };
    let field = state.services.field.update(uuid, request).await?;

    Ok(ApiResponse::ok(field))
}

#[axum::debug_handler]
pub async fn delete(
    State(state): State<Arc<ApiState>>,
    UuidPath(uuid): UuidPath,
) -> Result<ApiResponse<()>, AppError> {
    state.services.field.delete(uuid).await?;
    Ok(ApiResponse::empty(StatusCode::OK))
}
