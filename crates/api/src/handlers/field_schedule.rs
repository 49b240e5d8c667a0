use std::sync::Arc;

use axum::{extract::State, http::StatusCode};
use field_service_core::models::{
    field_schedule::{
        FieldScheduleByDateParam, FieldScheduleForBookingResponse, FieldScheduleRequest,
        FieldScheduleResponse, GenerateFieldScheduleForOneMonthRequest,
        UpdateFieldScheduleRequest, UpdateStatusFieldScheduleRequest,
    },
    pagination::{PaginationParam, PaginationResult},
};

use crate::{
    ApiState,
    middleware::{
        error_handling::AppError,
        extract::{UuidPath, ValidJson, ValidQuery},
        response::ApiResponse,
    },
};

#[axum::debug_handler]
pub async fn get_all_with_pagination(
    State(state): State<Arc<ApiState>>,
    ValidQuery(param): ValidQuery<PaginationParam>,
) -> Result<ApiResponse<PaginationResult<FieldScheduleResponse>>, AppError> {
    let page = state
        .services
        .field_schedule
        .get_all_with_pagination(&param)
        .await?;
    Ok(ApiResponse::ok(page))
}

/// Schedules of one field on one date, for the booking calendar.
#[axum::debug_handler]
pub async fn get_all_by_field_and_date(
    State(state): State<Arc<ApiState>>,
    UuidPath(field_uuid): UuidPath,
    ValidQuery(param): ValidQuery<FieldScheduleByDateParam>,
) -> Result<ApiResponse<Vec<FieldScheduleForBookingResponse>>, AppError> {
    let schedules = state
        .services
        .field_schedule
        .get_all_by_field_and_date(field_uuid, param.date)
        .await?;
    Ok(ApiResponse::ok(schedules))
}

#[axum::debug_handler]
pub async fn get_by_uuid(
    State(state): State<Arc<ApiState>>,
    UuidPath(uuid): UuidPath,
) -> Result<ApiResponse<FieldScheduleResponse>, AppError> {
    let schedule = state.services.field_schedule.get_by_uuid(uuid).await?;
    Ok(ApiResponse::ok(schedule))
}

#[axum::debug_handler]
pub async fn create(
    State(state): State<Arc<ApiState>>,
    ValidJson(request): ValidJson<FieldScheduleRequest>,
) -> Result<ApiResponse<()>, AppError> {
    state.services.field_schedule.create(request).await?;
    Ok(ApiResponse::empty(StatusCode::CREATED))
}

#[axum::debug_handler]
pub async fn generate_for_one_month(
    State(state): State<Arc<ApiState>>,
    ValidJson(request): ValidJson<GenerateFieldScheduleForOneMonthRequest>,
) -> Result<ApiResponse<()>, AppError> {
    state
        .services
        .field_schedule
        .generate_for_one_month(request)
        .await?;
    Ok(ApiResponse::empty(StatusCode::CREATED))
}

#[axum::debug_handler]
pub async fn update(
    State(state): State<Arc<ApiState>>,
    UuidPath(uuid): UuidPath,
    ValidJson(request): ValidJson<UpdateFieldScheduleRequest>,
) -> Result<ApiResponse<FieldScheduleResponse>, AppError> {
    let schedule = state.services.field_schedule.update(uuid, request).await?;
    Ok(ApiResponse::ok(schedule))
}

#[axum::debug_handler]
pub async fn update_status(
    State(state): State<Arc<ApiState>>,
    ValidJson(request): ValidJson<UpdateStatusFieldScheduleRequest>,
) -> Result<ApiResponse<()>, AppError> {
    state.services.field_schedule.update_status(request).await?;
    Ok(ApiResponse::empty(StatusCode::OK))
}

#[axum::debug_handler]
pub async fn delete(
    State(state): State<Arc<ApiState>>,
    UuidPath(uuid): UuidPath,
) -> Result<ApiResponse<()>, AppError> {
    state.services.field_schedule.delete(uuid).await?;
    Ok(ApiResponse::empty(StatusCode::OK))
}
