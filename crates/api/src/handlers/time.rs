use std::sync::Arc;

use axum::extract::State;
use field_service_core::models::time::{TimeRequest, TimeResponse};

use crate::{
    ApiState,
    middleware::{
        error_handling::AppError,
        extract::{UuidPath, ValidJson},
        response::ApiResponse,
    },
};

#[axum::debug_handler]
pub async fn get_all(
    State(state): State<Arc<ApiState>>,
) -> Result<ApiResponse<Vec<TimeResponse>>, AppError> {
    let times = state.services.time.get_all().await?;
    Ok(ApiResponse::ok(times))
}

#[axum::debug_handler]
pub async fn get_by_uuid(
    State(state): State<Arc<ApiState>>,
    UuidPath(uuid): UuidPath,
) -> Result<ApiResponse<TimeResponse>, AppError> {
    let time = state.services.time.get_by_uuid(uuid).await?;
    Ok(ApiResponse::ok(time))
}

#[axum::debug_handler]
pub async fn create(
    State(state): State<Arc<ApiState>>,
    ValidJson(request): ValidJson<TimeRequest>,
) -> Result<ApiResponse<TimeResponse>, AppError> {
    let time = state.services.time.create(request).await?;
    Ok(ApiResponse::created(time))
}
