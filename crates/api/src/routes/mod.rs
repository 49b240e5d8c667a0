pub mod field;
pub mod field_schedule;
pub mod health;
pub mod time;

use std::sync::Arc;

use axum::{Router, routing::get};

use crate::{ApiState, middleware::response::ApiResponse};

/// Prefix of every versioned endpoint.
pub const API_V1: &str = "/api/v1";

async fn welcome() -> ApiResponse<()> {
    ApiResponse::message(axum::http::StatusCode::OK, "Welcome to field service")
}

/// Everything under `/api/v1`.
pub fn api_v1(state: Arc<ApiState>) -> Router<Arc<ApiState>> {
    Router::new()
        .merge(field::routes(state.clone()))
        .merge(field_schedule::routes(state.clone()))
        .merge(time::routes(state))
}

pub fn root() -> Router<Arc<ApiState>> {
    Router::new().route("/", get(welcome))
}
