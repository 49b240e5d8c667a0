//! # Error Handling Middleware
//!
//! Maps [`BookingError`] to HTTP status codes and error envelopes so every
//! handler reports failures the same way. Infrastructure failures are
//! logged in full and shown to clients only as a generic message.
//!
//! The same envelope is used for routes that do not exist and for panics
//! caught by the global panic layer.

use std::any::Any;

use axum::{
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
};
use field_service_core::errors::{BookingError, ErrorKind};
use tracing::{error, warn};
use validator::ValidationErrors;

use crate::middleware::response::error_response;

/// Message used for field-level validation failures.
pub const UNPROCESSABLE_ENTITY: &str = "Unprocessable Entity";

/// Application error wrapper that provides HTTP status code mapping
///
/// `AppError` wraps [`BookingError`] and implements `IntoResponse`, so
/// handlers can return `Result<_, AppError>` and use `?` on service calls.
///
/// # Example
///
/// ```ignore
/// use axum::extract::{Path, State};
/// use field_service_api::middleware::{error_handling::AppError, response::ApiResponse};
///
/// async fn get_time(
///     State(state): State<Arc<ApiState>>,
///     Path(uuid): Path<Uuid>,
/// ) -> Result<ApiResponse<TimeResponse>, AppError> {
///     let time = state.services.time.get_by_uuid(uuid).await?;
///     Ok(ApiResponse::ok(time))
/// }
/// ```
#[derive(Debug)]
pub struct AppError(pub BookingError);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self.0.kind() {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::AlreadyExists => StatusCode::CONFLICT,
            ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorKind::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            ErrorKind::Infrastructure => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        match self.0 {
            BookingError::Validation(violations) => {
                error_response(status, UNPROCESSABLE_ENTITY, Some(violations))
            }
            err => {
                if err.kind() == ErrorKind::Infrastructure {
                    error!("Request failed: {:?}", err);
                } else {
                    warn!("Request rejected ({}): {}", err.code(), err);
                }
                error_response::<()>(status, err.public_message(), None)
            }
        }
    }
}

/// Allows `?` on service calls inside handlers.
impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        AppError(err)
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError(BookingError::from(errors))
    }
}

/// Anything unexpected that surfaced as an eyre report.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(BookingError::Internal(err))
    }
}

/// Fallback for unknown routes.
pub async fn not_found(uri: Uri) -> Response {
    warn!("No route for {}", uri);
    error_response::<()>(StatusCode::NOT_FOUND, "Path Not Found", None)
}

/// Turns a panic caught by the panic layer into a 500 envelope.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = err.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = err.downcast_ref::<&str>() {
        message.to_string()
    } else {
        "unknown panic".to_string()
    };
    error!("Recovered from panic: {}", detail);

    error_response::<()>(
        StatusCode::INTERNAL_SERVER_ERROR,
        "internal server error",
        None,
    )
}
