//! # Authentication Middleware
//!
//! Every `/api/v1` route is guarded by a shared-secret signature: callers
//! send `X-Service-Name`, `X-Request-At` and `X-Api-Key`, where the key is
//! the hex SHA-256 of `serviceName:signatureKey:requestAt`. Routes that act
//! on behalf of a user additionally require a bearer token, which the role
//! guards resolve through the user service.
//!
//! Any failed check answers 401 with the `unauthorized` envelope before the
//! handler runs.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{HeaderMap, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};
use field_service_core::{
    errors::BookingError,
    models::user::{Role, UserData},
};
use sha2::{Digest, Sha256};
use tracing::warn;

use crate::{ApiState, middleware::error_handling::AppError};

pub const X_API_KEY: &str = "x-api-key";
pub const X_SERVICE_NAME: &str = "x-service-name";
pub const X_REQUEST_AT: &str = "x-request-at";

const BEARER_PREFIX: &str = "Bearer ";

/// The caller's bearer token, stored in request extensions by
/// [`authenticate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BearerToken(pub String);

/// Hex SHA-256 of `serviceName:signatureKey:requestAt`.
pub fn generate_api_key(service_name: &str, signature_key: &str, request_at: &str) -> String {
    let digest = Sha256::digest(format!("{}:{}:{}", service_name, signature_key, request_at).as_bytes());
    format!("{:x}", digest)
}

fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

/// Checks `X-Api-Key` against the configured signature key. The request
/// time is not checked for freshness.
pub fn validate_api_key(headers: &HeaderMap, signature_key: &str) -> Result<(), AppError> {
    let (Some(api_key), Some(service_name), Some(request_at)) = (
        header(headers, X_API_KEY),
        header(headers, X_SERVICE_NAME),
        header(headers, X_REQUEST_AT),
    ) else {
        warn!("Request without signature headers");
        return Err(AppError(BookingError::Unauthorized));
    };

    if generate_api_key(service_name, signature_key, request_at) != api_key {
        warn!("Invalid api key from service {}", service_name);
        return Err(AppError(BookingError::Unauthorized));
    }

    Ok(())
}

pub fn bearer_token(headers: &HeaderMap) -> Option<BearerToken> {
    header(headers, AUTHORIZATION.as_str())
        .and_then(|value| value.strip_prefix(BEARER_PREFIX))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| BearerToken(token.to_string()))
}

/// Signature check only.
pub async fn authenticate_without_token(
    State(state): State<Arc<ApiState>>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    validate_api_key(request.headers(), &state.config.signature_key)?;
    Ok(next.run(request).await)
}

/// Bearer token, then signature.
pub async fn authenticate(
    State(state): State<Arc<ApiState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(token) = bearer_token(request.headers()) else {
        warn!("Request without bearer token");
        return Err(AppError(BookingError::Unauthorized));
    };
    validate_api_key(request.headers(), &state.config.signature_key)?;

    request.extensions_mut().insert(token);
    Ok(next.run(request).await)
}

pub async fn require_admin(
    State(state): State<Arc<ApiState>>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    check_role(&state, request, next, &[Role::Admin]).await
}

pub async fn require_admin_or_customer(
    State(state): State<Arc<ApiState>>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    check_role(&state, request, next, &[Role::Admin, Role::Customer]).await
}

async fn check_role(
    state: &ApiState,
    mut request: Request,
    next: Next,
    roles: &[Role],
) -> Result<Response, AppError> {
    let Some(token) = request.extensions().get::<BearerToken>().cloned() else {
        return Err(AppError(BookingError::Unauthorized));
    };

    let user: UserData = state
        .clients
        .user
        .get_user_by_token(&token.0)
        .await
        .map_err(|err| {
            warn!("Could not resolve user from token: {}", err);
            AppError(BookingError::Unauthorized)
        })?;

    if !user.has_any_role(roles) {
        warn!("User {} with role {} is not allowed here", user.uuid, user.role);
        return Err(AppError(BookingError::Unauthorized));
    }

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}
