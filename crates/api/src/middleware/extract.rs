use axum::{
    Json,
    async_trait,
    extract::{FromRequest, FromRequestParts, Path, Query, Request},
    http::request::Parts,
};
use field_service_core::errors::BookingError;
use serde::de::DeserializeOwned;
use uuid::Uuid;
use validator::Validate;

use crate::middleware::error_handling::AppError;

/// JSON body that is deserialized and then validated.
#[derive(Debug, Clone)]
pub struct ValidJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(request, state)
            .await
            .map_err(|rejection| AppError(BookingError::BadRequest(rejection.body_text())))?;
        value.validate()?;

        Ok(Self(value))
    }
}

/// Query string that is deserialized and then validated.
#[derive(Debug, Clone)]
pub struct ValidQuery<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ValidQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError(BookingError::BadRequest(rejection.body_text())))?;
        value.validate()?;

        Ok(Self(value))
    }
}

/// A `:uuid` path segment.
#[derive(Debug, Clone, Copy)]
pub struct UuidPath(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for UuidPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(uuid) = Path::<Uuid>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError(BookingError::BadRequest(rejection.body_text())))?;

        Ok(Self(uuid))
    }
}
