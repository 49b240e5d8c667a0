use std::{num::NonZeroU32, sync::Arc, time::Duration};

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use field_service_core::errors::BookingError;
use governor::{Quota, RateLimiter};
use tracing::{info, warn};

use crate::{ApiState, config::RateLimiterConfig, middleware::error_handling::AppError};

pub type GlobalRateLimiter = RateLimiter<
    governor::state::NotKeyed,
    governor::state::InMemoryState,
    governor::clock::DefaultClock,
>;

/// `max_request` requests per `time_second` window, shared by all callers.
/// Returns `None` when either value is zero.
pub fn build_rate_limiter(config: &RateLimiterConfig) -> Option<Arc<GlobalRateLimiter>> {
    let burst = NonZeroU32::new(config.max_request)?;
    if config.time_second == 0 {
        return None;
    }

    // Huge bursts over short windows would truncate to a zero period.
    let period = (Duration::from_secs(config.time_second) / config.max_request)
        .max(Duration::from_nanos(1));
    let quota = Quota::with_period(period)?.allow_burst(burst);
    info!(
        "Rate limiting to {} requests per {}s",
        config.max_request, config.time_second
    );

    Some(Arc::new(RateLimiter::direct(quota)))
}

pub async fn rate_limit(
    State(state): State<Arc<ApiState>>,
    request: Request,
    next: Next,
) -> Response {
    if let Some(limiter) = &state.rate_limiter {
        if limiter.check().is_err() {
            warn!("Rate limit exceeded for {}", request.uri());
            return AppError(BookingError::TooManyRequests).into_response();
        }
    }

    next.run(request).await
}
