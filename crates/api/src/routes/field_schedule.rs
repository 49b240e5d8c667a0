use std::sync::Arc;

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, patch, post, put},
};

use crate::{
    ApiState, handlers,
    middleware::auth::{authenticate, authenticate_without_token, require_admin, require_admin_or_customer},
};

pub fn routes(state: Arc<ApiState>) -> Router<Arc<ApiState>> {
    // Called by the booking service, which has no user token to forward.
    let service = Router::new()
        .route(
            "/field/schedule/lists/:uuid",
            get(handlers::field_schedule::get_all_by_field_and_date),
        )
        .route(
            "/field/schedule/status",
            patch(handlers::field_schedule::update_status),
        )
        .route_layer(from_fn_with_state(state.clone(), authenticate_without_token));

    let members = Router::new()
        .route(
            "/field/schedule/pagination",
            get(handlers::field_schedule::get_all_with_pagination),
        )
        .route(
            "/field/schedule/:uuid",
            get(handlers::field_schedule::get_by_uuid),
        )
        .route_layer(from_fn_with_state(state.clone(), require_admin_or_customer))
        .route_layer(from_fn_with_state(state.clone(), authenticate));

    let admin = Router::new()
        .route("/field/schedule", post(handlers::field_schedule::create))
        .route(
            "/field/schedule/one-month",
            post(handlers::field_schedule::generate_for_one_month),
        )
        .route(
            "/field/schedule/:uuid",
            put(handlers::field_schedule::update).delete(handlers::field_schedule::delete),
        )
        .route_layer(from_fn_with_state(state.clone(), require_admin))
        .route_layer(from_fn_with_state(state, authenticate));

    Router::new().merge(service).merge(members).merge(admin)
}
