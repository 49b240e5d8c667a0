use std::sync::Arc;

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};

use crate::{
    ApiState, handlers,
    middleware::auth::{authenticate, authenticate_without_token, require_admin, require_admin_or_customer},
};

pub fn routes(state: Arc<ApiState>) -> Router<Arc<ApiState>> {
    let public = Router::new()
        .route("/field", get(handlers::field::get_all_without_pagination))
        .route("/field/:uuid", get(handlers::field::get_by_uuid))
        .route_layer(from_fn_with_state(state.clone(), authenticate_without_token));

    let members = Router::new()
        .route("/field/pagination", get(handlers::field::get_all_with_pagination))
        .route_layer(from_fn_with_state(state.clone(), require_admin_or_customer))
        .route_layer(from_fn_with_state(state.clone(), authenticate));

    let admin = Router::new()
        .route("/field", post(handlers::field::create))
        .route(
            "/field/:uuid",
            axum::routing::put(handlers::field::update).delete(handlers::field::delete),
        )
        .route_layer(from_fn_with_state(state.clone(), require_admin))
        .route_layer(from_fn_with_state(state, authenticate));

    Router::new().merge(public).merge(members).merge(admin)
}
