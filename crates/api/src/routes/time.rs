use std::sync::Arc;

use axum::{Router, middleware::from_fn_with_state, routing::get};

use crate::{
    ApiState, handlers,
    middleware::auth::{authenticate, require_admin},
};

pub fn routes(state: Arc<ApiState>) -> Router<Arc<ApiState>> {
    Router::new()
        .route("/time", get(handlers::time::get_all).post(handlers::time::create))
        .route("/time/:uuid", get(handlers::time::get_by_uuid))
        .route_layer(from_fn_with_state(state.clone(), require_admin))
        .route_layer(from_fn_with_state(state, authenticate))
}
