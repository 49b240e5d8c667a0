//! # Field Service API
//!
//! The API crate provides the web server for the field booking service. It
//! exposes RESTful endpoints for fields, time slots and field schedules.
//!
//! ## Architecture
//!
//! This crate follows a layered architecture:
//!
//! - **Routes**: Define API endpoints and which guards protect them
//! - **Handlers**: Bind and validate requests, wrap results in the envelope
//! - **Services**: Business rules on top of the repositories
//! - **Clients**: Calls to the user service and object storage
//! - **Middleware**: Authentication, rate limiting and error mapping
//! - **Config**: Configuration loading
//!
//! The API uses Axum as the web framework and SQLx for database interactions.

/// Outbound clients for the user service and object storage
pub mod clients;
/// Configuration module for API settings
pub mod config;
/// Request handlers
pub mod handlers;
/// Middleware for authentication, rate limiting and error handling
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;
/// Business rules for fields, times and schedules
pub mod services;

use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderName, HeaderValue, Method, header},
    middleware::from_fn_with_state,
};
use eyre::Result;
use field_service_db::{DbPool, repositories::RepositoryRegistry};
use tokio::net::TcpListener;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::FmtSubscriber;

use crate::{
    clients::{ClientRegistry, GcsStorage, HttpUserClient, ObjectStorage},
    config::ApiConfig,
    middleware::{
        auth::{X_API_KEY, X_REQUEST_AT, X_SERVICE_NAME},
        error_handling::{handle_panic, not_found},
        rate_limit::{GlobalRateLimiter, build_rate_limiter, rate_limit},
    },
    services::ServiceRegistry,
};

/// Shared application state that is accessible to all request handlers
///
/// Holds the loaded configuration, the services (which own the
/// repositories), the outbound clients and the process-wide rate limiter.
pub struct ApiState {
    pub config: ApiConfig,
    pub services: ServiceRegistry,
    pub clients: ClientRegistry,
    pub rate_limiter: Option<Arc<GlobalRateLimiter>>,
}

impl ApiState {
    /// Wires services to the given repositories and clients
    ///
    /// # Errors
    ///
    /// Fails when the configured time zone is unknown.
    pub fn new(
        config: ApiConfig,
        repositories: RepositoryRegistry,
        clients: ClientRegistry,
        storage: Arc<dyn ObjectStorage>,
    ) -> Result<Self> {
        let time_zone = config.time_zone()?;
        let services = ServiceRegistry::new(&repositories, storage, time_zone);
        let rate_limiter = build_rate_limiter(&config.rate_limiter);

        Ok(Self {
            config,
            services,
            clients,
            rate_limiter,
        })
    }
}

fn cors_layer(config: &ApiConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
            HeaderName::from_static(X_SERVICE_NAME),
            HeaderName::from_static(X_API_KEY),
            HeaderName::from_static(X_REQUEST_AT),
        ]);

    match config.cors_origins() {
        Some(origins) => cors
            .allow_origin(AllowOrigin::list(
                origins
                    .iter()
                    .filter_map(|origin| origin.parse::<HeaderValue>().ok()),
            ))
            .allow_credentials(true),
        None => cors.allow_origin(Any),
    }
}

/// Builds the application router with every route and global layer
///
/// Split out of [`start_server`] so tests can drive the exact router the
/// server runs.
pub fn build_router(state: Arc<ApiState>) -> Router {
    let config = &state.config;

    Router::new()
        // Welcome and health endpoints
        .merge(routes::root())
        .merge(routes::health::routes())
        // Versioned API
        .nest(routes::API_V1, routes::api_v1(state.clone()))
        .fallback(not_found)
        .layer(from_fn_with_state(state.clone(), rate_limit))
        .layer(DefaultBodyLimit::max(config.max_upload_body_bytes))
        .layer(cors_layer(config))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.request_timeout_seconds,
        )))
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(handle_panic))
        .with_state(state)
}

/// Installs the global `FmtSubscriber` at the configured level
///
/// Binaries call this before connecting to the database so startup logs
/// are not lost. Fails if a global subscriber is already set.
pub fn init_tracing(config: &ApiConfig) -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level())
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}

/// Starts the API server with the provided configuration and database connection
///
/// This function connects the outbound clients, builds the router and
/// serves until the process is stopped. Logging is set up beforehand with
/// [`init_tracing`].
///
/// # Example
///
/// ```ignore
/// let config = ApiConfig::load()?;
/// init_tracing(&config)?;
/// let db_pool = field_service_db::create_pool(&config.database).await?;
/// start_server(config, db_pool).await?;
/// ```
pub async fn start_server(config: ApiConfig, db_pool: DbPool) -> Result<()> {
    let repositories = RepositoryRegistry::new(db_pool);
    let clients = ClientRegistry::new(Arc::new(HttpUserClient::new(&config)?));
    let storage = Arc::new(GcsStorage::new(&config.storage)?);

    let addr = config.server_addr();
    let state = Arc::new(ApiState::new(config, repositories, clients, storage)?);
    let app = build_router(state);

    // Start the HTTP server
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
