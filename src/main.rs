use color_eyre::eyre::Result;
use field_service_api::{config::ApiConfig, init_tracing};
use field_service_db::{create_pool, schema::initialize_database};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load configuration (file, then FIELD_SERVICE__* overrides)
    let config = ApiConfig::load()?;

    // Logging first so pool and schema setup are visible
    init_tracing(&config)?;

    // Create database connection pool
    let db_pool = create_pool(&config.database).await?;

    // Initialize database schema
    initialize_database(&db_pool).await?;

    // Start API server
    field_service_api::start_server(config, db_pool).await?;

    Ok(())
}
