use color_eyre::eyre::Result;
use field_service_api::{config::ApiConfig, init_tracing};
use field_service_db::{create_pool, schema::initialize_database};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    let config = ApiConfig::load()?;
    init_tracing(&config)?;

    let db_pool = create_pool(&config.database).await?;

    initialize_database(&db_pool).await?;
    info!("Database schema initialized successfully.");

    Ok(())
}
