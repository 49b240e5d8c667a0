pub mod models;
pub mod repositories;
pub mod schema;

use std::time::Duration;

use eyre::Result;
use serde::Deserialize;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{Pool, Postgres};
use tracing::info;

pub type DbPool = Pool<Postgres>;

/// Connection settings for the PostgreSQL pool.
#[derive(Debug, Clone, Deserialize)]
pub struct DbSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_username")]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default = "default_max_open_connections")]
    pub max_open_connections: u32,
    #[serde(default = "default_max_idle_connections")]
    pub max_idle_connections: u32,
    /// Seconds a connection may live before it is recycled.
    #[serde(default = "default_max_lifetime_connection")]
    pub max_lifetime_connection: u64,
    /// Seconds an idle connection is kept around.
    #[serde(default = "default_max_idle_time")]
    pub max_idle_time: u64,
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    5432
}

fn default_name() -> String {
    "field_service".to_string()
}

fn default_username() -> String {
    "postgres".to_string()
}

fn default_max_open_connections() -> u32 {
    10
}

fn default_max_idle_connections() -> u32 {
    2
}

fn default_max_lifetime_connection() -> u64 {
    3600
}

fn default_max_idle_time() -> u64 {
    600
}

impl Default for DbSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            name: default_name(),
            username: default_username(),
            password: String::new(),
            max_open_connections: default_max_open_connections(),
            max_idle_connections: default_max_idle_connections(),
            max_lifetime_connection: default_max_lifetime_connection(),
            max_idle_time: default_max_idle_time(),
        }
    }
}

impl DbSettings {
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .database(&self.name)
            .username(&self.username)
            .password(&self.password)
    }
}

pub async fn create_pool(settings: &DbSettings) -> Result<DbPool> {
    info!(
        "Connecting to database {} at {}:{}",
        settings.name, settings.host, settings.port
    );

    let pool = PgPoolOptions::new()
        .max_connections(settings.max_open_connections)
        .min_connections(settings.max_idle_connections.min(settings.max_open_connections))
        .max_lifetime(Duration::from_secs(settings.max_lifetime_connection))
        .idle_timeout(Duration::from_secs(settings.max_idle_time))
        .connect_with(settings.connect_options())
        .await?;

    Ok(pool)
}
