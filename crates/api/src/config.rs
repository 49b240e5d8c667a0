//! # API Configuration Module
//!
//! This module loads the configuration for the field service. Values come
//! from an optional JSON file merged with environment variables, in that
//! order, so the environment always wins.
//!
//! ## Sources
//!
//! - `config.json` in the working directory, or the file named by
//!   `FIELD_SERVICE_CONFIG`
//! - Environment variables prefixed with `FIELD_SERVICE__`, using `__` to
//!   reach nested keys, e.g. `FIELD_SERVICE__DATABASE__HOST`
//!
//! A `.env` file is read first when present.

use std::env;

use chrono_tz::Tz;
use config::{Config, Environment, File, FileFormat};
use eyre::{Result, WrapErr, eyre};
use field_service_db::DbSettings;
use serde::Deserialize;
use tracing::Level;

/// Environment variable naming an alternative configuration file.
pub const CONFIG_PATH_VAR: &str = "FIELD_SERVICE_CONFIG";

const DEFAULT_CONFIG_PATH: &str = "config.json";
const ENV_PREFIX: &str = "FIELD_SERVICE";

/// Configuration for the field service API server
///
/// Every component receives the values it needs from this struct when the
/// server is assembled; nothing reads configuration at request time.
///
/// # Example
///
/// ```ignore
/// use field_service_api::config::ApiConfig;
///
/// let config = ApiConfig::load()?;
/// println!("Starting {} on {}", config.app_name, config.server_addr());
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Host address for the API server (e.g., "127.0.0.1", "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port for the API server to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Name this service signs its requests with
    #[serde(default = "default_app_name")]
    pub app_name: String,

    #[serde(default = "default_app_env")]
    pub app_env: String,

    /// Shared secret used to verify `X-Api-Key` on inbound requests
    #[serde(default)]
    pub signature_key: String,

    /// Log level for the application
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// IANA time zone used to decide what "tomorrow" means
    #[serde(default = "default_timezone")]
    pub timezone: String,

    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,

    /// Comma-separated list of allowed CORS origins; any origin when unset
    #[serde(default)]
    pub cors_origins: Option<String>,

    /// Largest request body accepted, in bytes
    #[serde(default = "default_max_upload_body_bytes")]
    pub max_upload_body_bytes: usize,

    #[serde(default)]
    pub database: DbSettings,

    #[serde(default)]
    pub rate_limiter: RateLimiterConfig,

    #[serde(default)]
    pub internal_service: InternalServiceConfig,

    #[serde(default)]
    pub storage: StorageConfig,
}

/// Global request budget. Either value set to zero disables limiting.
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimiterConfig {
    #[serde(default = "default_rate_limiter_max_request")]
    pub max_request: u32,
    #[serde(default = "default_rate_limiter_time_second")]
    pub time_second: u64,
}

impl Default for RateLimiterConfig {
    fn default() -> Self {
        Self {
            max_request: default_rate_limiter_max_request(),
            time_second: default_rate_limiter_time_second(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InternalServiceConfig {
    #[serde(default)]
    pub user: UserServiceConfig,
}

/// Connection details for the user service.
#[derive(Debug, Clone, Deserialize)]
pub struct UserServiceConfig {
    #[serde(default = "default_user_host")]
    pub host: String,
    #[serde(default)]
    pub signature_key: String,
    /// Outbound call timeout in seconds
    #[serde(default = "default_user_timeout")]
    pub timeout: u64,
}

impl Default for UserServiceConfig {
    fn default() -> Self {
        Self {
            host: default_user_host(),
            signature_key: String::new(),
            timeout: default_user_timeout(),
        }
    }
}

/// Object storage bucket receiving field images.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub bucket_name: String,
    /// Endpoint media uploads are sent to
    #[serde(default = "default_storage_base_url")]
    pub base_url: String,
    /// Prefix of the URLs handed back to clients
    #[serde(default = "default_storage_public_base_url")]
    pub public_base_url: String,
    #[serde(default)]
    pub access_token: String,
    #[serde(default = "default_user_timeout")]
    pub timeout: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            bucket_name: String::new(),
            base_url: default_storage_base_url(),
            public_base_url: default_storage_public_base_url(),
            access_token: String::new(),
            timeout: default_user_timeout(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8001
}

fn default_app_name() -> String {
    "field-service".to_string()
}

fn default_app_env() -> String {
    "local".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_timezone() -> String {
    "Asia/Jakarta".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_max_upload_body_bytes() -> usize {
    // Room for several full-size images plus the form fields.
    64 * 1024 * 1024
}

fn default_rate_limiter_max_request() -> u32 {
    100
}

fn default_rate_limiter_time_second() -> u64 {
    1
}

fn default_user_host() -> String {
    "http://localhost:8000".to_string()
}

fn default_user_timeout() -> u64 {
    10
}

fn default_storage_base_url() -> String {
    "https://storage.googleapis.com".to_string()
}

fn default_storage_public_base_url() -> String {
    "https://storage.googleapis.com".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            app_name: default_app_name(),
            app_env: default_app_env(),
            signature_key: String::new(),
            log_level: default_log_level(),
            timezone: default_timezone(),
            request_timeout_seconds: default_request_timeout(),
            cors_origins: None,
            max_upload_body_bytes: default_max_upload_body_bytes(),
            database: DbSettings::default(),
            rate_limiter: RateLimiterConfig::default(),
            internal_service: InternalServiceConfig::default(),
            storage: StorageConfig::default(),
        }
    }
}

impl ApiConfig {
    /// Loads configuration from the JSON file and the environment
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - A value cannot be converted to the type of its field
    /// - The configured time zone is not a known IANA name
    pub fn load() -> Result<Self> {
        dotenv::dotenv().ok();

        let path = env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        let config = Config::builder()
            .add_source(File::new(&path, FileFormat::Json).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()
            .wrap_err("Failed to read configuration sources")?
            .try_deserialize::<ApiConfig>()
            .wrap_err("Invalid configuration")?;

        config.time_zone()?;

        Ok(config)
    }

    /// Returns the server address as a string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn log_level(&self) -> Level {
        match self.log_level.to_ascii_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        }
    }

    pub fn time_zone(&self) -> Result<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|e| eyre!("Invalid timezone {}: {}", self.timezone, e))
    }

    /// Allowed origins, or `None` (any origin) when nothing usable is set.
    pub fn cors_origins(&self) -> Option<Vec<String>> {
        let origins: Vec<String> = self
            .cors_origins
            .as_deref()?
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        (!origins.is_empty()).then_some(origins)
    }
}
