use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use eyre::eyre;
use field_service_core::{
    errors::{BookingError, BookingResult},
    models::user::UserData,
};
use mockall::automock;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, error};

use crate::config::ApiConfig;
use crate::middleware::auth::{
    X_API_KEY, X_REQUEST_AT, X_SERVICE_NAME, generate_api_key,
};

/// Resolves bearer tokens to users through the user service.
#[automock]
#[async_trait]
pub trait UserClient: Send + Sync {
    async fn get_user_by_token(&self, token: &str) -> BookingResult<UserData>;
}

#[derive(Debug, Deserialize)]
struct UserResponse {
    #[serde(default)]
    message: String,
    data: Option<UserData>,
}

#[derive(Debug, Clone)]
pub struct HttpUserClient {
    client: reqwest::Client,
    base_url: String,
    app_name: String,
    signature_key: String,
}

impl HttpUserClient {
    pub fn new(config: &ApiConfig) -> eyre::Result<Self> {
        let user = &config.internal_service.user;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(user.timeout))
            .build()?;

        Ok(Self {
            client,
            base_url: user.host.trim_end_matches('/').to_string(),
            app_name: config.app_name.clone(),
            signature_key: user.signature_key.clone(),
        })
    }
}

#[async_trait]
impl UserClient for HttpUserClient {
    async fn get_user_by_token(&self, token: &str) -> BookingResult<UserData> {
        let request_at = Utc::now().timestamp().to_string();
        let api_key = generate_api_key(&self.app_name, &self.signature_key, &request_at);
        let url = format!("{}/api/v1/auth/user", self.base_url);

        debug!("Fetching user from {}", url);

        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .header(X_API_KEY, api_key)
            .header(X_SERVICE_NAME, &self.app_name)
            .header(X_REQUEST_AT, request_at)
            .send()
            .await
            .map_err(|e| {
                error!("User service request failed: {}", e);
                BookingError::Upstream(eyre!(e))
            })?;

        let status = response.status();
        let body: UserResponse = response.json().await.map_err(|e| {
            error!("User service returned an unreadable body: {}", e);
            BookingError::Upstream(eyre!(e))
        })?;

        if status != StatusCode::OK {
            return Err(BookingError::Upstream(eyre!(
                "user response: {} ({})",
                body.message,
                status
            )));
        }

        body.data
            .ok_or_else(|| BookingError::Upstream(eyre!("user response without data")))
    }
}
