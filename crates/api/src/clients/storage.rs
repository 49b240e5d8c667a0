use std::time::Duration;

use async_trait::async_trait;
use eyre::eyre;
use field_service_core::errors::{BookingError, BookingResult};
use mockall::automock;
use tracing::{debug, error};

use crate::config::StorageConfig;

/// Somewhere uploaded images can be put and served from.
#[automock]
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Stores `data` under `object_name` and returns its public URL.
    async fn upload_file(
        &self,
        object_name: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> BookingResult<String>;
}

/// Google Cloud Storage, using the JSON API media upload.
#[derive(Debug, Clone)]
pub struct GcsStorage {
    client: reqwest::Client,
    base_url: String,
    public_base_url: String,
    bucket_name: String,
    access_token: String,
}

impl GcsStorage {
    pub fn new(config: &StorageConfig) -> eyre::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            public_base_url: config.public_base_url.trim_end_matches('/').to_string(),
            bucket_name: config.bucket_name.clone(),
            access_token: config.access_token.clone(),
        })
    }

    pub fn public_url(&self, object_name: &str) -> String {
        format!("{}/{}/{}", self.public_base_url, self.bucket_name, object_name)
    }
}

#[async_trait]
impl ObjectStorage for GcsStorage {
    async fn upload_file(
        &self,
        object_name: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> BookingResult<String> {
        let url = format!(
            "{}/upload/storage/v1/b/{}/o",
            self.base_url, self.bucket_name
        );
        debug!("Uploading {} ({} bytes)", object_name, data.len());

        let response = self
            .client
            .post(&url)
            .query(&[("uploadType", "media"), ("name", object_name)])
            .bearer_auth(&self.access_token)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(data)
            .send()
            .await
            .map_err(|e| {
                error!("Upload of {} failed: {}", object_name, e);
                BookingError::Upload(eyre!(e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Upload of {} rejected with {}: {}", object_name, status, body);
            return Err(BookingError::Upload(eyre!(
                "storage responded with {}",
                status
            )));
        }

        Ok(self.public_url(object_name))
    }
}
