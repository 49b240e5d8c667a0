use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Largest accepted image, in bytes.
pub const MAX_IMAGE_SIZE: usize = 5 * 1024 * 1024;

/// An image received in a multipart form, not yet uploaded.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedImage {
    pub file_name: String,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

impl UploadedImage {
    pub fn size(&self) -> usize {
        self.data.len()
    }
}

/// Text parts of the field multipart form, validated before the images are
/// looked at.
#[derive(Debug, Clone, Default, Validate)]
pub struct FieldForm {
    #[validate(required(message = "code is required"), length(min = 1, message = "code is required"))]
    pub code: Option<String>,
    #[validate(required(message = "name is required"), length(min = 1, message = "name is required"))]
    pub name: Option<String>,
    #[validate(
        required(message = "pricePerHour is required"),
        range(min = 0, message = "pricePerHour must not be negative")
    )]
    pub price_per_hour: Option<i32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldRequest {
    pub code: String,
    pub name: String,
    pub price_per_hour: i32,
    pub images: Vec<UploadedImage>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateFieldRequest {
    pub code: String,
    pub name: String,
    pub price_per_hour: i32,
    /// `None` keeps the images already stored on the field.
    pub images: Option<Vec<UploadedImage>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldResponse {
    pub uuid: Uuid,
    pub code: String,
    pub name: String,
    pub price_per_hour: i32,
    pub images: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
