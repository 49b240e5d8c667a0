use std::sync::Arc;

use chrono::Utc;
use field_service_core::{
    errors::{BookingError, BookingResult},
    models::{
        field::{FieldRequest, FieldResponse, MAX_IMAGE_SIZE, UpdateFieldRequest, UploadedImage},
        pagination::{PaginationParam, PaginationResult},
    },
};
use field_service_db::{
    models::{DbField, FieldChanges, NewField},
    repositories::FieldRepository,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::clients::ObjectStorage;

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

#[derive(Clone)]
pub struct FieldService {
    fields: Arc<dyn FieldRepository>,
    storage: Arc<dyn ObjectStorage>,
}

impl FieldService {
    pub fn new(fields: Arc<dyn FieldRepository>, storage: Arc<dyn ObjectStorage>) -> Self {
        Self { fields, storage }
    }

    pub async fn get_all_with_pagination(
        &self,
        param: &PaginationParam,
    ) -> BookingResult<PaginationResult<FieldResponse>> {
        let (fields, total) = self.fields.find_all_with_pagination(param).await?;
        let data = fields.into_iter().map(to_response).collect();

        Ok(PaginationResult::new(total, param.page, param.limit, data))
    }

    pub async fn get_all_without_pagination(&self) -> BookingResult<Vec<FieldResponse>> {
        let fields = self.fields.find_all_without_pagination().await?;
        Ok(fields.into_iter().map(to_response).collect())
    }

    pub async fn get_by_uuid(&self, uuid: Uuid) -> BookingResult<FieldResponse> {
        self.fields.find_by_uuid(uuid).await.map(to_response)
    }

    pub async fn create(&self, request: FieldRequest) -> BookingResult<FieldResponse> {
        validate_images(&request.images)?;
        let images = self.upload_images(request.images).await?;

        let field = self
            .fields
            .create(NewField {
                code: request.code,
                name: request.name,
                price_per_hour: request.price_per_hour,
                images,
            })
            .await?;
        info!("Field created: uuid={}", field.uuid);

        Ok(to_response(field))
    }

    pub async fn update(
        &self,
        uuid: Uuid,
        request: UpdateFieldRequest,
    ) -> BookingResult<FieldResponse> {
        let existing = self.fields.find_by_uuid(uuid).await?;

        let images = match request.images {
            Some(images) => {
                validate_images(&images)?;
                self.upload_images(images).await?
            }
            None => existing.images,
        };

        let field = self
            .fields
            .update(
                uuid,
                FieldChanges {
                    code: request.code,
                    name: request.name,
                    price_per_hour: request.price_per_hour,
                    images,
                },
            )
            .await?;
        info!("Field updated: uuid={}", field.uuid);

        Ok(to_response(field))
    }

    pub async fn delete(&self, uuid: Uuid) -> BookingResult<()> {
        self.fields.find_by_uuid(uuid).await?;
        self.fields.delete(uuid).await?;
        info!("Field deleted: uuid={}", uuid);

        Ok(())
    }

    /// Uploads images in order. Files stored before a failure are left in
    /// the bucket.
    async fn upload_images(&self, images: Vec<UploadedImage>) -> BookingResult<Vec<String>> {
        let mut urls = Vec::with_capacity(images.len());
        for image in images {
            let object_name = object_name(&image.file_name);
            let content_type = image
                .content_type
                .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string());
            let url = self
                .storage
                .upload_file(&object_name, image.data, &content_type)
                .await?;
            urls.push(url);
        }

        Ok(urls)
    }
}

/// Rejects the whole set before anything is uploaded.
pub fn validate_images(images: &[UploadedImage]) -> BookingResult<()> {
    if images.is_empty() {
        warn!("Field request without images");
        return Err(BookingError::InvalidUploadFile);
    }

    if let Some(image) = images.iter().find(|image| image.size() > MAX_IMAGE_SIZE) {
        warn!(
            "Image {} is {} bytes, over the {} byte limit",
            image.file_name,
            image.size(),
            MAX_IMAGE_SIZE
        );
        return Err(BookingError::ImageSizeTooBig);
    }

    Ok(())
}

fn object_name(file_name: &str) -> String {
    format!("images/{}-{}", Utc::now().format("%Y%m%d%H%M%S"), file_name)
}

fn to_response(field: DbField) -> FieldResponse {
    FieldResponse {
        uuid: field.uuid,
        code: field.code,
        name: field.name,
        price_per_hour: field.price_per_hour,
        images: field.images,
        created_at: field.created_at,
        updated_at: field.updated_at,
    }
}
