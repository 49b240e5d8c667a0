use async_trait::async_trait;
use field_service_core::{
    errors::{BookingError, BookingResult},
    models::pagination::PaginationParam,
};
use mockall::automock;
use tracing::debug;
use uuid::Uuid;

use super::{db_error, order_clause};
use crate::{
    DbPool,
    models::{DbField, FieldChanges, NewField},
};

/// Columns a field listing may be sorted by.
pub const FIELD_SORT_COLUMNS: &[&str] = &["code", "name", "price_per_hour", "created_at", "updated_at"];

const FIELD_COLUMNS: &str = "id, uuid, code, name, price_per_hour, images, created_at, updated_at";

#[automock]
#[async_trait]
pub trait FieldRepository: Send + Sync {
    async fn find_all_with_pagination(
        &self,
        param: &PaginationParam,
    ) -> BookingResult<(Vec<DbField>, i64)>;

    async fn find_all_without_pagination(&self) -> BookingResult<Vec<DbField>>;

    async fn find_by_uuid(&self, uuid: Uuid) -> BookingResult<DbField>;

    async fn create(&self, field: NewField) -> BookingResult<DbField>;

    async fn update(&self, uuid: Uuid, changes: FieldChanges) -> BookingResult<DbField>;

    async fn delete(&self, uuid: Uuid) -> BookingResult<()>;
}

#[derive(Debug, Clone)]
pub struct PgFieldRepository {
    pool: DbPool,
}

impl PgFieldRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FieldRepository for PgFieldRepository {
    async fn find_all_with_pagination(
        &self,
        param: &PaginationParam,
    ) -> BookingResult<(Vec<DbField>, i64)> {
        let order = order_clause(
            FIELD_SORT_COLUMNS,
            "",
            param.sort_column.as_deref(),
            param.sort_order.as_deref(),
        );
        debug!(
            "Listing fields: page={}, limit={}, order={}",
            param.page, param.limit, order
        );

        let sql = format!(
            "SELECT {} FROM fields ORDER BY {} LIMIT $1 OFFSET $2",
            FIELD_COLUMNS, order
        );
        let fields = sqlx::query_as::<_, DbField>(&sql)
            .bind(param.limit)
            .bind(param.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)?;

        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM fields")
            .fetch_one(&self.pool)
            .await
            .map_err(db_error)?;

        Ok((fields, total))
    }

    async fn find_all_without_pagination(&self) -> BookingResult<Vec<DbField>> {
        let sql = format!("SELECT {} FROM fields ORDER BY created_at DESC", FIELD_COLUMNS);
        sqlx::query_as::<_, DbField>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)
    }

    async fn find_by_uuid(&self, uuid: Uuid) -> BookingResult<DbField> {
        debug!("Getting field by uuid: {}", uuid);

        let sql = format!("SELECT {} FROM fields WHERE uuid = $1", FIELD_COLUMNS);
        sqlx::query_as::<_, DbField>(&sql)
            .bind(uuid)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)?
            .ok_or(BookingError::FieldNotFound)
    }

    async fn create(&self, field: NewField) -> BookingResult<DbField> {
        let uuid = Uuid::new_v4();
        debug!("Creating field: uuid={}, code={}", uuid, field.code);

        let sql = format!(
            r#"
            INSERT INTO fields (uuid, code, name, price_per_hour, images, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, NOW(), NOW())
            RETURNING {}
            "#,
            FIELD_COLUMNS
        );
        sqlx::query_as::<_, DbField>(&sql)
            .bind(uuid)
            .bind(field.code)
            .bind(field.name)
            .bind(field.price_per_hour)
            .bind(field.images)
            .fetch_one(&self.pool)
            .await
            .map_err(db_error)
    }

    async fn update(&self, uuid: Uuid, changes: FieldChanges) -> BookingResult<DbField> {
        debug!("Updating field: uuid={}", uuid);

        let sql = format!(
            r#"
            UPDATE fields
            SET code = $2, name = $3, price_per_hour = $4, images = $5, updated_at = NOW()
            WHERE uuid = $1
            RETURNING {}
            "#,
            FIELD_COLUMNS
        );
        sqlx::query_as::<_, DbField>(&sql)
            .bind(uuid)
            .bind(changes.code)
            .bind(changes.name)
            .bind(changes.price_per_hour)
            .bind(changes.images)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)?
            .ok_or(BookingError::FieldNotFound)
    }

    async fn delete(&self, uuid: Uuid) -> BookingResult<()> {
        debug!("Deleting field: uuid={}", uuid);

        let result = sqlx::query("DELETE FROM fields WHERE uuid = $1")
            .bind(uuid)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        if result.rows_affected() == 0 {
            return Err(BookingError::FieldNotFound);
        }

        Ok(())
    }
}
