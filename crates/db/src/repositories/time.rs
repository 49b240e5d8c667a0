use async_trait::async_trait;
use field_service_core::errors::{BookingError, BookingResult};
use mockall::automock;
use tracing::debug;
use uuid::Uuid;

use super::db_error;
use crate::{
    DbPool,
    models::{DbTime, NewTime},
};

const TIME_COLUMNS: &str = "id, uuid, start_time, end_time, created_at, updated_at";

#[automock]
#[async_trait]
pub trait TimeRepository: Send + Sync {
    async fn find_all(&self) -> BookingResult<Vec<DbTime>>;

    async fn find_by_uuid(&self, uuid: Uuid) -> BookingResult<DbTime>;

    async fn find_by_id(&self, id: i32) -> BookingResult<DbTime>;

    async fn create(&self, time: NewTime) -> BookingResult<DbTime>;
}

#[derive(Debug, Clone)]
pub struct PgTimeRepository {
    pool: DbPool,
}

impl PgTimeRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TimeRepository for PgTimeRepository {
    async fn find_all(&self) -> BookingResult<Vec<DbTime>> {
        let sql = format!("SELECT {} FROM times ORDER BY start_time ASC", TIME_COLUMNS);
        sqlx::query_as::<_, DbTime>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)
    }

    async fn find_by_uuid(&self, uuid: Uuid) -> BookingResult<DbTime> {
        debug!("Getting time by uuid: {}", uuid);

        let sql = format!("SELECT {} FROM times WHERE uuid = $1", TIME_COLUMNS);
        sqlx::query_as::<_, DbTime>(&sql)
            .bind(uuid)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)?
            .ok_or(BookingError::TimeNotFound)
    }

    async fn find_by_id(&self, id: i32) -> BookingResult<DbTime> {
        let sql = format!("SELECT {} FROM times WHERE id = $1", TIME_COLUMNS);
        sqlx::query_as::<_, DbTime>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)?
            .ok_or(BookingError::TimeNotFound)
    }

    async fn create(&self, time: NewTime) -> BookingResult<DbTime> {
        let uuid = Uuid::new_v4();
        debug!(
            "Creating time: uuid={}, start={}, end={}",
            uuid, time.start_time, time.end_time
        );

        let sql = format!(
            r#"
            INSERT INTO times (uuid, start_time, end_time, created_at, updated_at)
            VALUES ($1, $2, $3, NOW(), NOW())
            RETURNING {}
            "#,
            TIME_COLUMNS
        );
        sqlx::query_as::<_, DbTime>(&sql)
            .bind(uuid)
            .bind(time.start_time)
            .bind(time.end_time)
            .fetch_one(&self.pool)
            .await
            .map_err(db_error)
    }
}
