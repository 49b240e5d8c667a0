use async_trait::async_trait;
use chrono::NaiveDate;
use field_service_core::{
    errors::{BookingError, BookingResult},
    models::{field_schedule::FieldScheduleStatus, pagination::PaginationParam},
};
use mockall::automock;
use tracing::{debug, warn};
use uuid::Uuid;

use super::{db_error, is_unique_violation, order_clause};
use crate::{
    DbPool,
    models::{DbFieldSchedule, DbFieldScheduleDetail, NewFieldSchedule},
};

/// Columns a schedule listing may be sorted by.
pub const FIELD_SCHEDULE_SORT_COLUMNS: &[&str] = &["date", "status", "created_at", "updated_at"];

const DETAIL_SELECT: &str = r#"
    SELECT fs.id, fs.uuid, fs.field_id, fs.time_id, fs.date, fs.status,
           fs.created_at, fs.updated_at,
           f.uuid AS field_uuid, f.name AS field_name, f.price_per_hour,
           t.uuid AS time_uuid, t.start_time, t.end_time
    FROM field_schedules fs
    JOIN fields f ON f.id = fs.field_id
    JOIN times t ON t.id = fs.time_id
    WHERE fs.deleted_at IS NULL
"#;

#[automock]
#[async_trait]
pub trait FieldScheduleRepository: Send + Sync {
    async fn find_all_with_pagination(
        &self,
        param: &PaginationParam,
    ) -> BookingResult<(Vec<DbFieldScheduleDetail>, i64)>;

    async fn find_all_by_field_and_date(
        &self,
        field_uuid: Uuid,
        date: NaiveDate,
    ) -> BookingResult<Vec<DbFieldScheduleDetail>>;

    async fn find_by_uuid(&self, uuid: Uuid) -> BookingResult<DbFieldScheduleDetail>;

    /// The live schedule occupying a slot, if any.
    async fn find_by_date_and_time_id(
        &self,
        date: NaiveDate,
        time_id: i32,
        field_id: i32,
    ) -> BookingResult<Option<DbFieldSchedule>>;

    /// Inserts every row or none of them.
    async fn create(&self, schedules: Vec<NewFieldSchedule>) -> BookingResult<()>;

    async fn update(
        &self,
        uuid: Uuid,
        date: NaiveDate,
        time_id: i32,
    ) -> BookingResult<DbFieldScheduleDetail>;

    async fn update_status(&self, uuid: Uuid, status: FieldScheduleStatus) -> BookingResult<()>;

    async fn delete(&self, uuid: Uuid) -> BookingResult<()>;
}

#[derive(Debug, Clone)]
pub struct PgFieldScheduleRepository {
    pool: DbPool,
}

impl PgFieldScheduleRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn write_error(err: sqlx::Error) -> BookingError {
    if is_unique_violation(&err) {
        warn!("Field schedule slot already taken: {}", err);
        return BookingError::FieldScheduleAlreadyExists;
    }
    db_error(err)
}

#[async_trait]
impl FieldScheduleRepository for PgFieldScheduleRepository {
    async fn find_all_with_pagination(
        &self,
        param: &PaginationParam,
    ) -> BookingResult<(Vec<DbFieldScheduleDetail>, i64)> {
        let order = order_clause(
            FIELD_SCHEDULE_SORT_COLUMNS,
            "fs.",
            param.sort_column.as_deref(),
            param.sort_order.as_deref(),
        );
        debug!(
            "Listing field schedules: page={}, limit={}, order={}",
            param.page, param.limit, order
        );

        let sql = format!("{} ORDER BY {} LIMIT $1 OFFSET $2", DETAIL_SELECT, order);
        let schedules = sqlx::query_as::<_, DbFieldScheduleDetail>(&sql)
            .bind(param.limit)
            .bind(param.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)?;

        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM field_schedules WHERE deleted_at IS NULL",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(db_error)?;

        Ok((schedules, total))
    }

    async fn find_all_by_field_and_date(
        &self,
        field_uuid: Uuid,
        date: NaiveDate,
    ) -> BookingResult<Vec<DbFieldScheduleDetail>> {
        debug!("Listing schedules for field {} on {}", field_uuid, date);

        let sql = format!(
            "{} AND f.uuid = $1 AND fs.date = $2 ORDER BY t.start_time ASC",
            DETAIL_SELECT
        );
        sqlx::query_as::<_, DbFieldScheduleDetail>(&sql)
            .bind(field_uuid)
            .bind(date)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)
    }

    async fn find_by_uuid(&self, uuid: Uuid) -> BookingResult<DbFieldScheduleDetail> {
        debug!("Getting field schedule by uuid: {}", uuid);

        let sql = format!("{} AND fs.uuid = $1", DETAIL_SELECT);
        sqlx::query_as::<_, DbFieldScheduleDetail>(&sql)
            .bind(uuid)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)?
            .ok_or(BookingError::FieldScheduleNotFound)
    }

    async fn find_by_date_and_time_id(
        &self,
        date: NaiveDate,
        time_id: i32,
        field_id: i32,
    ) -> BookingResult<Option<DbFieldSchedule>> {
        sqlx::query_as::<_, DbFieldSchedule>(
            r#"
            SELECT id, uuid, field_id, time_id, date, status, created_at, updated_at, deleted_at
            FROM field_schedules
            WHERE date = $1 AND time_id = $2 AND field_id = $3 AND deleted_at IS NULL
            "#,
        )
        .bind(date)
        .bind(time_id)
        .bind(field_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)
    }

    async fn create(&self, schedules: Vec<NewFieldSchedule>) -> BookingResult<()> {
        debug!("Creating {} field schedules", schedules.len());

        let mut tx = self.pool.begin().await.map_err(db_error)?;
        for schedule in schedules {
            sqlx::query(
                r#"
                INSERT INTO field_schedules (uuid, field_id, time_id, date, status, created_at, updated_at)
                VALUES ($1, $2, $3, $4, $5, NOW(), NOW())
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(schedule.field_id)
            .bind(schedule.time_id)
            .bind(schedule.date)
            .bind(schedule.status)
            .execute(&mut *tx)
            .await
            .map_err(write_error)?;
        }
        tx.commit().await.map_err(db_error)?;

        Ok(())
    }

    async fn update(
        &self,
        uuid: Uuid,
        date: NaiveDate,
        time_id: i32,
    ) -> BookingResult<DbFieldScheduleDetail> {
        debug!(
            "Updating field schedule: uuid={}, date={}, time_id={}",
            uuid, date, time_id
        );

        let result = sqlx::query(
            r#"
            UPDATE field_schedules
            SET date = $2, time_id = $3, updated_at = NOW()
            WHERE uuid = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(uuid)
        .bind(date)
        .bind(time_id)
        .execute(&self.pool)
        .await
        .map_err(write_error)?;

        if result.rows_affected() == 0 {
            return Err(BookingError::FieldScheduleNotFound);
        }

        self.find_by_uuid(uuid).await
    }

    async fn update_status(&self, uuid: Uuid, status: FieldScheduleStatus) -> BookingResult<()> {
        debug!(
            "Updating field schedule status: uuid={}, status={}",
            uuid,
            status.as_str()
        );

        let result = sqlx::query(
            r#"
            UPDATE field_schedules
            SET status = $2, updated_at = NOW()
            WHERE uuid = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(uuid)
        .bind(status.as_i16())
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        if result.rows_affected() == 0 {
            return Err(BookingError::FieldScheduleNotFound);
        }

        Ok(())
    }

    async fn delete(&self, uuid: Uuid) -> BookingResult<()> {
        debug!("Soft deleting field schedule: uuid={}", uuid);

        let result = sqlx::query(
            r#"
            UPDATE field_schedules
            SET deleted_at = NOW()
            WHERE uuid = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(uuid)
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        if result.rows_affected() == 0 {
            return Err(BookingError::FieldScheduleNotFound);
        }

        Ok(())
    }
}
