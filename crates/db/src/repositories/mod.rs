pub mod field;
pub mod field_schedule;
pub mod time;

use std::sync::Arc;

use field_service_core::errors::BookingError;
use tracing::error;

use crate::DbPool;

pub use field::{FieldRepository, MockFieldRepository, PgFieldRepository};
pub use field_schedule::{
    FieldScheduleRepository, MockFieldScheduleRepository, PgFieldScheduleRepository,
};
pub use time::{MockTimeRepository, PgTimeRepository, TimeRepository};

/// Handles to every repository, shared by the service layer.
#[derive(Clone)]
pub struct RepositoryRegistry {
    pub field: Arc<dyn FieldRepository>,
    pub time: Arc<dyn TimeRepository>,
    pub field_schedule: Arc<dyn FieldScheduleRepository>,
}

impl RepositoryRegistry {
    pub fn new(pool: DbPool) -> Self {
        Self {
            field: Arc::new(PgFieldRepository::new(pool.clone())),
            time: Arc::new(PgTimeRepository::new(pool.clone())),
            field_schedule: Arc::new(PgFieldScheduleRepository::new(pool)),
        }
    }

    pub fn from_parts(
        field: Arc<dyn FieldRepository>,
        time: Arc<dyn TimeRepository>,
        field_schedule: Arc<dyn FieldScheduleRepository>,
    ) -> Self {
        Self {
            field,
            time,
            field_schedule,
        }
    }
}

const DEFAULT_SORT_COLUMN: &str = "created_at";

/// Builds an `ORDER BY` expression from caller input.
///
/// Only columns in `allowed` are ever interpolated into SQL; anything else
/// falls back to `created_at`. The order defaults to descending.
pub(crate) fn order_clause(
    allowed: &[&str],
    prefix: &str,
    column: Option<&str>,
    order: Option<&str>,
) -> String {
    let column = column
        .filter(|column| allowed.contains(column))
        .unwrap_or(DEFAULT_SORT_COLUMN);
    let order = match order.map(str::to_ascii_lowercase).as_deref() {
        Some("asc") => "ASC",
        _ => "DESC",
    };

    format!("{}{} {}", prefix, column, order)
}

/// Logs a driver failure and wraps it for the caller.
pub(crate) fn db_error(err: sqlx::Error) -> BookingError {
    error!("Database error: {}", err);
    BookingError::database(err)
}

pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db) => db.code().as_deref() == Some("23505"),
        _ => false,
    }
}
