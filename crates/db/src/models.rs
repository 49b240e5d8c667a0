use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct DbField {
    pub id: i32,
    pub uuid: Uuid,
    pub code: String,
    pub name: String,
    pub price_per_hour: i32,
    pub images: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct DbTime {
    pub id: i32,
    pub uuid: Uuid,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct DbFieldSchedule {
    pub id: i32,
    pub uuid: Uuid,
    pub field_id: i32,
    pub time_id: i32,
    pub date: NaiveDate,
    pub status: i16,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// A schedule row joined with its field and time slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct DbFieldScheduleDetail {
    pub id: i32,
    pub uuid: Uuid,
    pub field_id: i32,
    pub time_id: i32,
    pub date: NaiveDate,
    pub status: i16,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub field_uuid: Uuid,
    pub field_name: String,
    pub price_per_hour: i32,
    pub time_uuid: Uuid,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewField {
    pub code: String,
    pub name: String,
    pub price_per_hour: i32,
    pub images: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldChanges {
    pub code: String,
    pub name: String,
    pub price_per_hour: i32,
    pub images: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewTime {
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewFieldSchedule {
    pub field_id: i32,
    pub time_id: i32,
    pub date: NaiveDate,
    pub status: i16,
}
