use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Wire format for calendar dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Availability of a schedule slot. Persisted as its integer discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i16)]
pub enum FieldScheduleStatus {
    Available = 100,
    Booked = 200,
}

impl FieldScheduleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldScheduleStatus::Available => "Available",
            FieldScheduleStatus::Booked => "Booked",
        }
    }

    pub fn as_i16(self) -> i16 {
        self as i16
    }
}

impl TryFrom<i16> for FieldScheduleStatus {
    type Error = String;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            100 => Ok(FieldScheduleStatus::Available),
            200 => Ok(FieldScheduleStatus::Booked),
            other => Err(format!("unknown field schedule status {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct FieldScheduleRequest {
    #[serde(rename = "fieldID")]
    pub field_id: Uuid,
    pub date: NaiveDate,
    #[serde(rename = "timeIDs")]
    #[validate(length(min = 1, message = "timeIDs must contain at least one time"))]
    pub time_ids: Vec<Uuid>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct GenerateFieldScheduleForOneMonthRequest {
    #[serde(rename = "fieldID")]
    pub field_id: Uuid,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct UpdateFieldScheduleRequest {
    pub date: NaiveDate,
    #[serde(rename = "timeID")]
    pub time_id: Uuid,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct UpdateStatusFieldScheduleRequest {
    #[serde(rename = "fieldScheduleIDs")]
    #[validate(length(min = 1, message = "fieldScheduleIDs must contain at least one id"))]
    pub field_schedule_ids: Vec<Uuid>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct FieldScheduleByDateParam {
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldScheduleResponse {
    pub uuid: Uuid,
    pub field_name: String,
    pub price_per_hour: i32,
    pub date: String,
    pub status: String,
    pub time: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Compact shape used by the booking calendar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldScheduleForBookingResponse {
    pub uuid: Uuid,
    pub price_per_hour: i32,
    pub date: String,
    pub status: String,
    pub time: String,
}

const MONTHS_ID: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "Mei", "Jun", "Jul", "Agu", "Sep", "Okt", "Nov", "Des",
];

/// Formats a date as `DD Mon` with Indonesian month abbreviations, e.g.
/// `17 Agu`.
pub fn format_booking_date(date: NaiveDate) -> String {
    let month = MONTHS_ID
        .get(date.month0() as usize)
        .copied()
        .unwrap_or_default();
    format!("{:02} {}", date.day(), month)
}
