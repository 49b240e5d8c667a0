use std::sync::Arc;

use field_service_core::{
    errors::{BookingError, BookingResult, FieldViolation},
    models::time::{TIME_FORMAT, TimeRequest, TimeResponse},
};
use field_service_db::{
    models::{DbTime, NewTime},
    repositories::TimeRepository,
};
use tracing::info;
use uuid::Uuid;

#[derive(Clone)]
pub struct TimeService {
    times: Arc<dyn TimeRepository>,
}

impl TimeService {
    pub fn new(times: Arc<dyn TimeRepository>) -> Self {
        Self { times }
    }

    pub async fn get_all(&self) -> BookingResult<Vec<TimeResponse>> {
        let times = self.times.find_all().await?;
        Ok(times.into_iter().map(to_response).collect())
    }

    pub async fn get_by_uuid(&self, uuid: Uuid) -> BookingResult<TimeResponse> {
        self.times.find_by_uuid(uuid).await.map(to_response)
    }

    /// Slots may overlap or repeat; only an empty or inverted range is refused.
    pub async fn create(&self, request: TimeRequest) -> BookingResult<TimeResponse> {
        if request.end_time <= request.start_time {
            return Err(BookingError::Validation(vec![FieldViolation {
                field: "endTime".to_string(),
                message: "endTime must be after startTime".to_string(),
            }]));
        }

        let time = self
            .times
            .create(NewTime {
                start_time: request.start_time,
                end_time: request.end_time,
            })
            .await?;
        info!("Time created: uuid={}", time.uuid);

        Ok(to_response(time))
    }
}

fn to_response(time: DbTime) -> TimeResponse {
    TimeResponse {
        uuid: time.uuid,
        start_time: time.start_time.format(TIME_FORMAT).to_string(),
        end_time: time.end_time.format(TIME_FORMAT).to_string(),
        created_at: time.created_at,
        updated_at: time.updated_at,
    }
}
