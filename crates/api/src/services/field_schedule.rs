use std::sync::Arc;

use chrono::{Days, NaiveDate, Utc};
use chrono_tz::Tz;
use field_service_core::{
    errors::{BookingError, BookingResult},
    models::{
        field_schedule::{
            DATE_FORMAT, FieldScheduleForBookingResponse, FieldScheduleRequest,
            FieldScheduleResponse, FieldScheduleStatus, GenerateFieldScheduleForOneMonthRequest,
            UpdateFieldScheduleRequest, UpdateStatusFieldScheduleRequest, format_booking_date,
        },
        pagination::{PaginationParam, PaginationResult},
        time::format_time_range,
    },
};
use field_service_db::{
    models::{DbField, DbFieldScheduleDetail, NewFieldSchedule},
    repositories::{FieldRepository, FieldScheduleRepository, TimeRepository},
};
use tracing::{error, info, warn};
use uuid::Uuid;

/// Days covered by a one-month generation, starting tomorrow.
pub const ONE_MONTH_DAYS: u64 = 30;

#[derive(Clone)]
pub struct FieldScheduleService {
    fields: Arc<dyn FieldRepository>,
    times: Arc<dyn TimeRepository>,
    schedules: Arc<dyn FieldScheduleRepository>,
    time_zone: Tz,
}

impl FieldScheduleService {
    pub fn new(
        fields: Arc<dyn FieldRepository>,
        times: Arc<dyn TimeRepository>,
        schedules: Arc<dyn FieldScheduleRepository>,
        time_zone: Tz,
    ) -> Self {
        Self {
            fields,
            times,
            schedules,
            time_zone,
        }
    }

    pub async fn get_all_with_pagination(
        &self,
        param: &PaginationParam,
    ) -> BookingResult<PaginationResult<FieldScheduleResponse>> {
        let (schedules, total) = self.schedules.find_all_with_pagination(param).await?;
        let data = schedules.into_iter().map(to_response).collect();

        Ok(PaginationResult::new(total, param.page, param.limit, data))
    }

    pub async fn get_all_by_field_and_date(
        &self,
        field_uuid: Uuid,
        date: NaiveDate,
    ) -> BookingResult<Vec<FieldScheduleForBookingResponse>> {
        let field = self.fields.find_by_uuid(field_uuid).await?;
        let schedules = self
            .schedules
            .find_all_by_field_and_date(field.uuid, date)
            .await?;

        Ok(schedules.into_iter().map(to_booking_response).collect())
    }

    pub async fn get_by_uuid(&self, uuid: Uuid) -> BookingResult<FieldScheduleResponse> {
        self.schedules.find_by_uuid(uuid).await.map(to_response)
    }

    pub async fn create(&self, request: FieldScheduleRequest) -> BookingResult<()> {
        let field = self.fields.find_by_uuid(request.field_id).await?;

        let mut rows = Vec::with_capacity(request.time_ids.len());
        for time_uuid in &request.time_ids {
            let time = self.times.find_by_uuid(*time_uuid).await?;
            self.ensure_slot_free(&field, time.id, request.date).await?;
            rows.push(available(&field, time.id, request.date));
        }

        self.schedules.create(rows).await?;
        info!(
            "Created {} schedules for field {} on {}",
            request.time_ids.len(),
            field.uuid,
            request.date
        );

        Ok(())
    }

    pub async fn generate_for_one_month(
        &self,
        request: GenerateFieldScheduleForOneMonthRequest,
    ) -> BookingResult<()> {
        let field = self.fields.find_by_uuid(request.field_id).await?;
        let times = self.times.find_all().await?;
        let today = Utc::now().with_timezone(&self.time_zone).date_naive();

        let dates = one_month_dates(today);
        let mut rows = Vec::with_capacity(dates.len() * times.len());
        for date in dates {
            for time in &times {
                self.ensure_slot_free(&field, time.id, date).await?;
                rows.push(available(&field, time.id, date));
            }
        }

        let count = rows.len();
        self.schedules.create(rows).await?;
        info!(
            "Generated {} schedules for field {} starting after {}",
            count, field.uuid, today
        );

        Ok(())
    }

    pub async fn update(
        &self,
        uuid: Uuid,
        request: UpdateFieldScheduleRequest,
    ) -> BookingResult<FieldScheduleResponse> {
        let schedule = self.schedules.find_by_uuid(uuid).await?;
        let time = self.times.find_by_uuid(request.time_id).await?;

        let occupant = self
            .schedules
            .find_by_date_and_time_id(request.date, time.id, schedule.field_id)
            .await?;
        if let Some(occupant) = occupant {
            if occupant.uuid != uuid {
                warn!(
                    "Schedule {} cannot move onto {} held by {}",
                    uuid, request.date, occupant.uuid
                );
                return Err(BookingError::FieldScheduleAlreadyExists);
            }
        }

        let updated = self.schedules.update(uuid, request.date, time.id).await?;
        Ok(to_response(updated))
    }

    /// Books each schedule in turn. Earlier bookings stay in place when a
    /// later id fails.
    pub async fn update_status(&self, request: UpdateStatusFieldScheduleRequest) -> BookingResult<()> {
        for uuid in request.field_schedule_ids {
            if let Err(err) = self.schedules.find_by_uuid(uuid).await {
                error!("Field schedule {} could not be loaded: {}", uuid, err);
                return Err(match err {
                    BookingError::FieldScheduleNotFound => {
                        BookingError::FieldScheduleIdNotFound(uuid)
                    }
                    other => other,
                });
            }
            self.schedules
                .update_status(uuid, FieldScheduleStatus::Booked)
                .await?;
        }

        Ok(())
    }

    pub async fn delete(&self, uuid: Uuid) -> BookingResult<()> {
        self.schedules.find_by_uuid(uuid).await?;
        self.schedules.delete(uuid).await?;
        info!("Field schedule deleted: uuid={}", uuid);

        Ok(())
    }

    async fn ensure_slot_free(&self, field: &DbField, time_id: i32, date: NaiveDate) -> BookingResult<()> {
        let existing = self
            .schedules
            .find_by_date_and_time_id(date, time_id, field.id)
            .await?;
        if existing.is_some() {
            warn!(
                "Schedule already exists for field {} time {} on {}",
                field.uuid, time_id, date
            );
            return Err(BookingError::FieldScheduleAlreadyExists);
        }

        Ok(())
    }
}

/// Tomorrow through the thirtieth day after `today`.
pub fn one_month_dates(today: NaiveDate) -> Vec<NaiveDate> {
    (1..=ONE_MONTH_DAYS)
        .filter_map(|offset| today.checked_add_days(Days::new(offset)))
        .collect()
}

fn available(field: &DbField, time_id: i32, date: NaiveDate) -> NewFieldSchedule {
    NewFieldSchedule {
        field_id: field.id,
        time_id,
        date,
        status: FieldScheduleStatus::Available.as_i16(),
    }
}

fn status_label(status: i16) -> String {
    match FieldScheduleStatus::try_from(status) {
        Ok(status) => status.as_str().to_string(),
        Err(_) => status.to_string(),
    }
}

fn to_response(schedule: DbFieldScheduleDetail) -> FieldScheduleResponse {
    FieldScheduleResponse {
        uuid: schedule.uuid,
        field_name: schedule.field_name,
        price_per_hour: schedule.price_per_hour,
        date: schedule.date.format(DATE_FORMAT).to_string(),
        status: status_label(schedule.status),
        time: format_time_range(schedule.start_time, schedule.end_time),
        created_at: schedule.created_at,
        updated_at: schedule.updated_at,
    }
}

fn to_booking_response(schedule: DbFieldScheduleDetail) -> FieldScheduleForBookingResponse {
    FieldScheduleForBookingResponse {
        uuid: schedule.uuid,
        price_per_hour: schedule.price_per_hour,
        date: format_booking_date(schedule.date),
        status: status_label(schedule.status),
        time: format_time_range(schedule.start_time, schedule.end_time),
    }
}
