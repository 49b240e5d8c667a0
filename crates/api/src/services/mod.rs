//! Business rules, one service per resource.

pub mod field;
pub mod field_schedule;
pub mod time;

use std::sync::Arc;

use chrono_tz::Tz;
use field_service_db::repositories::RepositoryRegistry;

pub use field::FieldService;
pub use field_schedule::FieldScheduleService;
pub use time::TimeService;

use crate::clients::ObjectStorage;

#[derive(Clone)]
pub struct ServiceRegistry {
    pub field: FieldService,
    pub field_schedule: FieldScheduleService,
    pub time: TimeService,
}

impl ServiceRegistry {
    pub fn new(
        repositories: &RepositoryRegistry,
        storage: Arc<dyn ObjectStorage>,
        time_zone: Tz,
    ) -> Self {
        Self {
            field: FieldService::new(repositories.field.clone(), storage),
            field_schedule: FieldScheduleService::new(
                repositories.field.clone(),
                repositories.time.clone(),
                repositories.field_schedule.clone(),
                time_zone,
            ),
            time: TimeService::new(repositories.time.clone()),
        }
    }
}
