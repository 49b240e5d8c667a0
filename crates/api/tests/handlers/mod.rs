mod field_schedule_test;
mod field_test;
mod middleware_test;
mod time_test;
