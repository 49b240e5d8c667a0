pub mod field;
pub mod field_schedule;
pub mod pagination;
pub mod time;
pub mod user;
