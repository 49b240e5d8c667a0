//! # Field Service Core
//!
//! Domain types shared by the persistence and HTTP layers of the field
//! booking service: request and response shapes, schedule statuses, user
//! roles, pagination and the typed error taxonomy.

pub mod errors;
pub mod models;
