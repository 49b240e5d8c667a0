//! Outbound clients for the services this API depends on.

pub mod storage;
pub mod user;

use std::sync::Arc;

pub use storage::{GcsStorage, MockObjectStorage, ObjectStorage};
pub use user::{HttpUserClient, MockUserClient, UserClient};

#[derive(Clone)]
pub struct ClientRegistry {
    pub user: Arc<dyn UserClient>,
}

impl ClientRegistry {
    pub fn new(user: Arc<dyn UserClient>) -> Self {
        Self { user }
    }
}
