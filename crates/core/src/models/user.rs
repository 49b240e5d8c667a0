use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Roles issued by the user service that routes may be restricted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Customer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Customer => "customer",
        }
    }
}

/// The authenticated user as reported by the user service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    pub uuid: Uuid,
    pub name: String,
    pub username: String,
    pub email: String,
    pub role: String,
    #[serde(default)]
    pub phone_number: Option<String>,
}

impl UserData {
    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        roles.iter().any(|role| role.as_str() == self.role)
    }
}
