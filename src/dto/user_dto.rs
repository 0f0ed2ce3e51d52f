use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::user::User;

// Request para crear un chauffeur (rol siempre driver, jamais approuvé d'office)
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateDriverRequest {
    #[validate(length(min = 6, max = 20))]
    pub phone: String,

    #[validate(length(min = 1, max = 100))]
    pub first_name: String,

    #[validate(length(min = 1, max = 100))]
    pub last_name: String,
}

// Response de usuario para la API (sin password_hash)
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverResponse {
    pub id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub is_approved: bool,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<User> for DriverResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            phone: user.phone,
            first_name: user.first_name,
            last_name: user.last_name,
            role: user.role,
            is_approved: user.is_approved,
            is_active: user.is_active,
            created_at: user.created_at,
        }
    }
}

// Listado de chauffeurs agrupado por estado de cuenta
#[derive(Debug, Serialize)]
pub struct DriverListResponse {
    pub active: Vec<DriverResponse>,
    pub pending: Vec<DriverResponse>,
    pub deleted: Vec<DriverResponse>,
}
