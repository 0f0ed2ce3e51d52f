//! Modelo de Vehicle
//!
//! El qr_code se genera una sola vez en la creación y es inmutable.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vehicle {
    pub id: Uuid,
    pub name: String,
    pub license_plate: String,
    pub qr_code: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Estados posibles de un vehículo
pub const VEHICLE_STATUSES: [&str; 3] = ["available", "in_use", "maintenance"];

pub fn is_valid_vehicle_status(status: &str) -> bool {
    VEHICLE_STATUSES.contains(&status)
}
