//! Modelo de MaintenanceLog
//!
//! El paso a `done` dispara la alerta repair_completed, dentro de la
//! misma transacción que la actualización de estado.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

pub const MAINTENANCE_PENDING: &str = "pending";
pub const MAINTENANCE_IN_PROGRESS: &str = "in_progress";
pub const MAINTENANCE_DONE: &str = "done";

pub fn is_valid_maintenance_status(status: &str) -> bool {
    matches!(
        status,
        MAINTENANCE_PENDING | MAINTENANCE_IN_PROGRESS | MAINTENANCE_DONE
    )
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MaintenanceLog {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub description: String,
    pub status: String,
    pub performed_by: Uuid,
    pub performed_at: DateTime<Utc>,
    pub cost: Option<f64>,
    pub notes: Option<String>,
}
