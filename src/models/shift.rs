//! Modelo de Shift
//!
//! Máquina de estados por chauffeur: NONE → ACTIVE → COMPLETED.
//! Invariante: como máximo un shift ACTIVE por chauffeur, respaldado por
//! el índice único parcial `shifts_one_active_per_driver`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

pub const SHIFT_ACTIVE: &str = "active";
pub const SHIFT_COMPLETED: &str = "completed";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Shift {
    pub id: Uuid,
    pub driver_id: Uuid,
    pub vehicle_id: Option<Uuid>,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl Shift {
    pub fn is_active(&self) -> bool {
        self.status == SHIFT_ACTIVE
    }
}
