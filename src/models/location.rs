//! Modelo de LocationUpdate
//!
//! El core no muestrea GPS: solo almacena puntos ya muestreados que el
//! cliente asocia a un shift activo.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LocationUpdate {
    pub id: Uuid,
    pub shift_id: Uuid,
    pub driver_id: Uuid,
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy: Option<f64>,
    pub recorded_at: DateTime<Utc>,
}
