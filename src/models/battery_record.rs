//! Modelo de BatteryRecord
//!
//! Comptage de batteries con evidencia (photo + commentaire + firma del
//! chauffeur). La contrefirma del chef d'équipe llega después y puede
//! sobrescribirse: es consultiva, no un verrou.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BatteryRecord {
    pub id: Uuid,
    pub shift_id: Uuid,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub record_type: String,
    pub count: i32,
    pub photo_url: String,
    pub comment: String,
    pub driver_signature: String,
    pub team_leader_signature: Option<String>,
    pub created_at: DateTime<Utc>,
}
