//! Modelo de Alert
//!
//! Las alertas son append-only: nunca se borran, solo se marcan como
//! leídas (read_at pasa de null a timestamp una única vez).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Tipos de alerta del dominio.
///
/// `BatteryMismatch` y `SafetyItemMissing` están declarados pero ninguna
/// regla los produce todavía; falta una decisión de producto sobre sus
/// triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
    DriverPending,
    InspectionFailed,
    RepairCompleted,
    BatteryMismatch,
    SafetyItemMissing,
}

impl AlertType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertType::DriverPending => "driver_pending",
            AlertType::InspectionFailed => "inspection_failed",
            AlertType::RepairCompleted => "repair_completed",
            AlertType::BatteryMismatch => "battery_mismatch",
            AlertType::SafetyItemMissing => "safety_item_missing",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "driver_pending" => Some(AlertType::DriverPending),
            "inspection_failed" => Some(AlertType::InspectionFailed),
            "repair_completed" => Some(AlertType::RepairCompleted),
            "battery_mismatch" => Some(AlertType::BatteryMismatch),
            "safety_item_missing" => Some(AlertType::SafetyItemMissing),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Alert {
    pub id: Uuid,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub alert_type: String,
    pub title: String,
    pub message: String,
    pub payload: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub read_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alert_type_round_trip() {
        for t in [
            AlertType::DriverPending,
            AlertType::InspectionFailed,
            AlertType::RepairCompleted,
            AlertType::BatteryMismatch,
            AlertType::SafetyItemMissing,
        ] {
            assert_eq!(AlertType::from_str(t.as_str()), Some(t));
        }
        assert_eq!(AlertType::from_str("unknown"), None);
    }
}
