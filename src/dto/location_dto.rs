use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Punto GPS ya muestreado por el cliente
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationUpdateRequest {
    pub shift_id: Uuid,
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy: Option<f64>,
    /// RFC3339, instante del muestreo en el dispositivo
    pub timestamp: String,
}

// Última posición conocida de un chauffeur en shift activo
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetLocationResponse {
    pub driver_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub timestamp: DateTime<Utc>,
    pub shift_id: Uuid,
}
