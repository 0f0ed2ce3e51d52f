use serde::Deserialize;
use uuid::Uuid;

// Request para abrir un shift; el vehículo es opcional
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartShiftRequest {
    pub vehicle_id: Option<Uuid>,
}
