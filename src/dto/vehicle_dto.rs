use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::inspection::Inspection;
use crate::models::vehicle::Vehicle;

// Request para crear un vehículo. El qr_code no se acepta del cliente:
// se genera en el servidor una sola vez.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateVehicleRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(length(min = 1, max = 20))]
    pub license_plate: String,
}

// Request para actualizar un vehículo (qr_code inmutable)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVehicleRequest {
    pub name: Option<String>,
    pub license_plate: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleResponse {
    pub id: Uuid,
    pub name: String,
    pub license_plate: String,
    pub qr_code: String,
    pub status: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<Vehicle> for VehicleResponse {
    fn from(v: Vehicle) -> Self {
        Self {
            id: v.id,
            name: v.name,
            license_plate: v.license_plate,
            qr_code: v.qr_code,
            status: v.status,
            created_at: v.created_at,
        }
    }
}

// Response del lookup por QR: vehículo + última inspección + estado de sécurité
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleSafetyResponse {
    pub vehicle: VehicleResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_inspection: Option<Inspection>,
    pub safety_status: &'static str,
}
