use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateMaintenanceRequest {
    pub vehicle_id: Uuid,

    #[validate(length(min = 1, max = 500))]
    pub description: String,

    pub cost: Option<f64>,
    pub notes: Option<String>,
}

// Transición de estado; el paso a "done" dispara repair_completed
#[derive(Debug, Deserialize)]
pub struct UpdateMaintenanceStatusRequest {
    pub status: String,
}
