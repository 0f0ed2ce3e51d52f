use serde::Deserialize;
use uuid::Uuid;

// Request de création de comptage batteries
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBatteryRecordRequest {
    pub shift_id: Uuid,
    #[serde(rename = "type")]
    pub record_type: String,
    pub count: i64,
    pub photo_url: Option<String>,
    pub comment: Option<String>,
    pub driver_signature: Option<String>,
}

// Contrefirma del chef d'équipe; sobrescribe la anterior si existe
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignBatteryRecordRequest {
    pub team_leader_signature: String,
}
