use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Filtros del rapport d'inspections échouées
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FailedInspectionFilters {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub driver_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FailedItemReport {
    pub item_name: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

// Envoltura del export JSON: mismas filas más metadatos de exportación
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FailedInspectionExport {
    pub data: Vec<FailedInspectionReport>,
    pub exported_at: DateTime<Utc>,
    pub total_records: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FailedInspectionReport {
    pub inspection_id: Uuid,
    pub shift_id: Uuid,
    pub inspection_type: String,
    pub completed_at: DateTime<Utc>,
    pub driver_id: Uuid,
    pub driver_name: String,
    pub failed_items: Vec<FailedItemReport>,
}
