//! Generador de alertas
//!
//! Deriva alertas de transiciones de estado concretas y las escribe
//! dentro de la MISMA transacción que la mutación que las dispara: una
//! alerta nunca se emite para una mutación anulada ni se pierde para una
//! confirmada. Determinista, sin reintentos.
//!
//! Los tipos battery_mismatch y safety_item_missing existen en el enum
//! pero no tienen regla de disparo; ver DESIGN.md.

use serde_json::json;
use sqlx::{Postgres, Transaction};

use crate::models::alert::{Alert, AlertType};
use crate::models::inspection::Inspection;
use crate::models::maintenance::MaintenanceLog;
use crate::models::user::User;
use crate::repositories::alert_repository;
use crate::utils::errors::AppResult;

/// Nouveau chauffeur creado → alerta de aprobación pendiente
pub async fn driver_pending(
    tx: &mut Transaction<'_, Postgres>,
    driver: &User,
) -> AppResult<Alert> {
    let phone = driver.phone.as_deref().unwrap_or_default();
    alert_repository::insert_in_tx(
        tx,
        AlertType::DriverPending,
        "Nouveau chauffeur en attente d'approbation".to_string(),
        format!("{} ({}) nécessite une approbation.", driver.full_name(), phone),
        json!({
            "driverId": driver.id,
            "phone": phone,
            "firstName": driver.first_name,
            "lastName": driver.last_name,
        }),
    )
    .await
}

/// Inspección con al menos un équipement absent → alerta de inspección fallida.
///
/// El llamador solo debe invocar esto cuando `inspection.has_missing_items()`.
pub async fn inspection_failed(
    tx: &mut Transaction<'_, Postgres>,
    inspection: &Inspection,
) -> AppResult<Alert> {
    let missing = inspection.absent_items();
    alert_repository::insert_in_tx(
        tx,
        AlertType::InspectionFailed,
        "Inspection avec équipement manquant".to_string(),
        format!(
            "Inspection {} : équipements absents : {}",
            inspection.inspection_type,
            missing.join(", ")
        ),
        json!({
            "shiftId": inspection.shift_id,
            "inspectionId": inspection.id,
            "inspectionType": inspection.inspection_type,
            "missingItems": missing,
        }),
    )
    .await
}

/// Maintenance passée à "done" → alerta de reparación completada
pub async fn repair_completed(
    tx: &mut Transaction<'_, Postgres>,
    log: &MaintenanceLog,
) -> AppResult<Alert> {
    alert_repository::insert_in_tx(
        tx,
        AlertType::RepairCompleted,
        "Réparation terminée".to_string(),
        format!("La réparation « {} » est terminée.", log.description),
        json!({
            "vehicleId": log.vehicle_id,
            "maintenanceId": log.id,
        }),
    )
    .await
}
