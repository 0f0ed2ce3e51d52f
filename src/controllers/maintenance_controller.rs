use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::maintenance_dto::{CreateMaintenanceRequest, UpdateMaintenanceStatusRequest};
use crate::models::maintenance::{is_valid_maintenance_status, MaintenanceLog, MAINTENANCE_DONE};
use crate::repositories::maintenance_repository::MaintenanceRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::services::alert_service;
use crate::utils::errors::{invalid_input, not_found, AppError};

pub struct MaintenanceController {
    pool: PgPool,
    repository: MaintenanceRepository,
    vehicles: VehicleRepository,
}

impl MaintenanceController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: MaintenanceRepository::new(pool.clone()),
            vehicles: VehicleRepository::new(pool.clone()),
            pool,
        }
    }

    pub async fn create(
        &self,
        performed_by: Uuid,
        request: CreateMaintenanceRequest,
    ) -> Result<MaintenanceLog, AppError> {
        request.validate()?;

        self.vehicles
            .find_by_id(request.vehicle_id)
            .await?
            .ok_or_else(|| not_found("VEHICLE_NOT_FOUND", "Véhicule introuvable"))?;

        let log = self
            .repository
            .create(
                request.vehicle_id,
                &request.description,
                performed_by,
                request.cost,
                request.notes,
            )
            .await?;

        tracing::info!(maintenance_id = %log.id, vehicle_id = %log.vehicle_id, "Maintenance log created");
        Ok(log)
    }

    /// Transición de estado. El paso a "done" dispara la alerta
    /// repair_completed en la misma transacción, y solo en la primera
    /// transición (un log ya "done" no vuelve a alertar).
    pub async fn update_status(
        &self,
        id: Uuid,
        request: UpdateMaintenanceStatusRequest,
    ) -> Result<MaintenanceLog, AppError> {
        if !is_valid_maintenance_status(&request.status) {
            return Err(invalid_input(
                "INVALID_INPUT",
                format!("Statut de maintenance inconnu: {}", request.status),
            ));
        }

        let current = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found("MAINTENANCE_NOT_FOUND", "Intervention introuvable"))?;

        let mut tx = self.pool.begin().await?;
        let updated = self
            .repository
            .update_status_in_tx(&mut tx, id, &request.status)
            .await?;
        if updated.status == MAINTENANCE_DONE && current.status != MAINTENANCE_DONE {
            alert_service::repair_completed(&mut tx, &updated).await?;
        }
        tx.commit().await?;

        tracing::info!(maintenance_id = %id, status = updated.status.as_str(), "Maintenance status updated");
        Ok(updated)
    }

    pub async fn list_by_vehicle(&self, vehicle_id: Uuid) -> Result<Vec<MaintenanceLog>, AppError> {
        self.vehicles
            .find_by_id(vehicle_id)
            .await?
            .ok_or_else(|| not_found("VEHICLE_NOT_FOUND", "Véhicule introuvable"))?;

        self.repository.find_by_vehicle(vehicle_id).await
    }

    pub async fn list_recent(&self) -> Result<Vec<MaintenanceLog>, AppError> {
        self.repository.find_recent().await
    }
}
