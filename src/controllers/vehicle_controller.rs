use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::common_dto::ApiResponse;
use crate::dto::vehicle_dto::{
    CreateVehicleRequest, UpdateVehicleRequest, VehicleResponse, VehicleSafetyResponse,
};
use crate::models::vehicle::is_valid_vehicle_status;
use crate::repositories::inspection_repository::InspectionRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::services::vehicle_safety_service;
use crate::utils::errors::{conflict, invalid_input, not_found, AppError};

pub struct VehicleController {
    repository: VehicleRepository,
    inspections: InspectionRepository,
}

impl VehicleController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: VehicleRepository::new(pool.clone()),
            inspections: InspectionRepository::new(pool),
        }
    }

    /// Crear un vehículo. El qr_code se genera aquí, una sola vez, y no
    /// vuelve a cambiar.
    pub async fn create(
        &self,
        request: CreateVehicleRequest,
    ) -> Result<ApiResponse<VehicleResponse>, AppError> {
        request.validate()?;

        if self
            .repository
            .license_plate_exists(&request.license_plate)
            .await?
        {
            return Err(conflict(
                "LICENSE_PLATE_EXISTS",
                "Cette plaque d'immatriculation est déjà enregistrée",
            ));
        }

        let qr_code = format!("vehicle:{}", Uuid::new_v4());
        let vehicle = self
            .repository
            .create(&request.name, &request.license_plate, &qr_code)
            .await?;

        tracing::info!(vehicle_id = %vehicle.id, "Vehicle created");
        Ok(ApiResponse::success_with_message(
            VehicleResponse::from(vehicle),
            "Véhicule créé avec succès".to_string(),
        ))
    }

    pub async fn list(&self) -> Result<Vec<VehicleResponse>, AppError> {
        let vehicles = self.repository.find_all().await?;
        Ok(vehicles.into_iter().map(VehicleResponse::from).collect())
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<VehicleResponse, AppError> {
        let vehicle = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found("VEHICLE_NOT_FOUND", "Véhicule introuvable"))?;
        Ok(VehicleResponse::from(vehicle))
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateVehicleRequest,
    ) -> Result<ApiResponse<VehicleResponse>, AppError> {
        if let Some(status) = request.status.as_deref() {
            if !is_valid_vehicle_status(status) {
                return Err(invalid_input(
                    "INVALID_INPUT",
                    format!("Statut de véhicule inconnu: {status}"),
                ));
            }
        }

        if let Some(plate) = request.license_plate.as_deref() {
            let current = self
                .repository
                .find_by_id(id)
                .await?
                .ok_or_else(|| not_found("VEHICLE_NOT_FOUND", "Véhicule introuvable"))?;
            if plate != current.license_plate && self.repository.license_plate_exists(plate).await?
            {
                return Err(conflict(
                    "LICENSE_PLATE_EXISTS",
                    "Cette plaque d'immatriculation est déjà enregistrée",
                ));
            }
        }

        let vehicle = self
            .repository
            .update(id, request.name, request.license_plate, request.status)
            .await?
            .ok_or_else(|| not_found("VEHICLE_NOT_FOUND", "Véhicule introuvable"))?;

        tracing::info!(vehicle_id = %id, "Vehicle updated");
        Ok(ApiResponse::success_with_message(
            VehicleResponse::from(vehicle),
            "Véhicule mis à jour".to_string(),
        ))
    }

    /// Lookup por QR: vehículo + última inspección + estado de sécurité
    pub async fn resolve_by_qr(&self, qr_code: &str) -> Result<VehicleSafetyResponse, AppError> {
        let vehicle = self
            .repository
            .find_by_qr_code(qr_code)
            .await?
            .ok_or_else(|| not_found("VEHICLE_NOT_FOUND", "Véhicule introuvable"))?;

        let latest = self.inspections.latest_for_vehicle(vehicle.id).await?;
        let safety_status = vehicle_safety_service::safety_status(latest.as_ref());

        Ok(VehicleSafetyResponse {
            vehicle: VehicleResponse::from(vehicle),
            latest_inspection: latest,
            safety_status,
        })
    }
}
