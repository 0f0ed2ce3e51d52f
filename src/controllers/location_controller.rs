use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::location_dto::{FleetLocationResponse, LocationUpdateRequest};
use crate::models::location::LocationUpdate;
use crate::repositories::location_repository::LocationRepository;
use crate::repositories::shift_repository::ShiftRepository;
use crate::repositories::user_repository::UserRepository;
use crate::utils::errors::{conflict, forbidden, invalid_input, not_found, AppError};
use crate::utils::validation::validate_datetime;

pub struct LocationController {
    repository: LocationRepository,
    shifts: ShiftRepository,
    users: UserRepository,
}

impl LocationController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: LocationRepository::new(pool.clone()),
            shifts: ShiftRepository::new(pool.clone()),
            users: UserRepository::new(pool),
        }
    }

    /// Registrar un punto GPS ya muestreado por el cliente, para el shift
    /// activo del chauffeur.
    pub async fn record(
        &self,
        driver_id: Uuid,
        request: LocationUpdateRequest,
    ) -> Result<LocationUpdate, AppError> {
        let recorded_at = validate_datetime(&request.timestamp)
            .map_err(|_| invalid_input("INVALID_INPUT", "timestamp: date RFC3339 attendue"))?;

        let shift = self
            .shifts
            .find_by_id(request.shift_id)
            .await?
            .ok_or_else(|| not_found("SHIFT_NOT_FOUND", "Shift introuvable"))?;

        if shift.driver_id != driver_id {
            return Err(forbidden(
                "FORBIDDEN",
                "Ce shift appartient à un autre chauffeur",
            ));
        }

        if !shift.is_active() {
            return Err(conflict("SHIFT_NOT_ACTIVE", "Ce shift n'est plus actif"));
        }

        self.repository
            .create(
                request.shift_id,
                driver_id,
                request.latitude,
                request.longitude,
                request.accuracy,
                recorded_at,
            )
            .await
    }

    /// Vista de flotte: última posición conocida de cada shift activo
    pub async fn fleet(&self) -> Result<Vec<FleetLocationResponse>, AppError> {
        let active_shifts = self.shifts.find_all_active().await?;

        let mut positions = Vec::with_capacity(active_shifts.len());
        for shift in active_shifts {
            let Some(point) = self.repository.latest_for_shift(shift.id).await? else {
                continue;
            };
            let Some(driver) = self.users.find_by_id(shift.driver_id).await? else {
                continue;
            };
            positions.push(FleetLocationResponse {
                driver_id: driver.id,
                first_name: driver.first_name,
                last_name: driver.last_name,
                latitude: point.latitude,
                longitude: point.longitude,
                timestamp: point.recorded_at,
                shift_id: shift.id,
            });
        }

        Ok(positions)
    }

    /// Última posición conocida de un chauffeur concreto
    pub async fn latest_for_driver(
        &self,
        driver_id: Uuid,
    ) -> Result<FleetLocationResponse, AppError> {
        let driver = self
            .users
            .find_by_id(driver_id)
            .await?
            .ok_or_else(|| not_found("USER_NOT_FOUND", "Chauffeur introuvable"))?;

        let point = self
            .repository
            .latest_for_driver(driver_id)
            .await?
            .ok_or_else(|| {
                not_found("LOCATION_NOT_FOUND", "Aucune position connue pour ce chauffeur")
            })?;

        Ok(FleetLocationResponse {
            driver_id: driver.id,
            first_name: driver.first_name,
            last_name: driver.last_name,
            latitude: point.latitude,
            longitude: point.longitude,
            timestamp: point.recorded_at,
            shift_id: point.shift_id,
        })
    }
}
