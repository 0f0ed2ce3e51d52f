use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::user_dto::{CreateDriverRequest, DriverListResponse, DriverResponse};
use crate::repositories::user_repository::UserRepository;
use crate::services::alert_service;
use crate::utils::errors::{conflict, invalid_input, not_found, AppError};
use crate::utils::validation::validate_phone;

pub struct UserController {
    pool: PgPool,
    repository: UserRepository,
}

impl UserController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: UserRepository::new(pool.clone()),
            pool,
        }
    }

    /// Crear un chauffeur. Nace no aprobado; la alerta driver_pending se
    /// inserta en la misma transacción que el usuario.
    pub async fn create_driver(
        &self,
        request: CreateDriverRequest,
    ) -> Result<DriverResponse, AppError> {
        request.validate()?;
        if validate_phone(&request.phone).is_err() {
            return Err(invalid_input(
                "INVALID_INPUT",
                "phone: numéro de téléphone invalide",
            ));
        }

        if self.repository.phone_exists(&request.phone).await? {
            return Err(conflict(
                "PHONE_EXISTS",
                "Ce numéro de téléphone est déjà enregistré",
            ));
        }

        let mut tx = self.pool.begin().await?;
        let driver = self
            .repository
            .create_driver_in_tx(&mut tx, &request.phone, &request.first_name, &request.last_name)
            .await?;
        alert_service::driver_pending(&mut tx, &driver).await?;
        tx.commit().await?;

        tracing::info!(driver_id = %driver.id, "Driver created, pending approval");
        Ok(DriverResponse::from(driver))
    }

    /// Listado de chauffeurs agrupado: activos aprobados, pendientes,
    /// desactivados.
    pub async fn list_drivers(&self) -> Result<DriverListResponse, AppError> {
        let drivers = self.repository.find_all_drivers().await?;

        let mut active = Vec::new();
        let mut pending = Vec::new();
        let mut deleted = Vec::new();
        for driver in drivers {
            let response = DriverResponse::from(driver);
            if !response.is_active {
                deleted.push(response);
            } else if response.is_approved {
                active.push(response);
            } else {
                pending.push(response);
            }
        }

        Ok(DriverListResponse {
            active,
            pending,
            deleted,
        })
    }

    pub async fn approve(&self, id: Uuid) -> Result<DriverResponse, AppError> {
        let user = self
            .repository
            .set_approved(id, true)
            .await?
            .ok_or_else(|| not_found("USER_NOT_FOUND", "Chauffeur introuvable"))?;
        tracing::info!(driver_id = %id, "Driver approved");
        Ok(DriverResponse::from(user))
    }

    /// Desactivar la cuenta. Las sesiones vivas del chauffeur caducan en
    /// la siguiente resolución de token.
    pub async fn revoke(&self, id: Uuid) -> Result<DriverResponse, AppError> {
        let user = self
            .repository
            .set_active(id, false)
            .await?
            .ok_or_else(|| not_found("USER_NOT_FOUND", "Chauffeur introuvable"))?;
        tracing::info!(driver_id = %id, "Driver access revoked");
        Ok(DriverResponse::from(user))
    }

    pub async fn restore(&self, id: Uuid) -> Result<DriverResponse, AppError> {
        let user = self
            .repository
            .set_active(id, true)
            .await?
            .ok_or_else(|| not_found("USER_NOT_FOUND", "Chauffeur introuvable"))?;
        tracing::info!(driver_id = %id, "Driver access restored");
        Ok(DriverResponse::from(user))
    }
}
