use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::inspection_dto::CreateInspectionRequest;
use crate::models::inspection::Inspection;
use crate::repositories::inspection_repository::InspectionRepository;
use crate::repositories::shift_repository::ShiftRepository;
use crate::services::{alert_service, compliance_service};
use crate::utils::errors::{conflict, forbidden, not_found, AppError};

pub struct InspectionController {
    pool: PgPool,
    repository: InspectionRepository,
    shifts: ShiftRepository,
}

impl InspectionController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: InspectionRepository::new(pool.clone()),
            shifts: ShiftRepository::new(pool.clone()),
            pool,
        }
    }

    /// Crear una inspección para el shift del chauffeur.
    ///
    /// La inspección y su eventual alerta inspection_failed se escriben
    /// en la misma transacción. Una inspección por shift + tipo, inmutable.
    pub async fn create(
        &self,
        driver_id: Uuid,
        request: CreateInspectionRequest,
    ) -> Result<Inspection, AppError> {
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

        compliance_service::validate_inspection(&request)?;

        if self
            .repository
            .exists_for_shift(request.shift_id, &request.inspection_type)
            .await?
        {
            return Err(conflict(
                "INSPECTION_EXISTS",
                "Une inspection de ce type existe déjà pour ce shift",
            ));
        }

        let mut tx = self.pool.begin().await?;
        let inspection = self.repository.insert_in_tx(&mut tx, &request).await?;
        if inspection.has_missing_items() {
            alert_service::inspection_failed(&mut tx, &inspection).await?;
        }
        tx.commit().await?;

        tracing::info!(
            inspection_id = %inspection.id,
            shift_id = %inspection.shift_id,
            inspection_type = inspection.inspection_type.as_str(),
            "Inspection recorded"
        );
        Ok(inspection)
    }

    /// Inspecciones de un shift. Un chauffeur solo ve las de sus propios
    /// shifts; chefs d'équipe y admins todas.
    pub async fn list_by_shift(
        &self,
        shift_id: Uuid,
        requester_id: Uuid,
        can_view_all: bool,
    ) -> Result<Vec<Inspection>, AppError> {
        let shift = self
            .shifts
            .find_by_id(shift_id)
            .await?
            .ok_or_else(|| not_found("SHIFT_NOT_FOUND", "Shift introuvable"))?;

        if !can_view_all && shift.driver_id != requester_id {
            return Err(forbidden(
                "FORBIDDEN",
                "Ce shift appartient à un autre chauffeur",
            ));
        }

        self.repository.find_by_shift(shift_id).await
    }
}
