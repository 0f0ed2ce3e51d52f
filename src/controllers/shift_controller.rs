use sqlx::PgPool;
use uuid::Uuid;

use crate::models::inspection::INSPECTION_RETURN;
use crate::models::session::Session;
use crate::models::shift::Shift;
use crate::repositories::battery_record_repository::BatteryRecordRepository;
use crate::repositories::inspection_repository::InspectionRepository;
use crate::repositories::shift_repository::ShiftRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::{conflict, forbidden, not_found, AppError};

pub struct ShiftController {
    repository: ShiftRepository,
    vehicles: VehicleRepository,
    inspections: InspectionRepository,
    battery_records: BatteryRecordRepository,
}

impl ShiftController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: ShiftRepository::new(pool.clone()),
            vehicles: VehicleRepository::new(pool.clone()),
            inspections: InspectionRepository::new(pool.clone()),
            battery_records: BatteryRecordRepository::new(pool),
        }
    }

    /// Abrir un shift para el chauffeur. El vehículo es opcional pero si
    /// viene debe existir. La atomicidad frente a starts concurrentes la
    /// garantiza el repositorio (transacción + índice único parcial).
    pub async fn start(
        &self,
        driver_id: Uuid,
        vehicle_id: Option<Uuid>,
    ) -> Result<Shift, AppError> {
        if let Some(vehicle_id) = vehicle_id {
            self.vehicles
                .find_by_id(vehicle_id)
                .await?
                .ok_or_else(|| not_found("VEHICLE_NOT_FOUND", "Véhicule introuvable"))?;
        }

        let shift = self.repository.create_active(driver_id, vehicle_id).await?;
        tracing::info!(shift_id = %shift.id, %driver_id, "Shift started");
        Ok(shift)
    }

    /// Cerrar un shift. Cadena de guards en orden fijo: existencia,
    /// propiedad, estado, conformité (inspection retour + relevé batteries).
    pub async fn end(&self, shift_id: Uuid, requester_id: Uuid) -> Result<Shift, AppError> {
        let shift = self
            .repository
            .find_by_id(shift_id)
            .await?
            .ok_or_else(|| not_found("SHIFT_NOT_FOUND", "Shift introuvable"))?;

        let has_return_inspection = self
            .inspections
            .exists_for_shift(shift_id, INSPECTION_RETURN)
            .await?;
        let has_return_battery_record = self
            .battery_records
            .exists_for_shift(shift_id, INSPECTION_RETURN)
            .await?;

        ensure_can_end(
            &shift,
            requester_id,
            has_return_inspection,
            has_return_battery_record,
        )?;

        let completed = self.repository.complete(shift_id).await?;
        tracing::info!(%shift_id, %requester_id, "Shift completed");
        Ok(completed)
    }

    pub async fn get_active(&self, driver_id: Uuid) -> Result<Option<Shift>, AppError> {
        self.repository.find_active_by_driver(driver_id).await
    }

    /// Historial: los chauffeurs ven sus propios shifts, los chefs
    /// d'équipe y admins ven todos.
    pub async fn history(&self, session: &Session) -> Result<Vec<Shift>, AppError> {
        if session.role.is_team_leader_or_admin() {
            self.repository.find_all().await
        } else {
            self.repository.find_by_driver(session.user_id).await
        }
    }
}

/// Guards de cierre, separados del acceso a datos.
///
/// Orden fijo: propiedad, estado, inspection retour, relevé batteries.
/// Un fallo anterior en la cadena enmascara a los siguientes.
fn ensure_can_end(
    shift: &Shift,
    requester_id: Uuid,
    has_return_inspection: bool,
    has_return_battery_record: bool,
) -> Result<(), AppError> {
    if shift.driver_id != requester_id {
        return Err(forbidden(
            "FORBIDDEN",
            "Ce shift appartient à un autre chauffeur",
        ));
    }

    if !shift.is_active() {
        return Err(conflict("SHIFT_NOT_ACTIVE", "Ce shift n'est plus actif"));
    }

    if !has_return_inspection {
        return Err(conflict(
            "INCOMPLETE_COMPLIANCE",
            "L'inspection de retour est requise avant de terminer le shift",
        ));
    }

    if !has_return_battery_record {
        return Err(conflict(
            "INCOMPLETE_COMPLIANCE",
            "Le relevé de batteries de retour est requis avant de terminer le shift",
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::shift::{SHIFT_ACTIVE, SHIFT_COMPLETED};
    use chrono::Utc;

    fn shift_for(driver_id: Uuid, status: &str) -> Shift {
        Shift {
            id: Uuid::new_v4(),
            driver_id,
            vehicle_id: None,
            start_time: Utc::now(),
            end_time: None,
            status: status.to_string(),
            created_at: Utc::now(),
        }
    }

    fn error_code(err: AppError) -> &'static str {
        match err {
            AppError::Forbidden { code, .. } => code,
            AppError::Conflict { code, .. } => code,
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_end_allowed_when_compliant() {
        let driver = Uuid::new_v4();
        let shift = shift_for(driver, SHIFT_ACTIVE);
        assert!(ensure_can_end(&shift, driver, true, true).is_ok());
    }

    #[test]
    fn test_end_rejects_other_driver() {
        let shift = shift_for(Uuid::new_v4(), SHIFT_ACTIVE);
        let err = ensure_can_end(&shift, Uuid::new_v4(), true, true).unwrap_err();
        assert_eq!(error_code(err), "FORBIDDEN");
    }

    #[test]
    fn test_end_rejects_completed_shift() {
        let driver = Uuid::new_v4();
        let shift = shift_for(driver, SHIFT_COMPLETED);
        let err = ensure_can_end(&shift, driver, true, true).unwrap_err();
        assert_eq!(error_code(err), "SHIFT_NOT_ACTIVE");
    }

    #[test]
    fn test_end_requires_return_inspection() {
        let driver = Uuid::new_v4();
        let shift = shift_for(driver, SHIFT_ACTIVE);
        let err = ensure_can_end(&shift, driver, false, true).unwrap_err();
        assert_eq!(error_code(err), "INCOMPLETE_COMPLIANCE");
    }

    #[test]
    fn test_end_requires_return_battery_record() {
        let driver = Uuid::new_v4();
        let shift = shift_for(driver, SHIFT_ACTIVE);
        let err = ensure_can_end(&shift, driver, true, false).unwrap_err();
        assert_eq!(error_code(err), "INCOMPLETE_COMPLIANCE");
    }

    #[test]
    fn test_ownership_checked_before_compliance() {
        let shift = shift_for(Uuid::new_v4(), SHIFT_COMPLETED);
        let err = ensure_can_end(&shift, Uuid::new_v4(), false, false).unwrap_err();
        assert_eq!(error_code(err), "FORBIDDEN");
    }
}
