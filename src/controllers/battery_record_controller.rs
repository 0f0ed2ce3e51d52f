use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::battery_record_dto::{CreateBatteryRecordRequest, SignBatteryRecordRequest};
use crate::dto::common_dto::ApiResponse;
use crate::models::battery_record::BatteryRecord;
use crate::repositories::battery_record_repository::BatteryRecordRepository;
use crate::repositories::shift_repository::ShiftRepository;
use crate::services::compliance_service;
use crate::utils::errors::{conflict, forbidden, invalid_input, not_found, AppError};

pub struct BatteryRecordController {
    repository: BatteryRecordRepository,
    shifts: ShiftRepository,
}

impl BatteryRecordController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: BatteryRecordRepository::new(pool.clone()),
            shifts: ShiftRepository::new(pool),
        }
    }

    /// Crear un relevé de batteries para el shift del chauffeur.
    /// Un relevé por shift + tipo.
    pub async fn create(
        &self,
        driver_id: Uuid,
        request: CreateBatteryRecordRequest,
    ) -> Result<BatteryRecord, AppError> {
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

        compliance_service::validate_battery_record(&request)?;

        if self
            .repository
            .exists_for_shift(request.shift_id, &request.record_type)
            .await?
        {
            return Err(conflict(
                "BATTERY_RECORD_EXISTS",
                "Un relevé de ce type existe déjà pour ce shift",
            ));
        }

        let count = i32::try_from(request.count).map_err(|_| {
            invalid_input("INVALID_INPUT", "count: valeur hors limites")
        })?;

        // El validador garantiza la presencia de estos campos
        let record = self
            .repository
            .create(
                request.shift_id,
                &request.record_type,
                count,
                request.photo_url.as_deref().unwrap_or_default(),
                request.comment.as_deref().unwrap_or_default(),
                request.driver_signature.as_deref().unwrap_or_default(),
            )
            .await?;

        tracing::info!(
            record_id = %record.id,
            shift_id = %record.shift_id,
            record_type = record.record_type.as_str(),
            "Battery record created"
        );
        Ok(record)
    }

    pub async fn list_by_shift(
        &self,
        shift_id: Uuid,
        requester_id: Uuid,
        can_view_all: bool,
    ) -> Result<Vec<BatteryRecord>, AppError> {
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

    /// Contrefirma del chef d'équipe.
    pub async fn sign(
        &self,
        id: Uuid,
        request: SignBatteryRecordRequest,
    ) -> Result<ApiResponse<BatteryRecord>, AppError> {
        let existing = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found("RECORD_NOT_FOUND", "Relevé introuvable"))?;

        ensure_can_countersign(&existing, &request.team_leader_signature)?;

        let record = self
            .repository
            .sign(id, &request.team_leader_signature)
            .await?
            .ok_or_else(|| not_found("RECORD_NOT_FOUND", "Relevé introuvable"))?;

        tracing::info!(record_id = %id, "Battery record countersigned");
        Ok(ApiResponse::success(record))
    }
}

/// Guard de la contrefirma. Una contrefirma existente no bloquea: la
/// firma del chef es consultiva y se sobrescribe.
fn ensure_can_countersign(
    _record: &BatteryRecord,
    signature: &str,
) -> Result<(), AppError> {
    if signature.trim().is_empty() {
        return Err(invalid_input(
            "INVALID_INPUT",
            "teamLeaderSignature: signature requise",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::battery_record::BatteryRecord;
    use chrono::Utc;

    fn record(team_leader_signature: Option<String>) -> BatteryRecord {
        BatteryRecord {
            id: Uuid::new_v4(),
            shift_id: Uuid::new_v4(),
            record_type: "departure".to_string(),
            count: 8,
            photo_url: "https://storage.example.com/photo.jpg".to_string(),
            comment: String::new(),
            driver_signature: "data:image/png;base64,abc".to_string(),
            team_leader_signature,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_countersign_unsigned_record() {
        let record = record(None);
        assert!(ensure_can_countersign(&record, "data:image/png;base64,chef").is_ok());
    }

    #[test]
    fn test_countersign_overwrites_previous_signature() {
        let record = record(Some("data:image/png;base64,ancienne".to_string()));
        assert!(ensure_can_countersign(&record, "data:image/png;base64,nouvelle").is_ok());
    }

    #[test]
    fn test_countersign_rejects_blank_signature() {
        let record = record(None);
        let err = ensure_can_countersign(&record, "   ").unwrap_err();
        match err {
            AppError::InvalidInput { code, .. } => assert_eq!(code, "INVALID_INPUT"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
