//! Validador de conformité
//!
//! Motor de reglas sin estado sobre los payloads de inspección y de
//! comptage batteries. Regla por équipement: présent ⇒ référence photo
//! obligatoire, absent ⇒ commentaire obligatoire. Se devuelve el primer
//! item que falla, nombrado en el error (política total y determinista).

use crate::dto::battery_record_dto::CreateBatteryRecordRequest;
use crate::dto::inspection_dto::CreateInspectionRequest;
use crate::models::inspection::{INSPECTION_DEPARTURE, INSPECTION_RETURN};
use crate::utils::errors::{invalid_input, AppResult};
use crate::utils::validation::has_reference;

/// Validar un payload de inspección completo.
///
/// El video solo es obligatorio en las inspecciones de départ; las de
/// retour no lo exigen.
pub fn validate_inspection(request: &CreateInspectionRequest) -> AppResult<()> {
    if request.inspection_type != INSPECTION_DEPARTURE
        && request.inspection_type != INSPECTION_RETURN
    {
        return Err(invalid_input(
            "INVALID_INPUT",
            format!("Type d'inspection inconnu: {}", request.inspection_type),
        ));
    }

    for item in request.items() {
        if item.present && !has_reference(item.photo) {
            return Err(invalid_input(
                "INVALID_INPUT",
                format!("{}: photo requise lorsque l'équipement est présent", item.name),
            ));
        }
        if !item.present && !has_reference(item.comment) {
            return Err(invalid_input(
                "INVALID_INPUT",
                format!("{}: commentaire requis lorsque l'équipement est absent", item.name),
            ));
        }
    }

    if request.inspection_type == INSPECTION_DEPARTURE && !has_reference(&request.video_url) {
        return Err(invalid_input(
            "INVALID_INPUT",
            "L'inspection de départ requiert une vidéo",
        ));
    }

    Ok(())
}

/// Validar un payload de comptage batteries.
///
/// Los cuatro campos comptage / photo / commentaire / firma chauffeur son
/// obligatorios en la creación. La contrefirma del chef d'équipe llega
/// después por la operación de firma.
pub fn validate_battery_record(request: &CreateBatteryRecordRequest) -> AppResult<()> {
    if request.record_type != INSPECTION_DEPARTURE && request.record_type != INSPECTION_RETURN {
        return Err(invalid_input(
            "INVALID_INPUT",
            format!("Type de relevé inconnu: {}", request.record_type),
        ));
    }

    if request.count < 0 {
        return Err(invalid_input(
            "INVALID_INPUT",
            "count: le comptage doit être un entier positif ou nul",
        ));
    }

    if !has_reference(&request.photo_url) {
        return Err(invalid_input("INVALID_INPUT", "photoUrl: photo requise"));
    }

    if request
        .comment
        .as_deref()
        .map_or(true, |c| c.trim().is_empty())
    {
        return Err(invalid_input("INVALID_INPUT", "comment: commentaire requis"));
    }

    if !has_reference(&request.driver_signature) {
        return Err(invalid_input(
            "INVALID_INPUT",
            "driverSignature: signature du chauffeur requise",
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn base_inspection(inspection_type: &str) -> CreateInspectionRequest {
        CreateInspectionRequest {
            shift_id: Uuid::new_v4(),
            inspection_type: inspection_type.to_string(),
            video_url: Some("https://storage/video.mp4".to_string()),
            trousse_secours: true,
            trousse_secours_photo: Some("https://storage/trousse.jpg".to_string()),
            trousse_secours_comment: None,
            roue_secours: true,
            roue_secours_photo: Some("https://storage/roue.jpg".to_string()),
            roue_secours_comment: None,
            extincteur: true,
            extincteur_photo: Some("https://storage/extincteur.jpg".to_string()),
            extincteur_comment: None,
            booster_batterie: true,
            booster_batterie_photo: Some("https://storage/booster.jpg".to_string()),
            booster_batterie_comment: None,
        }
    }

    fn base_battery_record() -> CreateBatteryRecordRequest {
        CreateBatteryRecordRequest {
            shift_id: Uuid::new_v4(),
            record_type: "departure".to_string(),
            count: 12,
            photo_url: Some("https://storage/batteries.jpg".to_string()),
            comment: Some("12 batteries chargées".to_string()),
            driver_signature: Some("https://storage/signature.png".to_string()),
        }
    }

    #[test]
    fn test_all_items_present_with_photos_is_valid() {
        assert!(validate_inspection(&base_inspection("departure")).is_ok());
    }

    #[test]
    fn test_absent_item_without_comment_names_the_item() {
        let mut request = base_inspection("departure");
        request.roue_secours = false;
        request.roue_secours_photo = None;
        request.roue_secours_comment = None;

        let err = validate_inspection(&request).unwrap_err();
        assert!(err.to_string().contains("roueSecours"));
    }

    #[test]
    fn test_absent_item_with_comment_is_valid() {
        let mut request = base_inspection("return");
        request.extincteur = false;
        request.extincteur_photo = None;
        request.extincteur_comment = Some("Extincteur manquant, signalé".to_string());
        assert!(validate_inspection(&request).is_ok());
    }

    #[test]
    fn test_present_item_without_photo_is_invalid() {
        let mut request = base_inspection("departure");
        request.trousse_secours_photo = Some("   ".to_string());
        let err = validate_inspection(&request).unwrap_err();
        assert!(err.to_string().contains("trousseSecours"));
    }

    #[test]
    fn test_departure_requires_video() {
        let mut request = base_inspection("departure");
        request.video_url = None;
        assert!(validate_inspection(&request).is_err());
    }

    #[test]
    fn test_return_does_not_require_video() {
        let mut request = base_inspection("return");
        request.video_url = None;
        assert!(validate_inspection(&request).is_ok());
    }

    #[test]
    fn test_unknown_inspection_type_rejected() {
        let request = base_inspection("midday");
        assert!(validate_inspection(&request).is_err());
    }

    #[test]
    fn test_battery_record_complete_is_valid() {
        assert!(validate_battery_record(&base_battery_record()).is_ok());
    }

    #[test]
    fn test_battery_record_negative_count_rejected() {
        let mut request = base_battery_record();
        request.count = -1;
        assert!(validate_battery_record(&request).is_err());
    }

    #[test]
    fn test_battery_record_zero_count_is_valid() {
        let mut request = base_battery_record();
        request.count = 0;
        assert!(validate_battery_record(&request).is_ok());
    }

    #[test]
    fn test_battery_record_missing_driver_signature_rejected() {
        let mut request = base_battery_record();
        request.driver_signature = None;
        let err = validate_battery_record(&request).unwrap_err();
        assert!(err.to_string().contains("driverSignature"));
    }

    #[test]
    fn test_battery_record_missing_comment_rejected() {
        let mut request = base_battery_record();
        request.comment = Some("".to_string());
        assert!(validate_battery_record(&request).is_err());
    }
}
