//! Resolución del estado de sécurité de un vehículo
//!
//! El estado se deriva de la inspección más reciente del vehículo (por
//! completed_at, a través de todos sus shifts). Sin inspección previa el
//! estado por defecto es "ok"; decisión registrada en DESIGN.md.

use crate::models::inspection::Inspection;

pub const SAFETY_OK: &str = "ok";
pub const SAFETY_ISSUES: &str = "issues";

/// Derivar el estado de sécurité a partir de la última inspección
pub fn safety_status(latest_inspection: Option<&Inspection>) -> &'static str {
    match latest_inspection {
        Some(inspection) if inspection.has_missing_items() => SAFETY_ISSUES,
        _ => SAFETY_OK,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn inspection(all_present: bool) -> Inspection {
        Inspection {
            id: Uuid::new_v4(),
            shift_id: Uuid::new_v4(),
            inspection_type: "return".to_string(),
            video_url: None,
            trousse_secours: true,
            trousse_secours_photo: Some("photo".to_string()),
            trousse_secours_comment: None,
            roue_secours: all_present,
            roue_secours_photo: all_present.then(|| "photo".to_string()),
            roue_secours_comment: (!all_present).then(|| "absente".to_string()),
            extincteur: true,
            extincteur_photo: Some("photo".to_string()),
            extincteur_comment: None,
            booster_batterie: true,
            booster_batterie_photo: Some("photo".to_string()),
            booster_batterie_comment: None,
            completed_at: Utc::now(),
        }
    }

    #[test]
    fn test_no_inspection_defaults_to_ok() {
        assert_eq!(safety_status(None), SAFETY_OK);
    }

    #[test]
    fn test_all_items_present_is_ok() {
        let i = inspection(true);
        assert_eq!(safety_status(Some(&i)), SAFETY_OK);
    }

    #[test]
    fn test_missing_item_yields_issues() {
        let i = inspection(false);
        assert_eq!(safety_status(Some(&i)), SAFETY_ISSUES);
    }
}
