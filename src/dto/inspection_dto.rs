use serde::Deserialize;
use uuid::Uuid;

// Request de création d'inspection. Los campos por item llegan planos
// (trousseSecours / trousseSecoursPhoto / trousseSecoursComment...) tal
// cual los envía el formulario móvil existente.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInspectionRequest {
    pub shift_id: Uuid,
    #[serde(rename = "type")]
    pub inspection_type: String,
    pub video_url: Option<String>,

    pub trousse_secours: bool,
    pub trousse_secours_photo: Option<String>,
    pub trousse_secours_comment: Option<String>,

    pub roue_secours: bool,
    pub roue_secours_photo: Option<String>,
    pub roue_secours_comment: Option<String>,

    pub extincteur: bool,
    pub extincteur_photo: Option<String>,
    pub extincteur_comment: Option<String>,

    pub booster_batterie: bool,
    pub booster_batterie_photo: Option<String>,
    pub booster_batterie_comment: Option<String>,
}

impl CreateInspectionRequest {
    /// Vista homogénea de los 4 items para el validador y el generador
    /// de alertas, en el orden fijo del formulario.
    pub fn items(&self) -> [InspectionItemView<'_>; 4] {
        [
            InspectionItemView {
                name: crate::models::inspection::ITEM_TROUSSE_SECOURS,
                present: self.trousse_secours,
                photo: &self.trousse_secours_photo,
                comment: &self.trousse_secours_comment,
            },
            InspectionItemView {
                name: crate::models::inspection::ITEM_ROUE_SECOURS,
                present: self.roue_secours,
                photo: &self.roue_secours_photo,
                comment: &self.roue_secours_comment,
            },
            InspectionItemView {
                name: crate::models::inspection::ITEM_EXTINCTEUR,
                present: self.extincteur,
                photo: &self.extincteur_photo,
                comment: &self.extincteur_comment,
            },
            InspectionItemView {
                name: crate::models::inspection::ITEM_BOOSTER_BATTERIE,
                present: self.booster_batterie,
                photo: &self.booster_batterie_photo,
                comment: &self.booster_batterie_comment,
            },
        ]
    }

    pub fn has_missing_items(&self) -> bool {
        self.items().iter().any(|item| !item.present)
    }
}

/// Vista de un item de sécurité dentro del request
pub struct InspectionItemView<'a> {
    pub name: &'static str,
    pub present: bool,
    pub photo: &'a Option<String>,
    pub comment: &'a Option<String>,
}
