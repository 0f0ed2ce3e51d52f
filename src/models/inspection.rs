//! Modelo de Inspection
//!
//! Una inspección cubre 4 équipements de sécurité fijos. Regla por item:
//! présent ⇒ photo obligatoire, absent ⇒ commentaire obligatoire.
//! Inmutable una vez creada.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

pub const INSPECTION_DEPARTURE: &str = "departure";
pub const INSPECTION_RETURN: &str = "return";

/// Nombres de items en el formato camelCase del contrato API
pub const ITEM_TROUSSE_SECOURS: &str = "trousseSecours";
pub const ITEM_ROUE_SECOURS: &str = "roueSecours";
pub const ITEM_EXTINCTEUR: &str = "extincteur";
pub const ITEM_BOOSTER_BATTERIE: &str = "boosterBatterie";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Inspection {
    pub id: Uuid,
    pub shift_id: Uuid,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
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
    pub completed_at: DateTime<Utc>,
}

impl Inspection {
    /// Items marcados como absents, en el orden fijo del formulario
    pub fn absent_items(&self) -> Vec<&'static str> {
        let mut items = Vec::new();
        if !self.trousse_secours {
            items.push(ITEM_TROUSSE_SECOURS);
        }
        if !self.roue_secours {
            items.push(ITEM_ROUE_SECOURS);
        }
        if !self.extincteur {
            items.push(ITEM_EXTINCTEUR);
        }
        if !self.booster_batterie {
            items.push(ITEM_BOOSTER_BATTERIE);
        }
        items
    }

    /// true si al menos un équipement está absent
    pub fn has_missing_items(&self) -> bool {
        !(self.trousse_secours && self.roue_secours && self.extincteur && self.booster_batterie)
    }
}
