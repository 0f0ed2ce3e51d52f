use serde::Deserialize;

// Filtros del listado de alertas
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertFilters {
    #[serde(rename = "type")]
    pub alert_type: Option<String>,
    /// RFC3339; solo alertas creadas a partir de esta fecha
    pub start_date: Option<String>,
}
