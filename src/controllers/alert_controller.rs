use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::alert_dto::AlertFilters;
use crate::models::alert::{Alert, AlertType};
use crate::repositories::alert_repository::AlertRepository;
use crate::utils::errors::{invalid_input, not_found, AppError};
use crate::utils::validation::validate_datetime;

pub struct AlertController {
    repository: AlertRepository,
}

impl AlertController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: AlertRepository::new(pool),
        }
    }

    /// Listado de alertas, más recientes primero, filtrable por tipo y
    /// fecha de inicio.
    pub async fn list(&self, filters: AlertFilters) -> Result<Vec<Alert>, AppError> {
        if let Some(alert_type) = filters.alert_type.as_deref() {
            if AlertType::from_str(alert_type).is_none() {
                return Err(invalid_input(
                    "INVALID_INPUT",
                    format!("Type d'alerte inconnu: {alert_type}"),
                ));
            }
        }

        let start_date = match filters.start_date.as_deref() {
            Some(raw) => Some(validate_datetime(raw).map_err(|_| {
                invalid_input("INVALID_INPUT", "startDate: date RFC3339 attendue")
            })?),
            None => None,
        };

        self.repository
            .find_filtered(filters.alert_type.as_deref(), start_date)
            .await
    }

    /// Marcar una alerta como leída. Idempotente: una segunda llamada
    /// devuelve la alerta sin cambios.
    pub async fn mark_read(&self, id: Uuid) -> Result<Alert, AppError> {
        let updated = self.repository.mark_read_if_unread(id).await?;
        let current = if updated.is_none() {
            self.repository.find_by_id(id).await?
        } else {
            None
        };
        resolve_mark_read(updated, current)
    }
}

/// Resultado de marcar como leída: el UPDATE condicional devuelve la fila
/// solo si estaba sin leer; el fetch posterior distingue "ya leída"
/// (éxito sin cambios) de "inexistente" (404).
fn resolve_mark_read(updated: Option<Alert>, current: Option<Alert>) -> Result<Alert, AppError> {
    updated
        .or(current)
        .ok_or_else(|| not_found("ALERT_NOT_FOUND", "Alerte introuvable"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::alert::AlertType;
    use chrono::Utc;

    fn alert(read_at: Option<chrono::DateTime<Utc>>) -> Alert {
        Alert {
            id: Uuid::new_v4(),
            alert_type: AlertType::DriverPending.as_str().to_string(),
            title: "Nouveau chauffeur".to_string(),
            message: "Un chauffeur attend son approbation".to_string(),
            payload: serde_json::json!({}),
            created_at: Utc::now(),
            read_at,
        }
    }

    #[test]
    fn test_first_read_returns_updated_row() {
        let now = Utc::now();
        let resolved = resolve_mark_read(Some(alert(Some(now))), None).unwrap();
        assert_eq!(resolved.read_at, Some(now));
    }

    #[test]
    fn test_second_read_is_success_without_changes() {
        let first_read = Utc::now();
        let resolved = resolve_mark_read(None, Some(alert(Some(first_read)))).unwrap();
        assert_eq!(resolved.read_at, Some(first_read));
    }

    #[test]
    fn test_unknown_alert_is_not_found() {
        let err = resolve_mark_read(None, None).unwrap_err();
        match err {
            AppError::NotFound { code, .. } => assert_eq!(code, "ALERT_NOT_FOUND"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
