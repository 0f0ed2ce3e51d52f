use chrono::Utc;
use sqlx::PgPool;

use crate::dto::report_dto::{
    FailedInspectionExport, FailedInspectionFilters, FailedInspectionReport, FailedItemReport,
};
use crate::models::inspection::{
    ITEM_BOOSTER_BATTERIE, ITEM_EXTINCTEUR, ITEM_ROUE_SECOURS, ITEM_TROUSSE_SECOURS,
};
use crate::repositories::inspection_repository::{FailedInspectionRow, InspectionRepository};
use crate::utils::errors::{invalid_input, AppError};
use crate::utils::validation::validate_datetime;

pub struct ReportController {
    inspections: InspectionRepository,
}

impl ReportController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            inspections: InspectionRepository::new(pool),
        }
    }

    /// Rapport d'inspections échouées: inspecciones con al menos un
    /// équipement absent, con chauffeur, filtrables por fecha y chauffeur.
    pub async fn failed_inspections(
        &self,
        filters: FailedInspectionFilters,
    ) -> Result<Vec<FailedInspectionReport>, AppError> {
        let start_date = match filters.start_date.as_deref() {
            Some(raw) => Some(validate_datetime(raw).map_err(|_| {
                invalid_input("INVALID_INPUT", "startDate: date RFC3339 attendue")
            })?),
            None => None,
        };
        let end_date = match filters.end_date.as_deref() {
            Some(raw) => Some(validate_datetime(raw).map_err(|_| {
                invalid_input("INVALID_INPUT", "endDate: date RFC3339 attendue")
            })?),
            None => None,
        };

        let rows = self
            .inspections
            .find_failed(start_date, end_date, filters.driver_id)
            .await?;

        Ok(rows.into_iter().map(build_report).collect())
    }

    /// Export JSON du rapport: mêmes filtres, avec horodatage et total.
    pub async fn export_failed_inspections(
        &self,
        filters: FailedInspectionFilters,
    ) -> Result<FailedInspectionExport, AppError> {
        let reports = self.failed_inspections(filters).await?;
        tracing::info!("📤 Export inspections échouées: {} lignes", reports.len());
        Ok(FailedInspectionExport {
            total_records: reports.len(),
            exported_at: Utc::now(),
            data: reports,
        })
    }
}

fn build_report(row: FailedInspectionRow) -> FailedInspectionReport {
    let mut failed_items = Vec::new();
    if !row.trousse_secours {
        failed_items.push(FailedItemReport {
            item_name: ITEM_TROUSSE_SECOURS,
            comment: row.trousse_secours_comment,
            photo_url: row.trousse_secours_photo,
        });
    }
    if !row.roue_secours {
        failed_items.push(FailedItemReport {
            item_name: ITEM_ROUE_SECOURS,
            comment: row.roue_secours_comment,
            photo_url: row.roue_secours_photo,
        });
    }
    if !row.extincteur {
        failed_items.push(FailedItemReport {
            item_name: ITEM_EXTINCTEUR,
            comment: row.extincteur_comment,
            photo_url: row.extincteur_photo,
        });
    }
    if !row.booster_batterie {
        failed_items.push(FailedItemReport {
            item_name: ITEM_BOOSTER_BATTERIE,
            comment: row.booster_batterie_comment,
            photo_url: row.booster_batterie_photo,
        });
    }

    FailedInspectionReport {
        inspection_id: row.id,
        shift_id: row.shift_id,
        inspection_type: row.inspection_type,
        completed_at: row.completed_at,
        driver_id: row.driver_id,
        driver_name: format!("{} {}", row.first_name, row.last_name),
        failed_items,
    }
}
