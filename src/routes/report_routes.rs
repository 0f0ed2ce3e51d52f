use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};

use crate::controllers::report_controller::ReportController;
use crate::dto::report_dto::{
    FailedInspectionExport, FailedInspectionFilters, FailedInspectionReport,
};
use crate::middleware::auth::CurrentSession;
use crate::services::role_gate::{self, Capability};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_report_router() -> Router<AppState> {
    Router::new()
        .route("/failed-inspections", get(failed_inspections))
        .route("/failed-inspections/export", get(export_failed_inspections))
}

async fn failed_inspections(
    State(state): State<AppState>,
    current: CurrentSession,
    Query(filters): Query<FailedInspectionFilters>,
) -> Result<Json<Vec<FailedInspectionReport>>, AppError> {
    role_gate::authorize(&current.session, Capability::TeamLeaderOrAdmin)?;
    let controller = ReportController::new(state.pool.clone());
    let reports = controller.failed_inspections(filters).await?;
    Ok(Json(reports))
}

async fn export_failed_inspections(
    State(state): State<AppState>,
    current: CurrentSession,
    Query(filters): Query<FailedInspectionFilters>,
) -> Result<Json<FailedInspectionExport>, AppError> {
    role_gate::authorize(&current.session, Capability::TeamLeaderOrAdmin)?;
    let controller = ReportController::new(state.pool.clone());
    let export = controller.export_failed_inspections(filters).await?;
    Ok(Json(export))
}
