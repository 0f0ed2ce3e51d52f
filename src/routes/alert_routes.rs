use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::alert_controller::AlertController;
use crate::dto::alert_dto::AlertFilters;
use crate::middleware::auth::CurrentSession;
use crate::models::alert::Alert;
use crate::services::role_gate::{self, Capability};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_alert_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_alerts))
        .route("/:id/read", post(mark_alert_read))
}

async fn list_alerts(
    State(state): State<AppState>,
    current: CurrentSession,
    Query(filters): Query<AlertFilters>,
) -> Result<Json<Vec<Alert>>, AppError> {
    role_gate::authorize(&current.session, Capability::TeamLeaderOrAdmin)?;
    let controller = AlertController::new(state.pool.clone());
    let alerts = controller.list(filters).await?;
    Ok(Json(alerts))
}

async fn mark_alert_read(
    State(state): State<AppState>,
    current: CurrentSession,
    Path(id): Path<Uuid>,
) -> Result<Json<Alert>, AppError> {
    role_gate::authorize(&current.session, Capability::TeamLeaderOrAdmin)?;
    let controller = AlertController::new(state.pool.clone());
    let alert = controller.mark_read(id).await?;
    Ok(Json(alert))
}
