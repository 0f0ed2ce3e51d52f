use axum::{
    extract::{Path, State},
    routing::{get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::maintenance_controller::MaintenanceController;
use crate::dto::maintenance_dto::{CreateMaintenanceRequest, UpdateMaintenanceStatusRequest};
use crate::middleware::auth::CurrentSession;
use crate::models::maintenance::MaintenanceLog;
use crate::services::role_gate::{self, Capability};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_maintenance_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_maintenance))
        .route("/recent", get(list_recent))
        .route("/:id/status", put(update_status))
        .route("/vehicle/:vehicle_id", get(list_by_vehicle))
}

async fn create_maintenance(
    State(state): State<AppState>,
    current: CurrentSession,
    Json(request): Json<CreateMaintenanceRequest>,
) -> Result<Json<MaintenanceLog>, AppError> {
    role_gate::authorize(&current.session, Capability::TeamLeaderOrAdmin)?;
    let controller = MaintenanceController::new(state.pool.clone());
    let log = controller.create(current.session.user_id, request).await?;
    Ok(Json(log))
}

async fn update_status(
    State(state): State<AppState>,
    current: CurrentSession,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateMaintenanceStatusRequest>,
) -> Result<Json<MaintenanceLog>, AppError> {
    role_gate::authorize(&current.session, Capability::TeamLeaderOrAdmin)?;
    let controller = MaintenanceController::new(state.pool.clone());
    let log = controller.update_status(id, request).await?;
    Ok(Json(log))
}

async fn list_by_vehicle(
    State(state): State<AppState>,
    current: CurrentSession,
    Path(vehicle_id): Path<Uuid>,
) -> Result<Json<Vec<MaintenanceLog>>, AppError> {
    role_gate::authorize(&current.session, Capability::TeamLeaderOrAdmin)?;
    let controller = MaintenanceController::new(state.pool.clone());
    let logs = controller.list_by_vehicle(vehicle_id).await?;
    Ok(Json(logs))
}

async fn list_recent(
    State(state): State<AppState>,
    current: CurrentSession,
) -> Result<Json<Vec<MaintenanceLog>>, AppError> {
    role_gate::authorize(&current.session, Capability::TeamLeaderOrAdmin)?;
    let controller = MaintenanceController::new(state.pool.clone());
    let logs = controller.list_recent().await?;
    Ok(Json(logs))
}
