use axum::{
    extract::{Path, State},
    routing::{get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::user_controller::UserController;
use crate::dto::user_dto::{CreateDriverRequest, DriverListResponse, DriverResponse};
use crate::middleware::auth::CurrentSession;
use crate::services::role_gate::{self, Capability};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_user_router() -> Router<AppState> {
    Router::new()
        .route("/drivers", post(create_driver))
        .route("/drivers", get(list_drivers))
        .route("/drivers/:id/approve", put(approve_driver))
        .route("/drivers/:id/revoke", put(revoke_driver))
        .route("/drivers/:id/restore", put(restore_driver))
}

async fn create_driver(
    State(state): State<AppState>,
    current: CurrentSession,
    Json(request): Json<CreateDriverRequest>,
) -> Result<Json<DriverResponse>, AppError> {
    role_gate::authorize(&current.session, Capability::TeamLeaderOrAdmin)?;
    let controller = UserController::new(state.pool.clone());
    let driver = controller.create_driver(request).await?;
    Ok(Json(driver))
}

async fn list_drivers(
    State(state): State<AppState>,
    current: CurrentSession,
) -> Result<Json<DriverListResponse>, AppError> {
    role_gate::authorize(&current.session, Capability::TeamLeaderOrAdmin)?;
    let controller = UserController::new(state.pool.clone());
    let drivers = controller.list_drivers().await?;
    Ok(Json(drivers))
}

async fn approve_driver(
    State(state): State<AppState>,
    current: CurrentSession,
    Path(id): Path<Uuid>,
) -> Result<Json<DriverResponse>, AppError> {
    role_gate::authorize(&current.session, Capability::TeamLeaderOrAdmin)?;
    let controller = UserController::new(state.pool.clone());
    let driver = controller.approve(id).await?;
    Ok(Json(driver))
}

async fn revoke_driver(
    State(state): State<AppState>,
    current: CurrentSession,
    Path(id): Path<Uuid>,
) -> Result<Json<DriverResponse>, AppError> {
    role_gate::authorize(&current.session, Capability::TeamLeaderOrAdmin)?;
    let controller = UserController::new(state.pool.clone());
    let driver = controller.revoke(id).await?;
    Ok(Json(driver))
}

async fn restore_driver(
    State(state): State<AppState>,
    current: CurrentSession,
    Path(id): Path<Uuid>,
) -> Result<Json<DriverResponse>, AppError> {
    role_gate::authorize(&current.session, Capability::TeamLeaderOrAdmin)?;
    let controller = UserController::new(state.pool.clone());
    let driver = controller.restore(id).await?;
    Ok(Json(driver))
}
