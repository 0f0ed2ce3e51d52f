use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::location_controller::LocationController;
use crate::dto::location_dto::{FleetLocationResponse, LocationUpdateRequest};
use crate::middleware::auth::CurrentSession;
use crate::models::location::LocationUpdate;
use crate::services::role_gate::{self, Capability};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_location_router() -> Router<AppState> {
    Router::new()
        .route("/update", post(record_location))
        .route("/fleet", get(fleet_locations))
        .route("/driver/:driver_id", get(driver_location))
}

async fn record_location(
    State(state): State<AppState>,
    current: CurrentSession,
    Json(request): Json<LocationUpdateRequest>,
) -> Result<Json<LocationUpdate>, AppError> {
    role_gate::authorize(&current.session, Capability::Driver)?;
    let controller = LocationController::new(state.pool.clone());
    let update = controller.record(current.session.user_id, request).await?;
    Ok(Json(update))
}

async fn fleet_locations(
    State(state): State<AppState>,
    current: CurrentSession,
) -> Result<Json<Vec<FleetLocationResponse>>, AppError> {
    role_gate::authorize(&current.session, Capability::TeamLeaderOrAdmin)?;
    let controller = LocationController::new(state.pool.clone());
    let positions = controller.fleet().await?;
    Ok(Json(positions))
}

async fn driver_location(
    State(state): State<AppState>,
    current: CurrentSession,
    Path(driver_id): Path<Uuid>,
) -> Result<Json<FleetLocationResponse>, AppError> {
    role_gate::authorize(&current.session, Capability::TeamLeaderOrAdmin)?;
    let controller = LocationController::new(state.pool.clone());
    let position = controller.latest_for_driver(driver_id).await?;
    Ok(Json(position))
}
