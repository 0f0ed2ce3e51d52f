use axum::{
    extract::{Path, State},
    routing::{get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::vehicle_controller::VehicleController;
use crate::dto::common_dto::ApiResponse;
use crate::dto::vehicle_dto::{
    CreateVehicleRequest, UpdateVehicleRequest, VehicleResponse, VehicleSafetyResponse,
};
use crate::middleware::auth::CurrentSession;
use crate::services::role_gate::{self, Capability};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_vehicle))
        .route("/", get(list_vehicles))
        .route("/qr/:qr_code", get(resolve_by_qr))
        .route("/:id", get(get_vehicle))
        .route("/:id", put(update_vehicle))
}

async fn create_vehicle(
    State(state): State<AppState>,
    current: CurrentSession,
    Json(request): Json<CreateVehicleRequest>,
) -> Result<Json<ApiResponse<VehicleResponse>>, AppError> {
    role_gate::authorize(&current.session, Capability::TeamLeaderOrAdmin)?;
    let controller = VehicleController::new(state.pool.clone());
    let vehicle = controller.create(request).await?;
    Ok(Json(vehicle))
}

async fn list_vehicles(
    State(state): State<AppState>,
    current: CurrentSession,
) -> Result<Json<Vec<VehicleResponse>>, AppError> {
    role_gate::authorize(&current.session, Capability::AnyAuthenticated)?;
    let controller = VehicleController::new(state.pool.clone());
    let vehicles = controller.list().await?;
    Ok(Json(vehicles))
}

async fn get_vehicle(
    State(state): State<AppState>,
    current: CurrentSession,
    Path(id): Path<Uuid>,
) -> Result<Json<VehicleResponse>, AppError> {
    role_gate::authorize(&current.session, Capability::AnyAuthenticated)?;
    let controller = VehicleController::new(state.pool.clone());
    let vehicle = controller.get_by_id(id).await?;
    Ok(Json(vehicle))
}

async fn update_vehicle(
    State(state): State<AppState>,
    current: CurrentSession,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateVehicleRequest>,
) -> Result<Json<ApiResponse<VehicleResponse>>, AppError> {
    role_gate::authorize(&current.session, Capability::TeamLeaderOrAdmin)?;
    let controller = VehicleController::new(state.pool.clone());
    let vehicle = controller.update(id, request).await?;
    Ok(Json(vehicle))
}

async fn resolve_by_qr(
    State(state): State<AppState>,
    current: CurrentSession,
    Path(qr_code): Path<String>,
) -> Result<Json<VehicleSafetyResponse>, AppError> {
    role_gate::authorize(&current.session, Capability::AnyAuthenticated)?;
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.resolve_by_qr(&qr_code).await?;
    Ok(Json(response))
}
