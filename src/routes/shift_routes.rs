use axum::{
    extract::{Path, State},
    routing::{get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::shift_controller::ShiftController;
use crate::dto::shift_dto::StartShiftRequest;
use crate::middleware::auth::CurrentSession;
use crate::models::shift::Shift;
use crate::services::role_gate::{self, Capability};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_shift_router() -> Router<AppState> {
    Router::new()
        .route("/start", post(start_shift))
        .route("/:id/end", put(end_shift))
        .route("/active", get(get_active_shift))
        .route("/history", get(shift_history))
}

async fn start_shift(
    State(state): State<AppState>,
    current: CurrentSession,
    Json(request): Json<StartShiftRequest>,
) -> Result<Json<Shift>, AppError> {
    role_gate::authorize(&current.session, Capability::Driver)?;
    let controller = ShiftController::new(state.pool.clone());
    let shift = controller
        .start(current.session.user_id, request.vehicle_id)
        .await?;
    Ok(Json(shift))
}

async fn end_shift(
    State(state): State<AppState>,
    current: CurrentSession,
    Path(id): Path<Uuid>,
) -> Result<Json<Shift>, AppError> {
    role_gate::authorize(&current.session, Capability::Driver)?;
    let controller = ShiftController::new(state.pool.clone());
    let shift = controller.end(id, current.session.user_id).await?;
    Ok(Json(shift))
}

async fn get_active_shift(
    State(state): State<AppState>,
    current: CurrentSession,
) -> Result<Json<Option<Shift>>, AppError> {
    role_gate::authorize(&current.session, Capability::Driver)?;
    let controller = ShiftController::new(state.pool.clone());
    let shift = controller.get_active(current.session.user_id).await?;
    Ok(Json(shift))
}

async fn shift_history(
    State(state): State<AppState>,
    current: CurrentSession,
) -> Result<Json<Vec<Shift>>, AppError> {
    role_gate::authorize(&current.session, Capability::AnyAuthenticated)?;
    let controller = ShiftController::new(state.pool.clone());
    let shifts = controller.history(&current.session).await?;
    Ok(Json(shifts))
}
