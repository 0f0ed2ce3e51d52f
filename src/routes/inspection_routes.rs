use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::inspection_controller::InspectionController;
use crate::dto::inspection_dto::CreateInspectionRequest;
use crate::middleware::auth::CurrentSession;
use crate::models::inspection::Inspection;
use crate::services::role_gate::{self, Capability};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_inspection_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_inspection))
        .route("/shift/:shift_id", get(list_by_shift))
}

async fn create_inspection(
    State(state): State<AppState>,
    current: CurrentSession,
    Json(request): Json<CreateInspectionRequest>,
) -> Result<Json<Inspection>, AppError> {
    role_gate::authorize(&current.session, Capability::Driver)?;
    let controller = InspectionController::new(state.pool.clone());
    let inspection = controller.create(current.session.user_id, request).await?;
    Ok(Json(inspection))
}

async fn list_by_shift(
    State(state): State<AppState>,
    current: CurrentSession,
    Path(shift_id): Path<Uuid>,
) -> Result<Json<Vec<Inspection>>, AppError> {
    role_gate::authorize(&current.session, Capability::AnyAuthenticated)?;
    let controller = InspectionController::new(state.pool.clone());
    let inspections = controller
        .list_by_shift(
            shift_id,
            current.session.user_id,
            current.session.role.is_team_leader_or_admin(),
        )
        .await?;
    Ok(Json(inspections))
}
