use axum::{
    extract::{Path, State},
    routing::{get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::battery_record_controller::BatteryRecordController;
use crate::dto::battery_record_dto::{CreateBatteryRecordRequest, SignBatteryRecordRequest};
use crate::dto::common_dto::ApiResponse;
use crate::middleware::auth::CurrentSession;
use crate::models::battery_record::BatteryRecord;
use crate::services::role_gate::{self, Capability};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_battery_record_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_record))
        .route("/shift/:shift_id", get(list_by_shift))
        .route("/:id/sign", put(sign_record))
}

async fn create_record(
    State(state): State<AppState>,
    current: CurrentSession,
    Json(request): Json<CreateBatteryRecordRequest>,
) -> Result<Json<BatteryRecord>, AppError> {
    role_gate::authorize(&current.session, Capability::Driver)?;
    let controller = BatteryRecordController::new(state.pool.clone());
    let record = controller.create(current.session.user_id, request).await?;
    Ok(Json(record))
}

async fn list_by_shift(
    State(state): State<AppState>,
    current: CurrentSession,
    Path(shift_id): Path<Uuid>,
) -> Result<Json<Vec<BatteryRecord>>, AppError> {
    role_gate::authorize(&current.session, Capability::AnyAuthenticated)?;
    let controller = BatteryRecordController::new(state.pool.clone());
    let records = controller
        .list_by_shift(
            shift_id,
            current.session.user_id,
            current.session.role.is_team_leader_or_admin(),
        )
        .await?;
    Ok(Json(records))
}

async fn sign_record(
    State(state): State<AppState>,
    current: CurrentSession,
    Path(id): Path<Uuid>,
    Json(request): Json<SignBatteryRecordRequest>,
) -> Result<Json<ApiResponse<BatteryRecord>>, AppError> {
    role_gate::authorize(&current.session, Capability::TeamLeaderOrAdmin)?;
    let controller = BatteryRecordController::new(state.pool.clone());
    let record = controller.sign(id, request).await?;
    Ok(Json(record))
}
