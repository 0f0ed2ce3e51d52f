use axum::{
    extract::State,
    http::header::SET_COOKIE,
    response::{AppendHeaders, IntoResponse},
    routing::{get, post},
    Json, Router,
};

use crate::controllers::auth_controller::AuthController;
use crate::dto::auth_dto::{EmailSignInRequest, PhoneSignInRequest, SessionResponse};
use crate::dto::common_dto::ApiResponse;
use crate::middleware::auth::{clear_session_cookie, session_cookie, CurrentSession};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/sign-in/email", post(sign_in_email))
        .route("/sign-in/phone", post(sign_in_phone))
        .route("/session", get(session))
        .route("/sign-out", post(sign_out))
}

async fn sign_in_email(
    State(state): State<AppState>,
    Json(request): Json<EmailSignInRequest>,
) -> Result<impl IntoResponse, AppError> {
    let controller = AuthController::new(state.pool.clone(), state.sessions.clone());
    let (token, response) = controller.sign_in_email(request).await?;
    let headers = AppendHeaders([(SET_COOKIE, session_cookie(&token))]);
    Ok((headers, Json(response)))
}

async fn sign_in_phone(
    State(state): State<AppState>,
    Json(request): Json<PhoneSignInRequest>,
) -> Result<impl IntoResponse, AppError> {
    let controller = AuthController::new(state.pool.clone(), state.sessions.clone());
    let (token, response) = controller.sign_in_phone(request).await?;
    let headers = AppendHeaders([(SET_COOKIE, session_cookie(&token))]);
    Ok((headers, Json(response)))
}

async fn session(
    State(state): State<AppState>,
    current: CurrentSession,
) -> Result<Json<SessionResponse>, AppError> {
    let controller = AuthController::new(state.pool.clone(), state.sessions.clone());
    let response = controller.session(&current.token).await?;
    Ok(Json(response))
}

async fn sign_out(
    State(state): State<AppState>,
    current: CurrentSession,
) -> Result<impl IntoResponse, AppError> {
    let controller = AuthController::new(state.pool.clone(), state.sessions.clone());
    controller.sign_out(&current.token).await;
    let headers = AppendHeaders([(SET_COOKIE, clear_session_cookie())]);
    Ok((headers, Json(ApiResponse::message_only("Déconnecté".to_string()))))
}
