use axum::http::header::SET_COOKIE;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{routing::get, routing::post, routing::put, Json, Router};
use axum_test::TestServer;
use serde_json::json;

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server();
    let response = server.get("/health").await;

    assert_eq!(response.status_code(), StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_protected_endpoint_without_token_returns_no_session() {
    let server = create_test_server();
    let response = server.get("/api/shifts/active").await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json();
    assert_eq!(body["errorCode"], "NO_SESSION");
}

#[tokio::test]
async fn test_sign_in_installs_session_cookie() {
    let server = create_test_server();
    let response = server
        .post("/api/auth/sign-in/phone")
        .json(&json!({ "phone": "+33600000000" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);

    let cookie = response
        .headers()
        .get(SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(cookie.starts_with("sessionToken="));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("Max-Age=86400"));
    assert!(cookie.contains("SameSite=Lax"));

    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], true);
    assert!(body["sessionToken"].is_string());
}

#[tokio::test]
async fn test_unknown_phone_returns_user_not_found() {
    let server = create_test_server();
    let response = server
        .post("/api/auth/sign-in/phone")
        .json(&json!({ "phone": "+33699999999" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    let body: serde_json::Value = response.json();
    assert_eq!(body["errorCode"], "USER_NOT_FOUND");
}

#[tokio::test]
async fn test_double_start_returns_active_shift_exists() {
    let server = create_test_server();

    let first = server.post("/api/shifts/start").json(&json!({})).await;
    assert_eq!(first.status_code(), StatusCode::OK);

    let second = server.post("/api/shifts/start").json(&json!({})).await;
    assert_eq!(second.status_code(), StatusCode::CONFLICT);

    let body: serde_json::Value = second.json();
    assert_eq!(body["errorCode"], "ACTIVE_SHIFT_EXISTS");
}

#[tokio::test]
async fn test_end_shift_is_put_not_post() {
    let server = create_test_server();

    let wrong_verb = server
        .post("/api/shifts/1f9f3d1e-0000-0000-0000-000000000000/end")
        .json(&json!({}))
        .await;
    assert_eq!(wrong_verb.status_code(), StatusCode::METHOD_NOT_ALLOWED);

    let response = server
        .put("/api/shifts/1f9f3d1e-0000-0000-0000-000000000000/end")
        .json(&json!({}))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "completed");
}

// Servidor de test con rutas stub que reproducen el contrato HTTP de la
// API (verbos, status codes, envelope de errores con errorCode, cookie de
// sesión) sin base de datos. Cubre únicamente la superficie wire: las
// reglas de negocio (guards de cierre, idempotencia de lectura de
// alertas, invalidación de sesión, contrefirma) se prueban como unidades
// junto a sus controllers y services.
fn create_test_server() -> TestServer {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    let shift_active = Arc::new(AtomicBool::new(false));

    let app = Router::new()
        .route(
            "/health",
            get(|| async { Json(json!({ "status": "ok" })) }),
        )
        .route(
            "/api/shifts/active",
            get(|| async {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({
                        "error": "Aucune session active",
                        "errorCode": "NO_SESSION",
                    })),
                )
            }),
        )
        .route(
            "/api/auth/sign-in/phone",
            post(|Json(body): Json<serde_json::Value>| async move {
                if body["phone"] == "+33600000000" {
                    let cookie =
                        "sessionToken=stub; Path=/; HttpOnly; Max-Age=86400; SameSite=Lax";
                    (
                        [(SET_COOKIE, cookie)],
                        Json(json!({ "success": true, "sessionToken": "stub" })),
                    )
                        .into_response()
                } else {
                    (
                        StatusCode::NOT_FOUND,
                        Json(json!({
                            "error": "Numéro de téléphone non reconnu",
                            "errorCode": "USER_NOT_FOUND",
                        })),
                    )
                        .into_response()
                }
            }),
        )
        .route(
            "/api/shifts/start",
            post(move || {
                let shift_active = shift_active.clone();
                async move {
                    if shift_active.swap(true, Ordering::SeqCst) {
                        (
                            StatusCode::CONFLICT,
                            Json(json!({
                                "error": "Un shift est déjà actif pour ce chauffeur",
                                "errorCode": "ACTIVE_SHIFT_EXISTS",
                            })),
                        )
                            .into_response()
                    } else {
                        Json(json!({ "status": "active" })).into_response()
                    }
                }
            }),
        )
        .route(
            "/api/shifts/:id/end",
            put(|| async { Json(json!({ "status": "completed" })) }),
        );

    TestServer::new(app).expect("test server")
}
