//! Sistema de manejo de errores
//!
//! Este módulo define todos los tipos de errores del sistema
//! y su conversión a respuestas HTTP apropiadas.
//!
//! Cada error lleva un `errorCode` estable además del status HTTP,
//! para que los clientes puedan distinguir los fallos de reglas de
//! negocio (p. ej. ACTIVE_SHIFT_EXISTS vs SHIFT_NOT_ACTIVE).

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Invalid input [{code}]: {message}")]
    InvalidInput { code: &'static str, message: String },

    #[error("Unauthorized [{code}]: {message}")]
    Unauthorized { code: &'static str, message: String },

    #[error("Forbidden [{code}]: {message}")]
    Forbidden { code: &'static str, message: String },

    #[error("Not found [{code}]: {message}")]
    NotFound { code: &'static str, message: String },

    #[error("Conflict [{code}]: {message}")]
    Conflict { code: &'static str, message: String },

    #[error("Hash error: {0}")]
    Hash(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Respuesta de error para la API
///
/// El campo `errorCode` es parte del contrato con los clientes móviles:
/// nunca renombrar un código existente.
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(rename = "errorCode")]
    error_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_response) = match self {
            AppError::Database(e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: "Une erreur de stockage est survenue".to_string(),
                        error_code: "STORAGE_ERROR".to_string(),
                        details: None,
                    },
                )
            }

            AppError::Validation(e) => {
                tracing::warn!("Validation error: {}", e);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse {
                        error: "Les données fournies sont invalides".to_string(),
                        error_code: "INVALID_INPUT".to_string(),
                        details: Some(json!(e)),
                    },
                )
            }

            AppError::InvalidInput { code, message } => {
                tracing::warn!("Invalid input [{}]: {}", code, message);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse {
                        error: message,
                        error_code: code.to_string(),
                        details: None,
                    },
                )
            }

            AppError::Unauthorized { code, message } => {
                tracing::warn!("Unauthorized [{}]: {}", code, message);
                (
                    StatusCode::UNAUTHORIZED,
                    ErrorResponse {
                        error: message,
                        error_code: code.to_string(),
                        details: None,
                    },
                )
            }

            AppError::Forbidden { code, message } => {
                tracing::warn!("Forbidden [{}]: {}", code, message);
                (
                    StatusCode::FORBIDDEN,
                    ErrorResponse {
                        error: message,
                        error_code: code.to_string(),
                        details: None,
                    },
                )
            }

            AppError::NotFound { code, message } => {
                tracing::warn!("Not found [{}]: {}", code, message);
                (
                    StatusCode::NOT_FOUND,
                    ErrorResponse {
                        error: message,
                        error_code: code.to_string(),
                        details: None,
                    },
                )
            }

            AppError::Conflict { code, message } => {
                tracing::warn!("Conflict [{}]: {}", code, message);
                (
                    StatusCode::CONFLICT,
                    ErrorResponse {
                        error: message,
                        error_code: code.to_string(),
                        details: None,
                    },
                )
            }

            AppError::Hash(msg) => {
                tracing::error!("Hash error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: "Une erreur est survenue lors du traitement des identifiants"
                            .to_string(),
                        error_code: "HASH_ERROR".to_string(),
                        details: None,
                    },
                )
            }

            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: "Une erreur inattendue est survenue".to_string(),
                        error_code: "INTERNAL_ERROR".to_string(),
                        details: Some(json!({ "internal_error": msg })),
                    },
                )
            }
        };

        (status, Json(error_response)).into_response()
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Función helper para crear errores de entrada inválida
pub fn invalid_input(code: &'static str, message: impl Into<String>) -> AppError {
    AppError::InvalidInput {
        code,
        message: message.into(),
    }
}

/// Función helper para crear errores de autenticación
pub fn unauthorized(code: &'static str, message: impl Into<String>) -> AppError {
    AppError::Unauthorized {
        code,
        message: message.into(),
    }
}

/// Función helper para crear errores de acceso prohibido
pub fn forbidden(code: &'static str, message: impl Into<String>) -> AppError {
    AppError::Forbidden {
        code,
        message: message.into(),
    }
}

/// Función helper para crear errores de recurso no encontrado
pub fn not_found(code: &'static str, message: impl Into<String>) -> AppError {
    AppError::NotFound {
        code,
        message: message.into(),
    }
}

/// Función helper para crear errores de conflicto
pub fn conflict(code: &'static str, message: impl Into<String>) -> AppError {
    AppError::Conflict {
        code,
        message: message.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_conflict_carries_error_code() {
        let (status, body) =
            body_json(conflict("ACTIVE_SHIFT_EXISTS", "Un shift est déjà actif")).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["errorCode"], "ACTIVE_SHIFT_EXISTS");
        assert_eq!(body["error"], "Un shift est déjà actif");
    }

    #[tokio::test]
    async fn test_invalid_input_maps_to_400() {
        let (status, body) = body_json(invalid_input("INVALID_INPUT", "roueSecours")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errorCode"], "INVALID_INPUT");
    }

    #[tokio::test]
    async fn test_storage_error_is_opaque() {
        let (status, body) = body_json(AppError::Database(sqlx::Error::PoolClosed)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["errorCode"], "STORAGE_ERROR");
        assert!(body.get("details").is_none());
    }
}
