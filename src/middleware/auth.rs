//! Middleware de autenticación
//!
//! Extracción del token de sesión (header Authorization o cookie) y
//! extractor Axum `CurrentSession` que resuelve el token contra el
//! almacén de sesiones, reverificando al usuario en base de datos.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::HeaderMap;

use crate::models::session::Session;
use crate::repositories::user_repository::UserRepository;
use crate::services::session_service::SessionService;
use crate::state::AppState;
use crate::utils::errors::{unauthorized, AppError};

/// Nombre de la cookie de sesión
pub const SESSION_COOKIE: &str = "sessionToken";

/// Duración de la cookie en segundos (24h)
const SESSION_COOKIE_MAX_AGE: u64 = 86_400;

/// Extraer el token de sesión del request.
///
/// Orden de precedencia: header `Authorization: Bearer <token>` primero,
/// cookie `sessionToken` después.
pub fn extract_session_token(headers: &HeaderMap) -> Option<String> {
    if let Some(auth_header) = headers.get("Authorization").and_then(|h| h.to_str().ok()) {
        if let Some(token) = auth_header.strip_prefix("Bearer ") {
            if !token.is_empty() {
                return Some(token.to_string());
            }
        }
    }

    let cookie_header = headers.get("Cookie").and_then(|h| h.to_str().ok())?;
    for pair in cookie_header.split(';') {
        let pair = pair.trim();
        if let Some(value) = pair.strip_prefix("sessionToken=") {
            if !value.is_empty() {
                return Some(value.to_string());
            }
        }
    }
    None
}

/// Valor Set-Cookie para instalar la sesión
pub fn session_cookie(token: &str) -> String {
    format!(
        "{SESSION_COOKIE}={token}; Path=/; HttpOnly; Max-Age={SESSION_COOKIE_MAX_AGE}; SameSite=Lax"
    )
}

/// Valor Set-Cookie para borrar la sesión
pub fn clear_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; Max-Age=0; SameSite=Lax")
}

/// Sesión autenticada del request actual.
///
/// El extractor falla con 401 NO_SESSION si no hay token, y con
/// 401 INVALID_SESSION si el token ya no corresponde a un usuario
/// existente y activo (en cuyo caso la sesión se elimina del almacén).
pub struct CurrentSession {
    pub token: String,
    pub session: Session,
}

#[axum::async_trait]
impl FromRequestParts<AppState> for CurrentSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_session_token(&parts.headers)
            .ok_or_else(|| unauthorized("NO_SESSION", "Aucune session active"))?;

        let service = SessionService::new(
            UserRepository::new(state.pool.clone()),
            state.sessions.clone(),
        );
        let (session, _user) = service.resolve(&token).await?;

        Ok(CurrentSession { token, session })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(name: &'static str, value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(name, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_bearer_token_extracted() {
        let headers = headers_with("Authorization", "Bearer abc123");
        assert_eq!(extract_session_token(&headers), Some("abc123".to_string()));
    }

    #[test]
    fn test_cookie_token_extracted() {
        let headers = headers_with("Cookie", "theme=dark; sessionToken=tok42; lang=fr");
        assert_eq!(extract_session_token(&headers), Some("tok42".to_string()));
    }

    #[test]
    fn test_bearer_takes_precedence_over_cookie() {
        let mut headers = headers_with("Authorization", "Bearer fromheader");
        headers.insert("Cookie", HeaderValue::from_static("sessionToken=fromcookie"));
        assert_eq!(
            extract_session_token(&headers),
            Some("fromheader".to_string())
        );
    }

    #[test]
    fn test_missing_token_returns_none() {
        assert_eq!(extract_session_token(&HeaderMap::new()), None);
    }

    #[test]
    fn test_malformed_authorization_ignored() {
        let headers = headers_with("Authorization", "Basic abc123");
        assert_eq!(extract_session_token(&headers), None);
    }

    #[test]
    fn test_session_cookie_format() {
        let cookie = session_cookie("tok");
        assert_eq!(
            cookie,
            "sessionToken=tok; Path=/; HttpOnly; Max-Age=86400; SameSite=Lax"
        );
    }

    #[test]
    fn test_clear_cookie_expires_immediately() {
        assert!(clear_session_cookie().contains("Max-Age=0"));
    }
}
