//! Autoridad de sesiones
//!
//! Dos modos de login: email + mot de passe para chef d'équipe / admin,
//! y téléphone seul para chauffeurs aprobados. En ambos casos se acuña un
//! token opaco aleatorio ligado a un snapshot de la identidad.

use rand::distributions::Alphanumeric;
use rand::Rng;

use crate::models::session::Session;
use crate::models::user::{User, UserRole};
use crate::repositories::user_repository::UserRepository;
use crate::state::SessionStore;
use crate::utils::errors::{forbidden, not_found, unauthorized, AppError, AppResult};

/// Longitud del token de sesión
const SESSION_TOKEN_LEN: usize = 32;

/// Generar un token de sesión aleatorio
pub fn generate_session_token() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SESSION_TOKEN_LEN)
        .map(char::from)
        .collect()
}

/// Comparar el mot de passe contra el hash almacenado.
///
/// Un usuario sin hash (cuenta aprovisionada sin mot de passe) recibe el
/// mismo 401 que un mot de passe incorrecto, sin pasar por bcrypt.
fn verify_password(password: &str, stored_hash: Option<&str>) -> AppResult<()> {
    let Some(hash) = stored_hash else {
        return Err(unauthorized(
            "INVALID_CREDENTIALS",
            "Email ou mot de passe incorrect",
        ));
    };
    let matches = bcrypt::verify(password, hash).map_err(|e| AppError::Hash(e.to_string()))?;
    if !matches {
        return Err(unauthorized(
            "INVALID_CREDENTIALS",
            "Email ou mot de passe incorrect",
        ));
    }
    Ok(())
}

/// Reverificación del usuario detrás de una sesión viva.
///
/// Usuario ausente o desactivado: la sesión ya no representa a nadie
/// y debe eliminarse del almacén por quien llama.
fn check_session_user(user: Option<User>) -> AppResult<User> {
    match user {
        Some(user) if user.is_active => Ok(user),
        _ => Err(unauthorized("INVALID_SESSION", "Authentification invalide")),
    }
}

pub struct SessionService {
    users: UserRepository,
    sessions: SessionStore,
}

impl SessionService {
    pub fn new(users: UserRepository, sessions: SessionStore) -> Self {
        Self { users, sessions }
    }

    /// Login por email + mot de passe (chef d'équipe / admin únicamente)
    pub async fn sign_in_with_email(
        &self,
        email: &str,
        password: &str,
    ) -> AppResult<(String, User)> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or_else(|| {
                tracing::warn!(email, "Sign-in failed: user not found");
                unauthorized("INVALID_CREDENTIALS", "Email ou mot de passe incorrect")
            })?;

        let role = user.role().ok_or_else(|| {
            AppError::Internal(format!("Rôle inconnu en base: {}", user.role))
        })?;

        // Los chauffeurs entran por téléphone, jamais par mot de passe
        if !role.is_team_leader_or_admin() {
            tracing::warn!(email, role = user.role.as_str(), "Email login not allowed for role");
            return Err(forbidden(
                "FORBIDDEN_LOGIN_METHOD",
                "Accès refusé. Veuillez utiliser la connexion par téléphone",
            ));
        }

        verify_password(password, user.password_hash.as_deref()).map_err(|e| {
            tracing::warn!(email, "Sign-in failed: invalid password");
            e
        })?;

        let token = generate_session_token();
        let session = Session::snapshot(&user, role);
        self.sessions.insert(token.clone(), session).await;

        tracing::info!(user_id = %user.id, email, role = user.role.as_str(), "Signed in with email");
        Ok((token, user))
    }

    /// Login par téléphone, sans mot de passe (chauffeurs aprobados y activos)
    pub async fn sign_in_with_phone(&self, phone: &str) -> AppResult<(String, User)> {
        let user = self.users.find_by_phone(phone).await?.ok_or_else(|| {
            tracing::warn!(phone, "Sign-in failed: phone not recognized");
            not_found("USER_NOT_FOUND", "Numéro de téléphone non reconnu")
        })?;

        let role = user.role().ok_or_else(|| {
            AppError::Internal(format!("Rôle inconnu en base: {}", user.role))
        })?;

        if role != UserRole::Driver {
            tracing::warn!(phone, role = user.role.as_str(), "Phone login not allowed for role");
            return Err(forbidden(
                "FORBIDDEN_LOGIN_METHOD",
                "Accès refusé. Veuillez utiliser la connexion par email",
            ));
        }

        if !user.is_approved {
            tracing::warn!(phone, user_id = %user.id, "Sign-in failed: not approved");
            return Err(forbidden(
                "NOT_APPROVED",
                "Votre compte est en attente d'approbation",
            ));
        }

        if !user.is_active {
            tracing::warn!(phone, user_id = %user.id, "Sign-in failed: not active");
            return Err(forbidden("NOT_ACTIVE", "Votre compte a été désactivé"));
        }

        let token = generate_session_token();
        let session = Session::snapshot(&user, role);
        self.sessions.insert(token.clone(), session).await;

        tracing::info!(user_id = %user.id, phone, "Driver signed in with phone");
        Ok((token, user))
    }

    /// Resolver un token a su sesión, reverificando al usuario en base.
    ///
    /// Si el usuario ya no existe o fue desactivado, la sesión se elimina
    /// y el token deja de ser válido.
    pub async fn resolve(&self, token: &str) -> AppResult<(Session, User)> {
        let session = self
            .sessions
            .get(token)
            .await
            .ok_or_else(|| unauthorized("NO_SESSION", "Aucune session active"))?;

        let user = match check_session_user(self.users.find_by_id(session.user_id).await?) {
            Ok(user) => user,
            Err(e) => {
                tracing::warn!(user_id = %session.user_id, "Session invalidated: user missing or inactive");
                self.sessions.remove(token).await;
                return Err(e);
            }
        };

        Ok((session, user))
    }

    /// Cerrar sesión. Idempotente: un token desconocido no es un error.
    pub async fn sign_out(&self, token: &str) {
        if let Some(session) = self.sessions.remove(token).await {
            tracing::info!(user_id = %session.user_id, "User signed out");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn team_leader(password_hash: Option<String>, is_active: bool) -> User {
        User {
            id: Uuid::new_v4(),
            email: Some("chef@example.com".to_string()),
            phone: None,
            password_hash,
            first_name: "Chef".to_string(),
            last_name: "Équipe".to_string(),
            role: "team_leader".to_string(),
            is_approved: true,
            is_active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_verify_password_accepts_matching_hash() {
        let hash = bcrypt::hash("s3cret", 4).unwrap();
        assert!(verify_password("s3cret", Some(&hash)).is_ok());
    }

    #[test]
    fn test_verify_password_rejects_wrong_password() {
        let hash = bcrypt::hash("s3cret", 4).unwrap();
        let err = verify_password("autre", Some(&hash)).unwrap_err();
        match err {
            AppError::Unauthorized { code, .. } => assert_eq!(code, "INVALID_CREDENTIALS"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_verify_password_missing_hash_is_401_not_500() {
        let err = verify_password("s3cret", None).unwrap_err();
        match err {
            AppError::Unauthorized { code, .. } => assert_eq!(code, "INVALID_CREDENTIALS"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_session_user_active_passes() {
        let user = team_leader(None, true);
        assert!(check_session_user(Some(user)).is_ok());
    }

    #[test]
    fn test_session_user_revoked_invalidates() {
        let user = team_leader(None, false);
        let err = check_session_user(Some(user)).unwrap_err();
        match err {
            AppError::Unauthorized { code, .. } => assert_eq!(code, "INVALID_SESSION"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_session_user_deleted_invalidates() {
        let err = check_session_user(None).unwrap_err();
        match err {
            AppError::Unauthorized { code, .. } => assert_eq!(code, "INVALID_SESSION"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_token_length_and_charset() {
        let token = generate_session_token();
        assert_eq!(token.len(), SESSION_TOKEN_LEN);
        assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_tokens_are_unique() {
        let a = generate_session_token();
        let b = generate_session_token();
        assert_ne!(a, b);
    }
}
