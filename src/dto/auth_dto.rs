use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::session::Session;
use crate::models::user::User;

// Request de login email + mot de passe (chef d'équipe / admin)
#[derive(Debug, Deserialize, Validate)]
pub struct EmailSignInRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,
}

// Request de login par téléphone (chauffeur approuvé, sans mot de passe)
#[derive(Debug, Deserialize, Validate)]
pub struct PhoneSignInRequest {
    #[validate(length(min = 6))]
    pub phone: String,
}

/// Identidad expuesta a los clientes (nunca el password_hash)
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub is_approved: bool,
    pub is_active: bool,
}

impl From<&User> for SessionUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            phone: user.phone.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            role: user.role.clone(),
            is_approved: user.is_approved,
            is_active: user.is_active,
        }
    }
}

impl From<&Session> for SessionUser {
    fn from(session: &Session) -> Self {
        Self {
            id: session.user_id,
            email: session.email.clone(),
            phone: session.phone.clone(),
            first_name: session.first_name.clone(),
            last_name: session.last_name.clone(),
            role: session.role.as_str().to_string(),
            is_approved: session.is_approved,
            is_active: session.is_active,
        }
    }
}

// Response de sign-in: el token viaja en el body además de la cookie,
// los clientes móviles no comparten el cookie jar del navegador.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInResponse {
    pub success: bool,
    pub user: SessionUser,
    pub session_token: String,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub success: bool,
    pub user: SessionUser,
}
