//! Sesión en memoria
//!
//! Una sesión asocia un token opaco a un snapshot de la identidad del
//! usuario en el momento del login. El snapshot se reverifica contra la
//! base en cada resolución: si el usuario fue desactivado, la sesión se
//! invalida y se elimina.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::user::{User, UserRole};

#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub user_id: Uuid,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
    pub is_approved: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Crear sesión a partir del usuario encontrado en base
    pub fn snapshot(user: &User, role: UserRole) -> Self {
        Self {
            user_id: user.id,
            email: user.email.clone(),
            phone: user.phone.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            role,
            is_approved: user.is_approved,
            is_active: user.is_active,
            created_at: Utc::now(),
        }
    }
}
