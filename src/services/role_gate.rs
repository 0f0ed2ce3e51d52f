//! Política de autorización por rol
//!
//! Función pura del rol de la sesión: cada endpoint hace exactamente una
//! llamada a `authorize` con la capability que requiere, en lugar de
//! comparaciones de rol dispersas por los handlers.

use crate::models::session::Session;
use crate::models::user::UserRole;
use crate::utils::errors::{forbidden, AppResult};

/// Conjunto de capabilities que un endpoint puede exigir
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Driver,
    TeamLeaderOrAdmin,
    Admin,
    AnyAuthenticated,
}

/// Autorizar una sesión contra la capability requerida.
///
/// Sin efectos secundarios. La existencia/validez de la sesión ya fue
/// establecida por el extractor; aquí solo se decide el rol.
pub fn authorize(session: &Session, required: Capability) -> AppResult<()> {
    let allowed = match required {
        Capability::AnyAuthenticated => true,
        Capability::Driver => session.role == UserRole::Driver,
        Capability::TeamLeaderOrAdmin => session.role.is_team_leader_or_admin(),
        Capability::Admin => session.role == UserRole::Admin,
    };

    if allowed {
        Ok(())
    } else {
        let message = match required {
            Capability::Driver => "Accès refusé. Rôle chauffeur requis",
            Capability::TeamLeaderOrAdmin => {
                "Accès refusé. Rôle chef d'équipe ou administrateur requis"
            }
            Capability::Admin => "Accès refusé. Rôle administrateur requis",
            Capability::AnyAuthenticated => unreachable!(),
        };
        tracing::warn!(
            user_id = %session.user_id,
            role = session.role.as_str(),
            "Forbidden: capability {:?} required",
            required
        );
        Err(forbidden("FORBIDDEN", message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn session_with_role(role: UserRole) -> Session {
        Session {
            user_id: Uuid::new_v4(),
            email: Some("test@example.com".to_string()),
            phone: None,
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            role,
            is_approved: true,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_driver_endpoints_reject_leaders() {
        let leader = session_with_role(UserRole::TeamLeader);
        let admin = session_with_role(UserRole::Admin);
        assert!(authorize(&leader, Capability::Driver).is_err());
        assert!(authorize(&admin, Capability::Driver).is_err());
        let driver = session_with_role(UserRole::Driver);
        assert!(authorize(&driver, Capability::Driver).is_ok());
    }

    #[test]
    fn test_leader_endpoints_reject_drivers() {
        let driver = session_with_role(UserRole::Driver);
        assert!(authorize(&driver, Capability::TeamLeaderOrAdmin).is_err());
        assert!(authorize(
            &session_with_role(UserRole::TeamLeader),
            Capability::TeamLeaderOrAdmin
        )
        .is_ok());
        assert!(authorize(
            &session_with_role(UserRole::Admin),
            Capability::TeamLeaderOrAdmin
        )
        .is_ok());
    }

    #[test]
    fn test_admin_only() {
        assert!(authorize(&session_with_role(UserRole::TeamLeader), Capability::Admin).is_err());
        assert!(authorize(&session_with_role(UserRole::Admin), Capability::Admin).is_ok());
    }

    #[test]
    fn test_any_authenticated_accepts_all_roles() {
        for role in [UserRole::Driver, UserRole::TeamLeader, UserRole::Admin] {
            assert!(authorize(&session_with_role(role), Capability::AnyAuthenticated).is_ok());
        }
    }
}
