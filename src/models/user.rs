//! Modelo de User
//!
//! Un usuario se identifica por email (chef d'équipe / admin, login par mot
//! de passe) o por téléphone (chauffeur, login sans mot de passe).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Roles del sistema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Driver,
    TeamLeader,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Driver => "driver",
            UserRole::TeamLeader => "team_leader",
            UserRole::Admin => "admin",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "driver" => Some(UserRole::Driver),
            "team_leader" => Some(UserRole::TeamLeader),
            "admin" => Some(UserRole::Admin),
            _ => None,
        }
    }

    /// Chef d'équipe o admin
    pub fn is_team_leader_or_admin(&self) -> bool {
        matches!(self, UserRole::TeamLeader | UserRole::Admin)
    }
}

/// User - mapea exactamente a la tabla users
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub password_hash: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub is_approved: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn role(&self) -> Option<UserRole> {
        UserRole::from_str(&self.role)
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        for role in [UserRole::Driver, UserRole::TeamLeader, UserRole::Admin] {
            assert_eq!(UserRole::from_str(role.as_str()), Some(role));
        }
        assert_eq!(UserRole::from_str("super_admin"), None);
    }

    #[test]
    fn test_team_leader_or_admin() {
        assert!(UserRole::TeamLeader.is_team_leader_or_admin());
        assert!(UserRole::Admin.is_team_leader_or_admin());
        assert!(!UserRole::Driver.is_team_leader_or_admin());
    }
}
