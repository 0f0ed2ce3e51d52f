//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum. El almacén de sesiones vive aquí, nunca
//! como singleton de proceso, para que los tests usen instancias aisladas.

use std::collections::HashMap;
use std::sync::Arc;

use sqlx::PgPool;
use tokio::sync::RwLock;

use crate::config::environment::EnvironmentConfig;
use crate::models::session::Session;

/// Almacén de sesiones token → Session, seguro para acceso concurrente.
///
/// Ciclo de vida: se crea en el sign-in, se borra en el sign-out o cuando
/// la resolución detecta que el usuario ya no existe o está desactivado.
/// No hay expiración automática del lado servidor; el Max-Age de la cookie
/// solo limita la retención del cliente.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<String, Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, token: String, session: Session) {
        let mut sessions = self.inner.write().await;
        sessions.insert(token, session);
    }

    pub async fn get(&self, token: &str) -> Option<Session> {
        let sessions = self.inner.read().await;
        sessions.get(token).cloned()
    }

    /// Idempotente: borrar un token desconocido no es un error
    pub async fn remove(&self, token: &str) -> Option<Session> {
        let mut sessions = self.inner.write().await;
        sessions.remove(token)
    }

    pub async fn len(&self) -> usize {
        let sessions = self.inner.read().await;
        sessions.len()
    }
}

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: EnvironmentConfig,
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(pool: PgPool, config: EnvironmentConfig) -> Self {
        Self {
            pool,
            config,
            sessions: SessionStore::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::UserRole;
    use chrono::Utc;
    use uuid::Uuid;

    fn dummy_session() -> Session {
        Session {
            user_id: Uuid::new_v4(),
            email: None,
            phone: Some("+33600000000".to_string()),
            first_name: "Jean".to_string(),
            last_name: "Dupont".to_string(),
            role: UserRole::Driver,
            is_approved: true,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_insert_get_remove() {
        let store = SessionStore::new();
        store.insert("abc".to_string(), dummy_session()).await;
        assert_eq!(store.len().await, 1);
        assert!(store.get("abc").await.is_some());
        assert!(store.remove("abc").await.is_some());
        assert!(store.get("abc").await.is_none());
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn test_remove_unknown_token_is_noop() {
        let store = SessionStore::new();
        assert!(store.remove("inconnu").await.is_none());
    }
}
