use chrono::Utc;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::models::user::{User, UserRole};
use crate::utils::errors::AppError;

#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    pub async fn find_by_phone(&self, phone: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE phone = $1")
            .bind(phone)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    pub async fn phone_exists(&self, phone: &str) -> Result<bool, AppError> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM users WHERE phone = $1)")
                .bind(phone)
                .fetch_one(&self.pool)
                .await?;
        Ok(result.0)
    }

    /// Crear un chauffeur dentro de la transacción del llamador.
    /// Nace no aprobado; la alerta driver_pending se inserta en la misma tx.
    pub async fn create_driver_in_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        phone: &str,
        first_name: &str,
        last_name: &str,
    ) -> Result<User, AppError> {
        let driver = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, phone, first_name, last_name, role, is_approved, is_active, created_at, updated_at)
            VALUES ($1, $2, $3, $4, 'driver', false, true, $5, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(phone)
        .bind(first_name)
        .bind(last_name)
        .bind(Utc::now())
        .fetch_one(&mut **tx)
        .await?;

        Ok(driver)
    }

    /// Crear un chef d'équipe / admin con hash de mot de passe (bootstrap)
    pub async fn create_with_password(
        &self,
        email: &str,
        password_hash: &str,
        first_name: &str,
        last_name: &str,
        role: UserRole,
    ) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, email, password_hash, first_name, last_name, role, is_approved, is_active, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, true, true, $7, $7)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(email)
        .bind(password_hash)
        .bind(first_name)
        .bind(last_name)
        .bind(role.as_str())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    pub async fn find_all_drivers(&self) -> Result<Vec<User>, AppError> {
        let drivers = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE role = 'driver' ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(drivers)
    }

    pub async fn set_approved(&self, id: Uuid, approved: bool) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "UPDATE users SET is_approved = $2, updated_at = $3 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(approved)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    pub async fn set_active(&self, id: Uuid, active: bool) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "UPDATE users SET is_active = $2, updated_at = $3 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(active)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }
}
