use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::shift::{Shift, SHIFT_ACTIVE, SHIFT_COMPLETED};
use crate::utils::errors::{conflict, AppError};

/// Índice único parcial que respalda el invariante "un shift activo por
/// chauffeur". El guard check-then-insert corre dentro de una transacción
/// con FOR UPDATE; el índice cubre la carrera entre transacciones.
const ONE_ACTIVE_PER_DRIVER: &str = "shifts_one_active_per_driver";

#[derive(Clone)]
pub struct ShiftRepository {
    pool: PgPool,
}

impl ShiftRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Abrir un shift para el chauffeur, de forma atómica respecto a
    /// starts concurrentes del mismo chauffeur.
    pub async fn create_active(
        &self,
        driver_id: Uuid,
        vehicle_id: Option<Uuid>,
    ) -> Result<Shift, AppError> {
        let mut tx = self.pool.begin().await?;

        let existing: Option<(Uuid,)> = sqlx::query_as(
            "SELECT id FROM shifts WHERE driver_id = $1 AND status = 'active' FOR UPDATE",
        )
        .bind(driver_id)
        .fetch_optional(&mut *tx)
        .await?;

        if let Some((shift_id,)) = existing {
            tracing::warn!(%driver_id, %shift_id, "Driver already has an active shift");
            return Err(conflict(
                "ACTIVE_SHIFT_EXISTS",
                "Un shift est déjà actif pour ce chauffeur",
            ));
        }

        let shift = sqlx::query_as::<_, Shift>(
            r#"
            INSERT INTO shifts (id, driver_id, vehicle_id, start_time, status, created_at)
            VALUES ($1, $2, $3, $4, 'active', $4)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(driver_id)
        .bind(vehicle_id)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.constraint() == Some(ONE_ACTIVE_PER_DRIVER) => {
                conflict(
                    "ACTIVE_SHIFT_EXISTS",
                    "Un shift est déjà actif pour ce chauffeur",
                )
            }
            _ => AppError::from(e),
        })?;

        tx.commit().await?;
        Ok(shift)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Shift>, AppError> {
        let shift = sqlx::query_as::<_, Shift>("SELECT * FROM shifts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(shift)
    }

    pub async fn find_active_by_driver(&self, driver_id: Uuid) -> Result<Option<Shift>, AppError> {
        let shift = sqlx::query_as::<_, Shift>(
            "SELECT * FROM shifts WHERE driver_id = $1 AND status = 'active'",
        )
        .bind(driver_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(shift)
    }

    pub async fn find_all_active(&self) -> Result<Vec<Shift>, AppError> {
        let shifts = sqlx::query_as::<_, Shift>("SELECT * FROM shifts WHERE status = 'active'")
            .fetch_all(&self.pool)
            .await?;
        Ok(shifts)
    }

    pub async fn find_by_driver(&self, driver_id: Uuid) -> Result<Vec<Shift>, AppError> {
        let shifts = sqlx::query_as::<_, Shift>(
            "SELECT * FROM shifts WHERE driver_id = $1 ORDER BY start_time DESC",
        )
        .bind(driver_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(shifts)
    }

    pub async fn find_all(&self) -> Result<Vec<Shift>, AppError> {
        let shifts = sqlx::query_as::<_, Shift>("SELECT * FROM shifts ORDER BY start_time DESC")
            .fetch_all(&self.pool)
            .await?;
        Ok(shifts)
    }

    /// Cerrar el shift. Los guards (owner, estado, conformité) ya pasaron
    /// en el controller; el predicado de estado cubre dos cierres
    /// concurrentes: solo uno gana, el otro recibe SHIFT_NOT_ACTIVE.
    pub async fn complete(&self, id: Uuid) -> Result<Shift, AppError> {
        let shift = sqlx::query_as::<_, Shift>(
            r#"
            UPDATE shifts
            SET status = $2, end_time = $3
            WHERE id = $1 AND status = $4
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(SHIFT_COMPLETED)
        .bind(Utc::now())
        .bind(SHIFT_ACTIVE)
        .fetch_optional(&self.pool)
        .await?;

        shift.ok_or_else(|| {
            tracing::warn!(%id, "Shift already closed by a concurrent request");
            conflict("SHIFT_NOT_ACTIVE", "Ce shift n'est plus actif")
        })
    }
}
