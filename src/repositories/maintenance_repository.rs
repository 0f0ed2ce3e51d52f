use chrono::Utc;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::models::maintenance::MaintenanceLog;
use crate::utils::errors::AppError;

#[derive(Clone)]
pub struct MaintenanceRepository {
    pool: PgPool,
}

impl MaintenanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        vehicle_id: Uuid,
        description: &str,
        performed_by: Uuid,
        cost: Option<f64>,
        notes: Option<String>,
    ) -> Result<MaintenanceLog, AppError> {
        let log = sqlx::query_as::<_, MaintenanceLog>(
            r#"
            INSERT INTO maintenance_logs (id, vehicle_id, description, status, performed_by, performed_at, cost, notes)
            VALUES ($1, $2, $3, 'pending', $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(vehicle_id)
        .bind(description)
        .bind(performed_by)
        .bind(Utc::now())
        .bind(cost)
        .bind(notes)
        .fetch_one(&self.pool)
        .await?;

        Ok(log)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<MaintenanceLog>, AppError> {
        let log = sqlx::query_as::<_, MaintenanceLog>("SELECT * FROM maintenance_logs WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(log)
    }

    /// Transición de estado dentro de la transacción del llamador; la
    /// alerta repair_completed se escribe en la misma tx cuando el nuevo
    /// estado es "done".
    pub async fn update_status_in_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: Uuid,
        status: &str,
    ) -> Result<MaintenanceLog, AppError> {
        let log = sqlx::query_as::<_, MaintenanceLog>(
            "UPDATE maintenance_logs SET status = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_one(&mut **tx)
        .await?;
        Ok(log)
    }

    pub async fn find_by_vehicle(&self, vehicle_id: Uuid) -> Result<Vec<MaintenanceLog>, AppError> {
        let logs = sqlx::query_as::<_, MaintenanceLog>(
            "SELECT * FROM maintenance_logs WHERE vehicle_id = $1 ORDER BY performed_at DESC",
        )
        .bind(vehicle_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(logs)
    }

    pub async fn find_recent(&self) -> Result<Vec<MaintenanceLog>, AppError> {
        let logs = sqlx::query_as::<_, MaintenanceLog>(
            "SELECT * FROM maintenance_logs ORDER BY performed_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(logs)
    }
}
