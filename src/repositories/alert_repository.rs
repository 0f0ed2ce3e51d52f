use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::models::alert::{Alert, AlertType};
use crate::utils::errors::AppError;

/// Insertar una alerta dentro de la transacción de su mutación
/// disparadora. Función libre: el generador de alertas no necesita pool.
pub async fn insert_in_tx(
    tx: &mut Transaction<'_, Postgres>,
    alert_type: AlertType,
    title: String,
    message: String,
    payload: serde_json::Value,
) -> Result<Alert, AppError> {
    let alert = sqlx::query_as::<_, Alert>(
        r#"
        INSERT INTO alerts (id, type, title, message, payload, created_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(alert_type.as_str())
    .bind(title)
    .bind(message)
    .bind(payload)
    .bind(Utc::now())
    .fetch_one(&mut **tx)
    .await?;

    Ok(alert)
}

#[derive(Clone)]
pub struct AlertRepository {
    pool: PgPool,
}

impl AlertRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_filtered(
        &self,
        alert_type: Option<&str>,
        start_date: Option<DateTime<Utc>>,
    ) -> Result<Vec<Alert>, AppError> {
        let alerts = sqlx::query_as::<_, Alert>(
            r#"
            SELECT * FROM alerts
            WHERE ($1::text IS NULL OR type = $1)
              AND ($2::timestamptz IS NULL OR created_at >= $2)
            ORDER BY created_at DESC
            "#,
        )
        .bind(alert_type)
        .bind(start_date)
        .fetch_all(&self.pool)
        .await?;
        Ok(alerts)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Alert>, AppError> {
        let alert = sqlx::query_as::<_, Alert>("SELECT * FROM alerts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(alert)
    }

    /// Marcar como leída si aún no lo está. Monótono: read_at solo pasa
    /// de null a timestamp. None cuando la alerta ya estaba leída o no
    /// existe; el controller distingue ambos casos con un fetch.
    pub async fn mark_read_if_unread(&self, id: Uuid) -> Result<Option<Alert>, AppError> {
        let updated = sqlx::query_as::<_, Alert>(
            r#"
            UPDATE alerts
            SET read_at = $2
            WHERE id = $1 AND read_at IS NULL
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;
        Ok(updated)
    }
}
