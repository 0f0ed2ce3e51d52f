use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::location::LocationUpdate;
use crate::utils::errors::AppError;

#[derive(Clone)]
pub struct LocationRepository {
    pool: PgPool,
}

impl LocationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        shift_id: Uuid,
        driver_id: Uuid,
        latitude: f64,
        longitude: f64,
        accuracy: Option<f64>,
        recorded_at: DateTime<Utc>,
    ) -> Result<LocationUpdate, AppError> {
        let update = sqlx::query_as::<_, LocationUpdate>(
            r#"
            INSERT INTO location_updates (id, shift_id, driver_id, latitude, longitude, accuracy, recorded_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(shift_id)
        .bind(driver_id)
        .bind(latitude)
        .bind(longitude)
        .bind(accuracy)
        .bind(recorded_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(update)
    }

    /// Última posición conocida para un turno.
    pub async fn latest_for_shift(&self, shift_id: Uuid) -> Result<Option<LocationUpdate>, AppError> {
        let update = sqlx::query_as::<_, LocationUpdate>(
            "SELECT * FROM location_updates WHERE shift_id = $1 ORDER BY recorded_at DESC LIMIT 1",
        )
        .bind(shift_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(update)
    }

    /// Última posición conocida para un conductor, sin importar el turno.
    pub async fn latest_for_driver(&self, driver_id: Uuid) -> Result<Option<LocationUpdate>, AppError> {
        let update = sqlx::query_as::<_, LocationUpdate>(
            "SELECT * FROM location_updates WHERE driver_id = $1 ORDER BY recorded_at DESC LIMIT 1",
        )
        .bind(driver_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(update)
    }
}
