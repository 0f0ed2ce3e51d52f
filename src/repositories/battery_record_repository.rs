use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::battery_record::BatteryRecord;
use crate::utils::errors::AppError;

#[derive(Clone)]
pub struct BatteryRecordRepository {
    pool: PgPool,
}

impl BatteryRecordRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        shift_id: Uuid,
        record_type: &str,
        count: i32,
        photo_url: &str,
        comment: &str,
        driver_signature: &str,
    ) -> Result<BatteryRecord, AppError> {
        let record = sqlx::query_as::<_, BatteryRecord>(
            r#"
            INSERT INTO battery_records (id, shift_id, type, count, photo_url, comment, driver_signature, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(shift_id)
        .bind(record_type)
        .bind(count)
        .bind(photo_url)
        .bind(comment)
        .bind(driver_signature)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<BatteryRecord>, AppError> {
        let record =
            sqlx::query_as::<_, BatteryRecord>("SELECT * FROM battery_records WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(record)
    }

    pub async fn find_by_shift(&self, shift_id: Uuid) -> Result<Vec<BatteryRecord>, AppError> {
        let records = sqlx::query_as::<_, BatteryRecord>(
            "SELECT * FROM battery_records WHERE shift_id = $1 ORDER BY created_at",
        )
        .bind(shift_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(records)
    }

    pub async fn exists_for_shift(
        &self,
        shift_id: Uuid,
        record_type: &str,
    ) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM battery_records WHERE shift_id = $1 AND type = $2)",
        )
        .bind(shift_id)
        .bind(record_type)
        .fetch_one(&self.pool)
        .await?;
        Ok(result.0)
    }

    /// Contrefirma del chef d'équipe. Sobrescribe una firma anterior: la
    /// firma es consultiva, no un verrou.
    pub async fn sign(
        &self,
        id: Uuid,
        team_leader_signature: &str,
    ) -> Result<Option<BatteryRecord>, AppError> {
        let record = sqlx::query_as::<_, BatteryRecord>(
            "UPDATE battery_records SET team_leader_signature = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(team_leader_signature)
        .fetch_optional(&self.pool)
        .await?;
        Ok(record)
    }
}
