use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::dto::inspection_dto::CreateInspectionRequest;
use crate::models::inspection::Inspection;
use crate::utils::errors::AppError;

/// Inspección fallida + identidad del chauffeur, para el rapport
#[derive(Debug, FromRow)]
pub struct FailedInspectionRow {
    pub id: Uuid,
    pub shift_id: Uuid,
    #[sqlx(rename = "type")]
    pub inspection_type: String,
    pub trousse_secours: bool,
    pub trousse_secours_photo: Option<String>,
    pub trousse_secours_comment: Option<String>,
    pub roue_secours: bool,
    pub roue_secours_photo: Option<String>,
    pub roue_secours_comment: Option<String>,
    pub extincteur: bool,
    pub extincteur_photo: Option<String>,
    pub extincteur_comment: Option<String>,
    pub booster_batterie: bool,
    pub booster_batterie_photo: Option<String>,
    pub booster_batterie_comment: Option<String>,
    pub completed_at: DateTime<Utc>,
    pub driver_id: Uuid,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Clone)]
pub struct InspectionRepository {
    pool: PgPool,
}

impl InspectionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insertar la inspección dentro de la transacción del llamador, para
    /// que la alerta inspection_failed comparta su destino.
    pub async fn insert_in_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        request: &CreateInspectionRequest,
    ) -> Result<Inspection, AppError> {
        let inspection = sqlx::query_as::<_, Inspection>(
            r#"
            INSERT INTO inspections (
                id, shift_id, type, video_url,
                trousse_secours, trousse_secours_photo, trousse_secours_comment,
                roue_secours, roue_secours_photo, roue_secours_comment,
                extincteur, extincteur_photo, extincteur_comment,
                booster_batterie, booster_batterie_photo, booster_batterie_comment,
                completed_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(request.shift_id)
        .bind(&request.inspection_type)
        .bind(&request.video_url)
        .bind(request.trousse_secours)
        .bind(&request.trousse_secours_photo)
        .bind(&request.trousse_secours_comment)
        .bind(request.roue_secours)
        .bind(&request.roue_secours_photo)
        .bind(&request.roue_secours_comment)
        .bind(request.extincteur)
        .bind(&request.extincteur_photo)
        .bind(&request.extincteur_comment)
        .bind(request.booster_batterie)
        .bind(&request.booster_batterie_photo)
        .bind(&request.booster_batterie_comment)
        .bind(Utc::now())
        .fetch_one(&mut **tx)
        .await?;

        Ok(inspection)
    }

    pub async fn find_by_shift(&self, shift_id: Uuid) -> Result<Vec<Inspection>, AppError> {
        let inspections = sqlx::query_as::<_, Inspection>(
            "SELECT * FROM inspections WHERE shift_id = $1 ORDER BY completed_at",
        )
        .bind(shift_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(inspections)
    }

    /// ¿Existe ya una inspección de este tipo para el shift?
    /// (una sola inspección por shift + tipo, inmutable)
    pub async fn exists_for_shift(
        &self,
        shift_id: Uuid,
        inspection_type: &str,
    ) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM inspections WHERE shift_id = $1 AND type = $2)",
        )
        .bind(shift_id)
        .bind(inspection_type)
        .fetch_one(&self.pool)
        .await?;
        Ok(result.0)
    }

    /// Última inspección del vehículo por completed_at, a través de todos
    /// sus shifts. Base del estado de sécurité del lookup QR.
    pub async fn latest_for_vehicle(
        &self,
        vehicle_id: Uuid,
    ) -> Result<Option<Inspection>, AppError> {
        let inspection = sqlx::query_as::<_, Inspection>(
            r#"
            SELECT i.* FROM inspections i
            JOIN shifts s ON s.id = i.shift_id
            WHERE s.vehicle_id = $1
            ORDER BY i.completed_at DESC
            LIMIT 1
            "#,
        )
        .bind(vehicle_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(inspection)
    }

    /// Inspecciones con al menos un équipement absent, con el chauffeur
    /// asociado, filtrables por fecha y chauffeur.
    pub async fn find_failed(
        &self,
        start_date: Option<DateTime<Utc>>,
        end_date: Option<DateTime<Utc>>,
        driver_id: Option<Uuid>,
    ) -> Result<Vec<FailedInspectionRow>, AppError> {
        let rows = sqlx::query_as::<_, FailedInspectionRow>(
            r#"
            SELECT i.id, i.shift_id, i.type,
                   i.trousse_secours, i.trousse_secours_photo, i.trousse_secours_comment,
                   i.roue_secours, i.roue_secours_photo, i.roue_secours_comment,
                   i.extincteur, i.extincteur_photo, i.extincteur_comment,
                   i.booster_batterie, i.booster_batterie_photo, i.booster_batterie_comment,
                   i.completed_at,
                   u.id AS driver_id, u.first_name, u.last_name
            FROM inspections i
            JOIN shifts s ON s.id = i.shift_id
            JOIN users u ON u.id = s.driver_id
            WHERE NOT (i.trousse_secours AND i.roue_secours AND i.extincteur AND i.booster_batterie)
              AND ($1::timestamptz IS NULL OR i.completed_at >= $1)
              AND ($2::timestamptz IS NULL OR i.completed_at <= $2)
              AND ($3::uuid IS NULL OR s.driver_id = $3)
            ORDER BY i.completed_at DESC
            "#,
        )
        .bind(start_date)
        .bind(end_date)
        .bind(driver_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
