// src/land/services.rs
//! Row access for `land_data` and its Pro-tier detail tables

use sqlx::SqlitePool;
use tracing::{info, warn};

use super::models::{
    CreateLandRequest, CropTracking, LandDocument, LandImage, LandRecord, UpdateLandRequest,
};
use super::validators::{CreateLandValidator, UpdateLandValidator};
use crate::common::{generate_land_id, ApiError, Validator};

const LAND_COLUMNS: &str = "id, user_id, name, latitude, longitude, soil_health, created_at";

pub struct LandService {
    db: SqlitePool,
}

impl LandService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    // ============================================================================
    // Land CRUD Operations
    // ============================================================================

    /// Owner's plots, newest first
    pub async fn list(&self, owner_id: &str) -> Result<Vec<LandRecord>, ApiError> {
        let rows = sqlx::query_as::<_, LandRecord>(&format!(
            "SELECT {} FROM land_data WHERE user_id = ? ORDER BY created_at DESC, rowid DESC",
            LAND_COLUMNS
        ))
        .bind(owner_id)
        .fetch_all(&self.db)
        .await?;

        Ok(rows)
    }

    pub async fn create(
        &self,
        owner_id: &str,
        request: CreateLandRequest,
    ) -> Result<LandRecord, ApiError> {
        CreateLandValidator.validate(&request).into_result()?;

        let land_id = generate_land_id();
        let name = request.name.as_deref().map(str::trim).unwrap_or_default();

        sqlx::query(
            r#"
            INSERT INTO land_data (id, user_id, name, latitude, longitude, soil_health)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&land_id)
        .bind(owner_id)
        .bind(name)
        .bind(request.latitude)
        .bind(request.longitude)
        .bind(request.soil_health.as_deref())
        .execute(&self.db)
        .await?;

        info!(land_id = %land_id, user_id = %owner_id, "Land record created");

        self.get(&land_id)
            .await?
            .ok_or_else(|| ApiError::InternalServer("Land record vanished after insert".into()))
    }

    pub async fn get(&self, land_id: &str) -> Result<Option<LandRecord>, ApiError> {
        let row = sqlx::query_as::<_, LandRecord>(&format!(
            "SELECT {} FROM land_data WHERE id = ?",
            LAND_COLUMNS
        ))
        .bind(land_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(row)
    }

    /// Ownership check: `NotFound` when absent, `Forbidden` when owned by someone else
    pub async fn authorize(&self, land_id: &str, owner_id: &str) -> Result<(), ApiError> {
        let owner: Option<(String,)> = sqlx::query_as("SELECT user_id FROM land_data WHERE id = ?")
            .bind(land_id)
            .fetch_optional(&self.db)
            .await?;

        match owner {
            None => Err(ApiError::NotFound("Not found".into())),
            Some((user_id,)) if user_id != owner_id => {
                warn!(
                    land_id = %land_id,
                    user_id = %owner_id,
                    "Rejected access to land record owned by another user"
                );
                Err(ApiError::Forbidden("Forbidden".into()))
            }
            Some(_) => Ok(()),
        }
    }

    /// Apply the supplied fields after the ownership check
    pub async fn update(
        &self,
        land_id: &str,
        owner_id: &str,
        request: UpdateLandRequest,
    ) -> Result<LandRecord, ApiError> {
        self.authorize(land_id, owner_id).await?;
        UpdateLandValidator.validate(&request).into_result()?;

        sqlx::query(
            r#"
            UPDATE land_data SET
                name = COALESCE(?, name),
                latitude = COALESCE(?, latitude),
                longitude = COALESCE(?, longitude),
                soil_health = COALESCE(?, soil_health)
            WHERE id = ? AND user_id = ?
            "#,
        )
        .bind(request.name.as_deref().map(str::trim))
        .bind(request.latitude)
        .bind(request.longitude)
        .bind(request.soil_health.as_deref())
        .bind(land_id)
        .bind(owner_id)
        .execute(&self.db)
        .await?;

        info!(land_id = %land_id, user_id = %owner_id, "Land record updated");

        self.get(land_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Not found".into()))
    }

    pub async fn delete(&self, land_id: &str, owner_id: &str) -> Result<(), ApiError> {
        self.authorize(land_id, owner_id).await?;

        sqlx::query("DELETE FROM land_data WHERE id = ? AND user_id = ?")
            .bind(land_id)
            .bind(owner_id)
            .execute(&self.db)
            .await?;

        info!(land_id = %land_id, user_id = %owner_id, "Land record deleted");

        Ok(())
    }

    // ============================================================================
    // Pro-tier detail reads
    // ============================================================================

    pub async fn images(&self, land_id: &str) -> Result<Vec<LandImage>, ApiError> {
        let rows = sqlx::query_as::<_, LandImage>(
            r#"
            SELECT id, land_id, image_url, caption, uploaded_at
            FROM land_images
            WHERE land_id = ?
            ORDER BY uploaded_at DESC, rowid DESC
            "#,
        )
        .bind(land_id)
        .fetch_all(&self.db)
        .await?;

        Ok(rows)
    }

    pub async fn documents(&self, land_id: &str) -> Result<Vec<LandDocument>, ApiError> {
        let rows = sqlx::query_as::<_, LandDocument>(
            r#"
            SELECT id, land_id, document_name, document_type, document_url, file_size, uploaded_at
            FROM land_documents
            WHERE land_id = ?
            ORDER BY uploaded_at DESC, rowid DESC
            "#,
        )
        .bind(land_id)
        .fetch_all(&self.db)
        .await?;

        Ok(rows)
    }

    pub async fn crops(&self, land_id: &str) -> Result<Vec<CropTracking>, ApiError> {
        let rows = sqlx::query_as::<_, CropTracking>(
            r#"
            SELECT id, land_id, crop_name, planting_date, expected_harvest_date,
                   actual_harvest_date, yield_amount, yield_unit, notes, created_at
            FROM crop_tracking
            WHERE land_id = ?
            ORDER BY created_at DESC, rowid DESC
            "#,
        )
        .bind(land_id)
        .fetch_all(&self.db)
        .await?;

        Ok(rows)
    }
}
