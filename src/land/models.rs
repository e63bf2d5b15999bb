// src/land/models.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ============================================================================
// Land Plot
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LandRecord {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub soil_health: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct CreateLandRequest {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "crate::common::helpers::deserialize_lenient_f64")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "crate::common::helpers::deserialize_lenient_f64")]
    pub longitude: Option<f64>,
    pub soil_health: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateLandRequest {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "crate::common::helpers::deserialize_lenient_f64")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "crate::common::helpers::deserialize_lenient_f64")]
    pub longitude: Option<f64>,
    pub soil_health: Option<String>,
}

// ============================================================================
// Pro-tier land details (read-only)
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LandImage {
    pub id: String,
    pub land_id: String,
    pub image_url: String,
    pub caption: Option<String>,
    pub uploaded_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LandDocument {
    pub id: String,
    pub land_id: String,
    pub document_name: String,
    pub document_type: Option<String>,
    pub document_url: String,
    pub file_size: Option<i64>,
    pub uploaded_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CropTracking {
    pub id: String,
    pub land_id: String,
    pub crop_name: String,
    pub planting_date: Option<String>,
    pub expected_harvest_date: Option<String>,
    pub actual_harvest_date: Option<String>,
    pub yield_amount: Option<f64>,
    pub yield_unit: Option<String>,
    pub notes: Option<String>,
    pub created_at: String,
}
