// src/ai/models.rs

use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize)]
pub struct InsightsRequest {
    #[serde(default, deserialize_with = "crate::common::helpers::deserialize_lenient_f64")]
    pub ph: Option<f64>,
    #[serde(default, deserialize_with = "crate::common::helpers::deserialize_lenient_f64")]
    pub moisture: Option<f64>,
    pub crop: Option<String>,
}

/// Fully-specified soil reading, produced from an `InsightsRequest`
#[derive(Debug, Clone, PartialEq)]
pub struct SoilReading {
    pub ph: f64,
    pub moisture: f64,
    pub crop: String,
}

impl InsightsRequest {
    /// `None` when any field is missing or the crop is blank
    pub fn into_reading(self) -> Option<SoilReading> {
        let crop = self.crop.filter(|c| !c.trim().is_empty())?;
        Some(SoilReading {
            ph: self.ph?,
            moisture: self.moisture?,
            crop,
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct InsightsResponse {
    pub result: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ChatRequest {
    pub message: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub reply: String,
}
