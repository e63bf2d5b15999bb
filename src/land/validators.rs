// src/land/validators.rs

use super::models::{CreateLandRequest, UpdateLandRequest};
use crate::common::{ValidationResult, Validator};

const MAX_NAME_LEN: usize = 255;

pub struct CreateLandValidator;

impl Validator<CreateLandRequest> for CreateLandValidator {
    fn validate(&self, data: &CreateLandRequest) -> ValidationResult {
        let mut result = ValidationResult::new();

        match data.name.as_deref().map(str::trim) {
            None | Some("") => result.add_error("name", "Land name is required"),
            Some(name) if name.len() > MAX_NAME_LEN => {
                result.add_error("name", "Land name must be less than 255 characters")
            }
            Some(_) => {}
        }

        result.check_range("latitude", data.latitude, -90.0, 90.0);
        result.check_range("longitude", data.longitude, -180.0, 180.0);

        result
    }
}

pub struct UpdateLandValidator;

impl Validator<UpdateLandRequest> for UpdateLandValidator {
    fn validate(&self, data: &UpdateLandRequest) -> ValidationResult {
        let mut result = ValidationResult::new();

        if let Some(name) = &data.name {
            if name.trim().is_empty() {
                result.add_error("name", "Land name cannot be empty");
            } else if name.len() > MAX_NAME_LEN {
                result.add_error("name", "Land name must be less than 255 characters");
            }
        }

        result.check_range("latitude", data.latitude, -90.0, 90.0);
        result.check_range("longitude", data.longitude, -180.0, 180.0);

        result
    }
}
