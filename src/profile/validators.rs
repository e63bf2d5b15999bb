// src/profile/validators.rs

use super::models::UpdateProfileRequest;
use crate::common::{ValidationResult, Validator};

pub struct UpdateProfileValidator;

impl Validator<UpdateProfileRequest> for UpdateProfileValidator {
    fn validate(&self, data: &UpdateProfileRequest) -> ValidationResult {
        let mut result = ValidationResult::new();

        if let Some(full_name) = &data.full_name {
            if full_name.len() > 255 {
                result.add_error("full_name", "Full name must be less than 255 characters");
            }
        }

        if let Some(email) = &data.email {
            let email = email.trim();
            if email.is_empty() {
                result.add_error("email", "Email cannot be empty");
            } else if !is_plausible_email(email) {
                result.add_error("email", "Email must be a valid address");
            }
        }

        result
    }
}

fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
        }
        None => false,
    }
}
