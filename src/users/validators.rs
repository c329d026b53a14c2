// src/users/validators.rs

use super::models::{CreateUserRequest, NewUser};
use crate::common::validation::{is_valid_email, trim_input};
use crate::common::{ApiError, ValidationResult, Validator};

pub const NAME_REQUIRED: &str = "Name is required and must be a non-empty string";
pub const EMAIL_REQUIRED: &str = "A valid email address is required";

pub struct CreateUserValidator;

impl Validator<CreateUserRequest> for CreateUserValidator {
    fn validate(&self, data: &CreateUserRequest) -> ValidationResult {
        let mut result = ValidationResult::new();

        let name = data.name.as_deref().map(trim_input).unwrap_or_default();
        if name.is_empty() {
            result.add_error("name", NAME_REQUIRED);
        }

        let email = data.email.as_deref().map(trim_input).unwrap_or_default();
        if email.is_empty() || !is_valid_email(email) {
            result.add_error("email", EMAIL_REQUIRED);
        }

        result
    }
}

impl CreateUserValidator {
    /// Validates the request and returns the trimmed values to persist
    pub fn check(&self, data: &CreateUserRequest) -> Result<NewUser, ApiError> {
        self.validate(data).into_result()?;

        Ok(NewUser {
            name: trim_input(data.name.as_deref().unwrap_or_default()).to_string(),
            email: trim_input(data.email.as_deref().unwrap_or_default()).to_string(),
        })
    }
}
