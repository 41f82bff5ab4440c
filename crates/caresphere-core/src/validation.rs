//! Validation utilities.

use crate::{CareError, FieldError};
use validator::{Validate, ValidationErrors};

/// Extension trait for validation.
pub trait ValidateExt: Validate {
    /// Validates the struct and returns a `CareError` on failure.
    fn validate_request(&self) -> Result<(), CareError> {
        self.validate().map_err(validation_errors_to_care_error)
    }
}

impl<T: Validate> ValidateExt for T {}

/// Converts `validator::ValidationErrors` to `CareError`.
#[must_use]
pub fn validation_errors_to_care_error(errors: ValidationErrors) -> CareError {
    let field_errors: Vec<FieldError> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| FieldError {
                field: (*field).to_string(),
                message: error
                    .message
                    .as_ref()
                    .map_or_else(|| error.code.to_string(), |m| m.to_string()),
                code: error.code.to_string(),
            })
        })
        .collect();

    let message = field_errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ");

    CareError::Validation(message)
}

/// Common validation functions.
pub mod rules {
    use validator::ValidationError;

    /// Validates that a string is not blank (not empty after trimming).
    pub fn not_blank(value: &str) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::new("not_blank"));
        }
        Ok(())
    }

    /// Validates a phone number in loose E.164 form: optional `+`, then
    /// 7 to 15 digits.
    pub fn phone_number(value: &str) -> Result<(), ValidationError> {
        let digits = value.strip_prefix('+').unwrap_or(value);
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(ValidationError::new("phone_invalid_characters"));
        }
        if digits.len() < 7 || digits.len() > 15 {
            return Err(ValidationError::new("phone_invalid_length"));
        }
        Ok(())
    }
}
