//! Validation error types

use std::fmt;

use crate::error::AppError;

/// Validation error raised while turning a request payload into a domain value
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Field is missing or blank
    Missing { field: &'static str },

    /// Field is present but cannot be parsed
    InvalidFormat { field: &'static str, reason: &'static str },

    /// Value is outside the closed set the field accepts
    InvalidVariant { field: &'static str, value: String },

    /// Numeric value is out of range
    OutOfRange { field: &'static str, min: i64 },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { field } => write!(f, "{} is required", field),
            Self::InvalidFormat { field, reason } => write!(f, "{}: {}", field, reason),
            Self::InvalidVariant { field, value } => {
                write!(f, "invalid {} value: '{}'", field, value)
            }
            Self::OutOfRange { field, min } => write!(f, "{} must be at least {}", field, min),
        }
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for AppError {
    fn from(e: ValidationError) -> Self {
        AppError::Validation(e.to_string())
    }
}
