//! Error types for the domain layer.

use thiserror::Error;

use crate::domain::llm::UnsupportedProviderError;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    Required { field: &'static str },

    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        min: f32,
        max: f32,
    },

    #[error("{field} must be greater than {min}")]
    TooSmall { field: &'static str, min: i64 },

    #[error(transparent)]
    UnsupportedProvider(#[from] UnsupportedProviderError),
}

impl ValidationError {
    /// Creates a missing required field error.
    pub fn required(field: &'static str) -> Self {
        ValidationError::Required { field }
    }

    /// Creates an out of range validation error.
    pub fn out_of_range(field: &'static str, min: f32, max: f32) -> Self {
        ValidationError::OutOfRange { field, min, max }
    }

    /// Creates a lower-bound validation error.
    pub fn too_small(field: &'static str, min: i64) -> Self {
        ValidationError::TooSmall { field, min }
    }
}
