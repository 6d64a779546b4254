//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Please select at least one symptom to continue")]
    EmptySymptoms,

    #[error("Invalid measurement: {0}")]
    InvalidMeasurement(String),
}

impl DomainError {
    /// Check if this error is the empty-symptom precondition
    pub fn is_empty_symptoms(&self) -> bool {
        matches!(self, DomainError::EmptySymptoms)
    }
}
