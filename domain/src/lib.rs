//! Domain layer for symptom-checker
//!
//! This crate contains the entities and value objects behind a symptom-check
//! session. It has no dependencies on networking, configuration, or
//! presentation concerns.
//!
//! # Core Concepts
//!
//! ## Session state
//!
//! - **SymptomSet**: ordered, duplicate-free symptoms picked by the user
//! - **FileStaging**: lab-report files validated all-or-nothing on selection
//! - **Demographics**: optional age, gender, weight and height
//!
//! ## Requests and results
//!
//! - **SuggestionQuery**: autocomplete text tagged with a sequence number;
//!   only the latest issued query may update the visible suggestions
//! - **PredictionRequest**: immutable snapshot taken per submission
//! - **PredictionOutcome**: success report or failure reason

pub mod core;
pub mod prediction;
pub mod search;
pub mod staging;
pub mod symptom;
pub mod util;

// Re-export commonly used types
pub use self::core::error::DomainError;
pub use prediction::{
    bmi::{Bmi, BmiCategory},
    demographics::{DemographicField, Demographics},
    outcome::{ConditionScore, PredictionFailure, PredictionOutcome, PredictionReport},
    phase::SubmissionPhase,
    request::PredictionRequest,
};
pub use search::query::{MIN_QUERY_CHARS, QuerySequencer, SuggestionQuery, normalize_query};
pub use staging::{
    entities::{FileHandle, FileStaging, MAX_FILE_SIZE, StagedFile},
    error::StagingError,
    media_type::MediaType,
};
pub use symptom::{entities::SymptomSet, value_objects::Symptom};
