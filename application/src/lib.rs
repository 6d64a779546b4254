//! Application layer for symptom-checker
//!
//! This crate contains use cases, port definitions, and controller configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::ControllerConfig;
pub use ports::{
    file_loader::{FileLoadFailure, FileLoaderPort},
    symptom_api::{ApiError, LabReportReply, SymptomApi},
    ui_event::{PredictionErrorEvent, StatusSnapshot, UiEvent},
};
pub use use_cases::analyze_lab_report::{AnalyzeLabReportUseCase, LabReportError};
pub use use_cases::controller::{CommandAction, SymptomCheckController};
pub use use_cases::search_suggestions::{SearchError, SearchOutcome, SuggestionSearch};
pub use use_cases::submit_prediction::{
    CompletedSubmission, PendingSubmission, PredictionOrchestrator, SubmissionGuard, SubmitError,
};
