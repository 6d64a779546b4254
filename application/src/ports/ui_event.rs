//! UI event types emitted by SymptomCheckController for presentation rendering
//!
//! These events form the output port from the application layer to the
//! presentation layer. The presenter re-renders chips, previews, dropdowns
//! and result panels from them; the controller never renders anything itself.

use std::time::Duration;
use symptom_domain::{
    Bmi, Demographics, PredictionReport, StagedFile, StagingError, SubmissionPhase, Symptom,
};

/// Events emitted by SymptomCheckController for the presentation layer to render
#[derive(Debug, Clone)]
pub enum UiEvent {
    // === Session ===
    /// Show help message
    Help,
    /// Snapshot of the whole session (`/status`)
    Status(Box<StatusSnapshot>),
    /// Everything was cleared (`/reset`)
    SessionReset,

    // === Symptoms ===
    /// The selected symptom set changed
    SymptomsChanged { symptoms: Vec<Symptom> },

    // === Suggestions ===
    /// New suggestions for the latest query
    SuggestionsUpdated {
        query: String,
        suggestions: Vec<String>,
    },
    /// The suggestion dropdown should be hidden
    SuggestionsCleared,

    // === Lab-report staging ===
    /// The staged file list changed
    StagedFilesChanged { files: Vec<StagedFile> },
    /// A selected batch failed validation and nothing was staged
    StagingRejected { error: StagingError },

    // === Demographics ===
    DemographicsChanged(Demographics),
    BmiResult(Bmi),
    BmiError { message: String },

    // === Prediction ===
    /// Submission refused because no symptom is selected
    EmptySymptoms,
    /// Submission refused because another one is still pending
    SubmissionRejected { reason: String },
    /// Request sent; the submit affordance is disabled until `SubmissionFinished`
    SubmissionStarted {
        symptom_count: usize,
        file_count: usize,
    },
    /// Prediction succeeded
    PredictionResult(Box<PredictionReport>),
    /// Prediction failed
    PredictionError(PredictionErrorEvent),
    /// Submission is over (always emitted, whatever the outcome)
    SubmissionFinished,

    // === Lab-report analysis ===
    LabReportStarted { file_name: String },
    LabReportResult { file_name: String, summary: String },
    LabReportError { error: String },

    // === Errors ===
    /// Command was recognized but its arguments were not
    CommandError { message: String },
    UnknownCommand { command: String },

    // === Lifecycle ===
    Exit,
}

/// Session state shown by `/status`
#[derive(Debug, Clone)]
pub struct StatusSnapshot {
    pub symptoms: Vec<Symptom>,
    pub files: Vec<StagedFile>,
    pub demographics: Demographics,
    pub phase: SubmissionPhase,
}

/// A dismissible prediction error
#[derive(Debug, Clone)]
pub struct PredictionErrorEvent {
    pub reason: String,
    /// The presenter hides the error after this long
    pub dismiss_after: Duration,
}
