//! Symptom API port
//!
//! Defines the interface to the prediction backend.

use async_trait::async_trait;
use symptom_domain::{PredictionReport, PredictionRequest, StagedFile};
use thiserror::Error;

/// Errors that can occur while talking to the backend
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Timeout")]
    Timeout,

    /// Non-2xx status. `detail` is the server-supplied message, if any.
    #[error("HTTP error {status}{}", detail_suffix(.detail))]
    Http { status: u16, detail: Option<String> },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The request could not be built (bad URL, unserializable field)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// True when no response was received at all
    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::ConnectionError(_) | ApiError::Timeout)
    }
}

fn detail_suffix(detail: &Option<String>) -> String {
    match detail.as_deref().map(str::trim) {
        Some(d) if !d.is_empty() => format!(": {}", d),
        _ => String::new(),
    }
}

/// Reply from the lab-report endpoint.
///
/// The backend reports extraction problems in-band with an `error` field
/// rather than with an HTTP status, so both shapes are successful calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabReportReply {
    Summary(String),
    Error(String),
}

/// Gateway to the prediction backend
///
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait SymptomApi: Send + Sync {
    /// `GET /symptom_suggest?query=...`
    async fn suggest(&self, query: &str) -> Result<Vec<String>, ApiError>;

    /// `POST /predict` with the request serialized as multipart form data
    async fn predict(&self, request: &PredictionRequest) -> Result<PredictionReport, ApiError>;

    /// `POST /analyze_lab_report` with a single file
    async fn analyze_lab_report(&self, file: &StagedFile) -> Result<LabReportReply, ApiError>;
}
