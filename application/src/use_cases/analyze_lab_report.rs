//! Lab-report analysis use case
//!
//! Sends one staged file to `POST /analyze_lab_report`. Independent of the
//! prediction flow; both may be in flight at the same time.

use crate::ports::symptom_api::{ApiError, LabReportReply, SymptomApi};
use crate::use_cases::shared::within_timeout;
use std::sync::Arc;
use std::time::Duration;
use symptom_domain::StagedFile;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LabReportError {
    #[error("Please upload a file first")]
    NoFile,

    /// In-band `{ "error": ... }` reply, shown verbatim
    #[error("{0}")]
    Backend(String),

    #[error("Error analyzing lab report: {0}")]
    Api(#[from] ApiError),
}

pub struct AnalyzeLabReportUseCase<A: SymptomApi + 'static> {
    api: Arc<A>,
    timeout: Option<Duration>,
}

impl<A: SymptomApi + 'static> AnalyzeLabReportUseCase<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self { api, timeout: None }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Analyze `file`, returning the backend's summary text.
    pub async fn execute(&self, file: Option<&StagedFile>) -> Result<String, LabReportError> {
        let file = file.ok_or(LabReportError::NoFile)?;
        info!("Analyzing lab report {} ({} bytes)", file.name(), file.size());

        match within_timeout(self.timeout, self.api.analyze_lab_report(file)).await {
            Ok(LabReportReply::Summary(summary)) => Ok(summary),
            Ok(LabReportReply::Error(message)) => {
                warn!("Lab report rejected by backend: {}", message);
                Err(LabReportError::Backend(message))
            }
            Err(e) => {
                warn!("Lab report analysis failed: {}", e);
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::MockApi;
    use symptom_domain::FileHandle;

    fn staged(name: &str) -> StagedFile {
        StagedFile::validate(FileHandle::new(name, "application/pdf", vec![1u8, 2, 3])).unwrap()
    }

    #[tokio::test]
    async fn test_no_file_skips_network() {
        let api = Arc::new(MockApi::new());
        let use_case = AnalyzeLabReportUseCase::new(api.clone());

        let err = use_case.execute(None).await.unwrap_err();
        assert_eq!(err, LabReportError::NoFile);
        assert_eq!(err.to_string(), "Please upload a file first");
        assert!(api.lab_calls().is_empty());
    }

    #[tokio::test]
    async fn test_summary_returned() {
        let api = Arc::new(MockApi::new());
        let use_case = AnalyzeLabReportUseCase::new(api.clone());
        let file = staged("blood.pdf");

        let summary = use_case.execute(Some(&file)).await.unwrap();
        assert_eq!(summary, "Hemoglobin: 13.5 g/dL");
        assert_eq!(api.lab_calls(), vec!["blood.pdf"]);
    }

    #[tokio::test]
    async fn test_backend_error_passed_through() {
        let api = Arc::new(MockApi::new());
        api.set_lab_reply(Ok(LabReportReply::Error(
            "Could not extract text from file".to_string(),
        )));
        let use_case = AnalyzeLabReportUseCase::new(api);

        let err = use_case.execute(Some(&staged("scan.pdf"))).await.unwrap_err();
        assert_eq!(err.to_string(), "Could not extract text from file");
    }

    #[tokio::test]
    async fn test_transport_error() {
        let api = Arc::new(MockApi::new());
        api.set_lab_reply(Err(ApiError::ConnectionError("refused".to_string())));
        let use_case = AnalyzeLabReportUseCase::new(api);

        let err = use_case.execute(Some(&staged("scan.pdf"))).await.unwrap_err();
        assert!(matches!(err, LabReportError::Api(ApiError::ConnectionError(_))));
    }

    #[tokio::test]
    async fn test_http_error_shows_server_detail() {
        let api = Arc::new(MockApi::new());
        api.set_lab_reply(Err(ApiError::Http {
            status: 500,
            detail: Some("OCR service down".to_string()),
        }));
        let use_case = AnalyzeLabReportUseCase::new(api);

        let err = use_case.execute(Some(&staged("scan.pdf"))).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Error analyzing lab report: HTTP error 500: OCR service down"
        );
    }

    #[tokio::test]
    async fn test_http_error_without_detail() {
        let api = Arc::new(MockApi::new());
        api.set_lab_reply(Err(ApiError::Http {
            status: 502,
            detail: None,
        }));
        let use_case = AnalyzeLabReportUseCase::new(api);

        let err = use_case.execute(Some(&staged("scan.pdf"))).await.unwrap_err();
        assert_eq!(err.to_string(), "Error analyzing lab report: HTTP error 502");
    }
}
