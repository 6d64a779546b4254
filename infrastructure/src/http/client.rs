//! reqwest adapter for the prediction backend

use super::wire::{LabReportResponse, SuggestResponse, error_detail, predict_text_fields};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use symptom_application::{ApiError, LabReportReply, SymptomApi};
use symptom_domain::{PredictionReport, PredictionRequest, StagedFile};
use tracing::debug;

/// [`SymptomApi`] over HTTP.
///
/// Per-call deadlines are enforced by the application layer, so the client
/// itself only bounds connection setup.
pub struct HttpSymptomApi {
    client: Client,
    base_url: String,
}

impl HttpSymptomApi {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let client = Client::builder()
            .connect_timeout(std::time::Duration::from_secs(10))
            .user_agent(concat!("symptom-checker/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
        Ok(Self::with_client(client, base_url))
    }

    /// Use an existing client (shared connection pool, custom TLS, ...)
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

fn transport_error(e: reqwest::Error) -> ApiError {
    if e.is_timeout() {
        ApiError::Timeout
    } else if e.is_builder() {
        ApiError::InvalidRequest(e.to_string())
    } else {
        ApiError::ConnectionError(e.to_string())
    }
}

/// Pass 2xx replies through; turn anything else into `ApiError::Http`
async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    debug!("Backend returned {}: {}", status, body);
    Err(ApiError::Http {
        status: status.as_u16(),
        detail: error_detail(&body),
    })
}

fn file_part(file: &StagedFile) -> Result<Part, ApiError> {
    Part::bytes(file.bytes().to_vec())
        .file_name(file.name().to_string())
        .mime_str(file.media_type().as_mime())
        .map_err(|e| ApiError::InvalidRequest(e.to_string()))
}

#[async_trait]
impl SymptomApi for HttpSymptomApi {
    async fn suggest(&self, query: &str) -> Result<Vec<String>, ApiError> {
        let response = self
            .client
            .get(self.endpoint("symptom_suggest"))
            .query(&[("query", query)])
            .send()
            .await
            .map_err(transport_error)?;
        let response = check_status(response).await?;

        let body: SuggestResponse = response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))?;
        Ok(body.suggestions)
    }

    async fn predict(&self, request: &PredictionRequest) -> Result<PredictionReport, ApiError> {
        let fields =
            predict_text_fields(request).map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
        let mut form = Form::new();
        for (name, value) in fields {
            form = form.text(name, value);
        }
        for file in request.lab_reports() {
            form = form.part("lab_reports", file_part(file)?);
        }

        let response = self
            .client
            .post(self.endpoint("predict"))
            .multipart(form)
            .send()
            .await
            .map_err(transport_error)?;
        let response = check_status(response).await?;

        response
            .json::<PredictionReport>()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }

    async fn analyze_lab_report(&self, file: &StagedFile) -> Result<LabReportReply, ApiError> {
        let form = Form::new().part("file", file_part(file)?);

        let response = self
            .client
            .post(self.endpoint("analyze_lab_report"))
            .multipart(form)
            .send()
            .await
            .map_err(transport_error)?;

        // Extraction problems come back in-band as `{ "error": ... }`,
        // so the body is read before the status is judged.
        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;
        let parsed: Option<LabReportResponse> = serde_json::from_str(&body).ok();

        match parsed {
            Some(LabReportResponse {
                error: Some(error), ..
            }) => Ok(LabReportReply::Error(error)),
            Some(LabReportResponse {
                summary: Some(summary),
                ..
            }) if status.is_success() => Ok(LabReportReply::Summary(summary)),
            _ if !status.is_success() => Err(ApiError::Http {
                status: status.as_u16(),
                detail: error_detail(&body),
            }),
            _ => Err(ApiError::InvalidResponse(
                "lab report reply has neither summary nor error".to_string(),
            )),
        }
    }
}
