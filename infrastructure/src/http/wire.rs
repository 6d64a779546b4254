//! Backend wire types
//!
//! JSON bodies exchanged with the prediction backend, plus the text fields
//! of the `predict` multipart form.

use serde::Deserialize;
use symptom_domain::PredictionRequest;

/// `GET /symptom_suggest` reply
#[derive(Debug, Deserialize)]
pub(crate) struct SuggestResponse {
    #[serde(default)]
    pub suggestions: Vec<String>,
}

/// Error body of a non-2xx reply.
///
/// `detail` is usually a string, but request validation failures carry a
/// list of objects instead.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub detail: Option<serde_json::Value>,
}

impl ErrorBody {
    pub fn message(&self) -> Option<String> {
        match self.detail.as_ref()? {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Null => None,
            other => Some(other.to_string()),
        }
    }
}

/// Extract the server-supplied `detail`, if the body carries one
pub(crate) fn error_detail(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message())
}

/// `POST /analyze_lab_report` reply
#[derive(Debug, Default, Deserialize)]
pub(crate) struct LabReportResponse {
    pub summary: Option<String>,
    pub error: Option<String>,
}

/// Text fields of the `predict` form, in wire order.
///
/// `symptoms` is always first and is a JSON array of labels; demographic
/// fields follow only when they hold a value.
pub(crate) fn predict_text_fields(
    request: &PredictionRequest,
) -> Result<Vec<(&'static str, String)>, serde_json::Error> {
    let mut fields = vec![("symptoms", serde_json::to_string(&request.symptom_labels())?)];
    fields.extend(
        request
            .demographics()
            .present_fields()
            .into_iter()
            .map(|(field, value)| (field.as_str(), value.to_string())),
    );
    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use symptom_domain::{DemographicField, Demographics, FileStaging, SymptomSet};

    fn request(labels: &[&str], demographics: Demographics) -> PredictionRequest {
        let mut symptoms = SymptomSet::new();
        for label in labels {
            symptoms.add(*label);
        }
        PredictionRequest::snapshot(&symptoms, &demographics, &FileStaging::new()).unwrap()
    }

    #[test]
    fn test_symptoms_serialized_as_json_array() {
        let fields = predict_text_fields(&request(&["fever", "sore \"throat\""], Demographics::new()))
            .unwrap();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].0, "symptoms");
        assert_eq!(fields[0].1, r#"["fever","sore \"throat\""]"#);
    }

    #[test]
    fn test_blank_demographics_omitted() {
        let mut demographics = Demographics::new()
            .with(DemographicField::Age, "34")
            .with(DemographicField::Height, "170");
        demographics.set(DemographicField::Weight, "   ");

        let fields = predict_text_fields(&request(&["cough"], demographics)).unwrap();
        let names: Vec<_> = fields.iter().map(|(name, _)| *name).collect();
        assert_eq!(names, vec!["symptoms", "age", "height"]);
        assert_eq!(fields[1].1, "34");
    }

    #[test]
    fn test_error_detail_shapes() {
        assert_eq!(
            error_detail(r#"{"detail":"model error"}"#),
            Some("model error".to_string())
        );
        assert_eq!(error_detail(r#"{"detail":null}"#), None);
        assert_eq!(error_detail("Internal Server Error"), None);
        assert!(
            error_detail(r#"{"detail":[{"loc":["body","symptoms"],"msg":"field required"}]}"#)
                .unwrap()
                .contains("field required")
        );
    }

    #[test]
    fn test_lab_report_response_shapes() {
        let ok: LabReportResponse =
            serde_json::from_str(r#"{"findings":[],"summary":"Extracted results:\n","raw":""}"#)
                .unwrap();
        assert_eq!(ok.summary.as_deref(), Some("Extracted results:\n"));
        assert!(ok.error.is_none());

        let err: LabReportResponse =
            serde_json::from_str(r#"{"error":"Unsupported file type"}"#).unwrap();
        assert_eq!(err.error.as_deref(), Some("Unsupported file type"));
    }
}
