//! Prediction outcome types

use serde::{Deserialize, Deserializer, Serialize};

/// A scored condition returned by the prediction backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionScore {
    pub disease: String,
    /// Percentage in `0..=100`
    pub probability: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Successful prediction payload
///
/// Every field is optional on the wire; missing or `null` lists decode as
/// empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PredictionReport {
    #[serde(default)]
    pub most_likely: Option<ConditionScore>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub possible: Vec<ConditionScore>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub recommendations: Vec<String>,
    #[serde(default)]
    pub explanation: Option<String>,
}

impl PredictionReport {
    /// Description of the most likely condition, with the backend's fallback text
    pub fn most_likely_description(&self) -> Option<&str> {
        self.most_likely.as_ref().map(|c| {
            c.description
                .as_deref()
                .filter(|d| !d.trim().is_empty())
                .unwrap_or("No description available.")
        })
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Why a submission failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PredictionFailure {
    /// The backend answered with an error; `detail` is its message if any
    RequestFailed { detail: Option<String> },
    /// No response at all (connection refused, timeout, ...)
    NetworkUnavailable,
}

impl PredictionFailure {
    pub fn request_failed(detail: impl Into<String>) -> Self {
        Self::RequestFailed {
            detail: Some(detail.into()),
        }
    }

    /// User-facing reason
    pub fn reason(&self) -> String {
        match self {
            Self::RequestFailed { detail: Some(d) } if !d.trim().is_empty() => d.clone(),
            Self::RequestFailed { .. } => "API request failed".to_string(),
            Self::NetworkUnavailable => {
                "Unable to connect to our AI service. Please try again.".to_string()
            }
        }
    }
}

impl std::fmt::Display for PredictionFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.reason())
    }
}

/// Terminal result of one submission, consumed once by the presenter
#[derive(Debug, Clone, PartialEq)]
pub enum PredictionOutcome {
    Success(PredictionReport),
    Failure(PredictionFailure),
}

impl PredictionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn report(&self) -> Option<&PredictionReport> {
        match self {
            Self::Success(report) => Some(report),
            Self::Failure(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&PredictionFailure> {
        match self {
            Self::Success(_) => None,
            Self::Failure(failure) => Some(failure),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_report_decodes() {
        let json = r#"{
            "most_likely": {"disease": "Influenza", "probability": 72.5, "description": "Viral infection"},
            "possible": [{"disease": "Common Cold", "probability": 15.0}],
            "recommendations": ["Rest", "Hydrate"],
            "explanation": "Fever and cough contributed most."
        }"#;
        let report: PredictionReport = serde_json::from_str(json).unwrap();
        assert_eq!(report.most_likely.as_ref().unwrap().disease, "Influenza");
        assert_eq!(report.possible.len(), 1);
        assert_eq!(report.possible[0].description, None);
        assert_eq!(report.recommendations, vec!["Rest", "Hydrate"]);
        assert!(report.explanation.is_some());
    }

    #[test]
    fn test_sparse_report_decodes() {
        let report: PredictionReport =
            serde_json::from_str(r#"{"possible": null, "recommendations": null}"#).unwrap();
        assert!(report.most_likely.is_none());
        assert!(report.possible.is_empty());
        assert!(report.recommendations.is_empty());
    }

    #[test]
    fn test_description_fallback() {
        let report = PredictionReport {
            most_likely: Some(ConditionScore {
                disease: "Migraine".to_string(),
                probability: 60.0,
                description: None,
            }),
            ..Default::default()
        };
        assert_eq!(
            report.most_likely_description(),
            Some("No description available.")
        );
    }

    #[test]
    fn test_failure_reason() {
        assert_eq!(
            PredictionFailure::request_failed("model error").reason(),
            "model error"
        );
        assert_eq!(
            PredictionFailure::RequestFailed { detail: None }.reason(),
            "API request failed"
        );
        assert!(
            PredictionFailure::NetworkUnavailable
                .reason()
                .contains("Unable to connect")
        );
    }
}
