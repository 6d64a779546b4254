//! Backend configuration from TOML (`[api]` section)

use serde::{Deserialize, Serialize};

/// The original backend listens here unless told otherwise
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8001";

/// Raw backend configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileApiConfig {
    /// Base URL of the prediction backend
    pub base_url: String,
    /// Timeout in seconds for `symptom_suggest`
    pub suggest_timeout_secs: u64,
    /// Timeout in seconds for `predict` and `analyze_lab_report`
    pub predict_timeout_secs: u64,
}

impl Default for FileApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            suggest_timeout_secs: 5,
            predict_timeout_secs: 60,
        }
    }
}
