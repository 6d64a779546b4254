//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into
//! [`ControllerConfig`] for the application layer.

mod api;
mod search;
mod ui;

pub use api::{DEFAULT_BASE_URL, FileApiConfig};
pub use search::FileSearchConfig;
pub use ui::FileUiConfig;

use serde::{Deserialize, Serialize};
use std::time::Duration;
use symptom_application::ControllerConfig;
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("{field} cannot be 0")]
    InvalidTimeout { field: &'static str },

    #[error("api.base_url cannot be empty")]
    EmptyBaseUrl,

    #[error("api.base_url must start with http:// or https:// (got '{0}')")]
    InvalidBaseUrl(String),
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Backend location and timeouts
    pub api: FileApiConfig,
    /// Autocomplete settings
    pub search: FileSearchConfig,
    /// Terminal output settings
    pub ui: FileUiConfig,
}

impl FileConfig {
    /// Validate the configuration, stopping at the first problem.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        let base_url = self.api.base_url.trim();
        if base_url.is_empty() {
            return Err(ConfigValidationError::EmptyBaseUrl);
        }
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigValidationError::InvalidBaseUrl(base_url.to_string()));
        }
        if self.api.suggest_timeout_secs == 0 {
            return Err(ConfigValidationError::InvalidTimeout {
                field: "api.suggest_timeout_secs",
            });
        }
        if self.api.predict_timeout_secs == 0 {
            return Err(ConfigValidationError::InvalidTimeout {
                field: "api.predict_timeout_secs",
            });
        }
        Ok(())
    }

    /// Runtime settings for the controller
    pub fn to_controller_config(&self) -> ControllerConfig {
        ControllerConfig::default()
            .with_suggest_timeout(Some(Duration::from_secs(self.api.suggest_timeout_secs)))
            .with_predict_timeout(Some(Duration::from_secs(self.api.predict_timeout_secs)))
            .with_debounce(Duration::from_millis(self.search.debounce_ms))
            .with_cancel_superseded(self.search.cancel_superseded)
            .with_error_dismiss_after(Duration::from_secs(self.ui.error_dismiss_secs))
    }
}
