//! Terminal output configuration from TOML (`[ui]` section)

use serde::{Deserialize, Serialize};

/// Raw UI configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileUiConfig {
    /// Enable colored terminal output
    pub color: bool,
    /// Seconds a prediction error stays visible
    pub error_dismiss_secs: u64,
    /// Show a spinner while a prediction is pending
    pub show_progress: bool,
    /// Path to REPL history file
    pub history_file: Option<String>,
}

impl Default for FileUiConfig {
    fn default() -> Self {
        Self {
            color: true,
            error_dismiss_secs: 5,
            show_progress: true,
            history_file: None,
        }
    }
}
