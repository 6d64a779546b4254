//! Autocomplete configuration from TOML (`[search]` section)

use serde::{Deserialize, Serialize};

/// Raw autocomplete configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSearchConfig {
    /// Quiet period before a suggestion query is sent (0 disables)
    pub debounce_ms: u64,
    /// Abort superseded suggestion requests instead of only ignoring them
    pub cancel_superseded: bool,
}

impl Default for FileSearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 150,
            cancel_superseded: true,
        }
    }
}
