//! Configuration file loading for symptom-checker
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `--config <path>` specified file
//! 2. Project root: `./symptom-checker.toml` or `./.symptom-checker.toml`
//! 3. XDG config: `$XDG_CONFIG_HOME/symptom-checker/config.toml`
//! 4. Environment: `SYMPTOM_CHECKER_API__BASE_URL` and friends
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, DEFAULT_BASE_URL, FileApiConfig, FileConfig, FileSearchConfig,
    FileUiConfig,
};
pub use loader::ConfigLoader;
