//! Infrastructure layer for symptom-checker
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, plus configuration file loading and
//! lab-report file loading from disk.

pub mod config;
pub mod files;
pub mod http;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, DEFAULT_BASE_URL, FileApiConfig, FileConfig,
    FileSearchConfig, FileUiConfig,
};
pub use files::{FileLoadError, LocalFileLoader, load_file_handle, load_file_handles};
pub use http::HttpSymptomApi;
