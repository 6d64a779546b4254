//! Staging validation errors

use thiserror::Error;

/// Reasons a batch of files can be rejected.
///
/// Any error rejects the whole batch; nothing from it stays staged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StagingError {
    #[error("File size exceeds 10MB: {name} ({size} bytes)")]
    TooLarge { name: String, size: u64 },

    #[error("Unsupported file type: {name} ({mime_type})")]
    UnsupportedType { name: String, mime_type: String },
}

impl StagingError {
    /// Name of the file that failed validation
    pub fn file_name(&self) -> &str {
        match self {
            StagingError::TooLarge { name, .. } => name,
            StagingError::UnsupportedType { name, .. } => name,
        }
    }
}
