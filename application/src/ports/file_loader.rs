//! Port for reading lab-report files chosen by the user.
//!
//! The REPL only knows paths; an adapter in the infrastructure layer turns
//! them into [`FileHandle`]s with a declared MIME type, ready for staging.

use async_trait::async_trait;
use symptom_domain::FileHandle;
use thiserror::Error;

/// A path could not be turned into a file handle
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct FileLoadFailure {
    pub message: String,
}

impl FileLoadFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[async_trait]
pub trait FileLoaderPort: Send + Sync {
    /// Load every path in order; the first failure aborts the batch.
    async fn load_files(&self, paths: &[String]) -> Result<Vec<FileHandle>, FileLoadFailure>;
}
