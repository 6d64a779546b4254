//! Staged file entities

use super::error::StagingError;
use super::media_type::MediaType;
use std::sync::Arc;

/// Upper bound on a single lab-report file (10 MiB)
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// A candidate file as selected by the user, before validation.
///
/// `mime_type` is whatever the selection source declared; it is not
/// checked until the file is staged.
#[derive(Clone)]
pub struct FileHandle {
    pub name: String,
    pub size: u64,
    pub mime_type: String,
    pub bytes: Arc<[u8]>,
}

impl FileHandle {
    /// Create a handle whose size is the length of `bytes`
    pub fn new(
        name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: impl Into<Arc<[u8]>>,
    ) -> Self {
        let bytes = bytes.into();
        Self {
            name: name.into(),
            size: bytes.len() as u64,
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Override the declared size (the source may report it separately)
    pub fn with_size(mut self, size: u64) -> Self {
        self.size = size;
        self
    }
}

impl std::fmt::Debug for FileHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileHandle")
            .field("name", &self.name)
            .field("size", &self.size)
            .field("mime_type", &self.mime_type)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

/// A validated lab-report file ready for submission
#[derive(Clone)]
pub struct StagedFile {
    name: String,
    size: u64,
    media_type: MediaType,
    bytes: Arc<[u8]>,
}

impl StagedFile {
    /// Validate a handle: size first, then media type.
    pub fn validate(handle: FileHandle) -> Result<Self, StagingError> {
        if handle.size > MAX_FILE_SIZE {
            return Err(StagingError::TooLarge {
                name: handle.name,
                size: handle.size,
            });
        }

        let media_type = MediaType::from_mime(&handle.mime_type).ok_or_else(|| {
            StagingError::UnsupportedType {
                name: handle.name.clone(),
                mime_type: handle.mime_type.clone(),
            }
        })?;

        Ok(Self {
            name: handle.name,
            size: handle.size,
            media_type,
            bytes: handle.bytes,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn media_type(&self) -> MediaType {
        self.media_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl std::fmt::Debug for StagedFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StagedFile")
            .field("name", &self.name)
            .field("size", &self.size)
            .field("media_type", &self.media_type)
            .finish()
    }
}

impl PartialEq for StagedFile {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.size == other.size
            && self.media_type == other.media_type
            && self.bytes == other.bytes
    }
}

/// The staged lab-report list.
///
/// Staging is all-or-nothing: [`stage`](Self::stage) replaces the whole list,
/// and a single invalid file leaves the list empty.
#[derive(Debug, Clone, Default)]
pub struct FileStaging {
    files: Vec<StagedFile>,
}

impl FileStaging {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the staged list with a freshly validated batch.
    ///
    /// Files are validated in selection order and the first failure aborts
    /// the batch. Prior staging is discarded in every case.
    pub fn stage(&mut self, batch: Vec<FileHandle>) -> Result<&[StagedFile], StagingError> {
        self.files.clear();

        let mut staged = Vec::with_capacity(batch.len());
        for handle in batch {
            staged.push(StagedFile::validate(handle)?);
        }

        self.files = staged;
        Ok(&self.files)
    }

    /// Remove every staged file with this name. Absent names are a no-op.
    pub fn unstage(&mut self, name: &str) -> &[StagedFile] {
        self.files.retain(|f| f.name() != name);
        &self.files
    }

    pub fn clear(&mut self) {
        self.files.clear();
    }

    pub fn files(&self) -> &[StagedFile] {
        &self.files
    }

    pub fn first(&self) -> Option<&StagedFile> {
        self.files.first()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn total_size(&self) -> u64 {
        self.files.iter().map(StagedFile::size).sum()
    }
}
