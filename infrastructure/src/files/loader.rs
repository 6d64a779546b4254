//! Build [`FileHandle`]s from paths, the way a browser file picker would:
//! the declared MIME type is guessed from the extension, never sniffed.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use symptom_application::{FileLoadFailure, FileLoaderPort};
use symptom_domain::{FileHandle, MAX_FILE_SIZE};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum FileLoadError {
    #[error("Cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0} is not a regular file")]
    NotAFile(PathBuf),
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> FileLoadError + '_ {
    move |source| FileLoadError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Load one file.
///
/// Files above the staging limit are not read; the handle carries only the
/// declared size so that staging can reject it.
pub async fn load_file_handle(path: impl AsRef<Path>) -> Result<FileHandle, FileLoadError> {
    let path = path.as_ref();
    let metadata = tokio::fs::metadata(path).await.map_err(io_error(path))?;
    if !metadata.is_file() {
        return Err(FileLoadError::NotAFile(path.to_path_buf()));
    }

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let mime_type = mime_guess::from_path(path)
        .first_or_octet_stream()
        .to_string();

    if metadata.len() > MAX_FILE_SIZE {
        debug!("Not reading {} ({} bytes, over limit)", name, metadata.len());
        return Ok(FileHandle::new(name, mime_type, Vec::<u8>::new()).with_size(metadata.len()));
    }

    let bytes = tokio::fs::read(path).await.map_err(io_error(path))?;
    Ok(FileHandle::new(name, mime_type, bytes))
}

/// Load a batch in order, failing on the first unreadable path
pub async fn load_file_handles<P: AsRef<Path>>(
    paths: &[P],
) -> Result<Vec<FileHandle>, FileLoadError> {
    let mut handles = Vec::with_capacity(paths.len());
    for path in paths {
        handles.push(load_file_handle(path).await?);
    }
    Ok(handles)
}

/// [`FileLoaderPort`] backed by the local filesystem
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFileLoader;

impl LocalFileLoader {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl FileLoaderPort for LocalFileLoader {
    async fn load_files(&self, paths: &[String]) -> Result<Vec<FileHandle>, FileLoadFailure> {
        load_file_handles(paths)
            .await
            .map_err(|e| FileLoadFailure::new(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use symptom_domain::{StagedFile, StagingError};

    #[tokio::test]
    async fn test_mime_guessed_from_extension() {
        let dir = tempfile::tempdir().unwrap();
        let pdf = dir.path().join("CBC Panel.PDF");
        let png = dir.path().join("xray.png");
        let txt = dir.path().join("notes.txt");
        std::fs::write(&pdf, b"%PDF-1.4").unwrap();
        std::fs::write(&png, b"\x89PNG").unwrap();
        std::fs::write(&txt, b"hello").unwrap();

        let handles = load_file_handles(&[&pdf, &png, &txt]).await.unwrap();

        assert_eq!(handles[0].name, "CBC Panel.PDF");
        assert_eq!(handles[0].mime_type, "application/pdf");
        assert_eq!(handles[0].size, 8);
        assert_eq!(handles[1].mime_type, "image/png");
        assert_eq!(handles[2].mime_type, "text/plain");
    }

    #[tokio::test]
    async fn test_unsupported_type_rejected_by_staging() {
        let dir = tempfile::tempdir().unwrap();
        let txt = dir.path().join("notes.txt");
        std::fs::write(&txt, b"hello").unwrap();

        let handle = load_file_handle(&txt).await.unwrap();
        let err = StagedFile::validate(handle).unwrap_err();
        assert!(matches!(err, StagingError::UnsupportedType { .. }));
    }

    #[tokio::test]
    async fn test_oversized_file_not_read() {
        let dir = tempfile::tempdir().unwrap();
        let big = dir.path().join("scan.pdf");
        let file = std::fs::File::create(&big).unwrap();
        file.set_len(MAX_FILE_SIZE + 1).unwrap();

        let handle = load_file_handle(&big).await.unwrap();
        assert_eq!(handle.size, MAX_FILE_SIZE + 1);
        assert!(handle.bytes.is_empty());
        assert!(matches!(
            StagedFile::validate(handle),
            Err(StagingError::TooLarge { .. })
        ));
    }

    #[tokio::test]
    async fn test_missing_file() {
        let err = load_file_handle("/nonexistent/report.pdf").await.unwrap_err();
        assert!(matches!(err, FileLoadError::Io { .. }));
    }

    #[tokio::test]
    async fn test_directory_is_not_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_file_handle(dir.path()).await.unwrap_err();
        assert!(matches!(err, FileLoadError::NotAFile(_)));
    }

    #[tokio::test]
    async fn test_local_loader_reports_path() {
        let err = LocalFileLoader::new()
            .load_files(&["/nonexistent/blood.pdf".to_string()])
            .await
            .unwrap_err();
        assert!(err.message.contains("/nonexistent/blood.pdf"));
    }
}
