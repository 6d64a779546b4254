//! Lab-report files read from disk

mod loader;

pub use loader::{FileLoadError, LocalFileLoader, load_file_handle, load_file_handles};
