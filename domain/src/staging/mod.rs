//! Lab-report file staging
//!
//! Files are validated eagerly when selected and held until submission.
//!
//! - [`media_type::MediaType`]: the accepted lab-report formats
//! - [`entities::FileStaging`]: the all-or-nothing staged list
//! - [`error::StagingError`]: validation failures

pub mod entities;
pub mod error;
pub mod media_type;
