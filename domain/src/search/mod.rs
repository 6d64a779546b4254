//! Suggestion search concepts
//!
//! The sequence-number guard that keeps only the latest autocomplete
//! response lives here so that it can be tested without any I/O.

pub mod query;
