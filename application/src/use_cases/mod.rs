//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod analyze_lab_report;
pub mod controller;
pub mod search_suggestions;
pub(crate) mod shared;
pub mod submit_prediction;

#[cfg(test)]
pub(crate) mod test_support;
