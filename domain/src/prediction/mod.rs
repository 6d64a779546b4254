//! Prediction subdomain
//!
//! Everything that goes into a prediction request and everything that
//! comes back out of one:
//!
//! - [`demographics::Demographics`]: optional age/gender/weight/height
//! - [`bmi::Bmi`]: body-mass index computed from weight and height
//! - [`request::PredictionRequest`]: immutable per-attempt snapshot
//! - [`outcome::PredictionOutcome`]: success report or failure reason
//! - [`phase::SubmissionPhase`]: the single-flight submission state

pub mod bmi;
pub mod demographics;
pub mod outcome;
pub mod phase;
pub mod request;
