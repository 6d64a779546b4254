//! Symptom subdomain
//!
//! - [`value_objects::Symptom`]: a single case-sensitive symptom label
//! - [`entities::SymptomSet`]: the ordered, duplicate-free selection

pub mod entities;
pub mod value_objects;
