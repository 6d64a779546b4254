//! Port definitions for the application layer
//!
//! Ports are interfaces implemented by adapters in the infrastructure layer
//! (backend API, file loading) or consumed by the presentation layer (UI events).

pub mod file_loader;
pub mod symptom_api;
pub mod ui_event;
