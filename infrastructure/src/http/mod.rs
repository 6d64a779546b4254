//! HTTP adapter for the prediction backend
//!
//! Implements [`SymptomApi`](symptom_application::SymptomApi) with `reqwest`:
//!
//! | Endpoint | Method | Body |
//! |----------|--------|------|
//! | `/symptom_suggest?query=` | GET | - |
//! | `/predict` | POST | multipart: `symptoms`, demographics, `lab_reports` |
//! | `/analyze_lab_report` | POST | multipart: `file` |

mod client;
mod wire;

pub use client::HttpSymptomApi;
