//! Presentation layer for symptom-checker
//!
//! This crate contains CLI definitions, output formatters,
//! progress indicators, and the interactive session.

pub mod cli;
pub mod output;
pub mod progress;
pub mod repl;

// Re-export commonly used types
pub use cli::commands::Cli;
pub use output::console::ConsoleFormatter;
pub use progress::spinner::SubmissionSpinner;
pub use repl::{presenter::ReplPresenter, session::SymptomRepl};
