//! REPL Presenter - Renders UiEvents to the terminal
//!
//! All println!/colored output for the interactive session is concentrated
//! here, separating display from session logic (which lives in
//! SymptomCheckController in the application layer).

use crate::ConsoleFormatter;
use crate::progress::spinner::SubmissionSpinner;
use colored::Colorize;
use symptom_application::{PredictionErrorEvent, StatusSnapshot, UiEvent};

/// Renders UiEvents to the terminal for the REPL
pub struct ReplPresenter {
    spinner: SubmissionSpinner,
}

impl Default for ReplPresenter {
    fn default() -> Self {
        Self::new(true)
    }
}

impl ReplPresenter {
    pub fn new(show_progress: bool) -> Self {
        Self {
            spinner: SubmissionSpinner::new(show_progress),
        }
    }

    /// Render a single UiEvent to the terminal
    pub fn render(&mut self, event: &UiEvent) {
        match event {
            UiEvent::Help => Self::render_help(),
            UiEvent::Status(snapshot) => Self::render_status(snapshot),
            UiEvent::SessionReset => {
                println!("{}", "Session cleared.".green());
            }
            UiEvent::SymptomsChanged { symptoms } => {
                println!(
                    "{} {}",
                    "Symptoms:".bold(),
                    ConsoleFormatter::format_symptoms(symptoms)
                );
            }
            UiEvent::SuggestionsUpdated { query, suggestions } => {
                println!("{} '{}':", "Suggestions for".dimmed(), query);
                for (i, suggestion) in suggestions.iter().enumerate() {
                    println!("  {} {}", format!("{}.", i + 1).cyan(), suggestion);
                }
                println!("{}", "Use /pick <n> to add one.".dimmed());
            }
            UiEvent::SuggestionsCleared => {}
            UiEvent::StagedFilesChanged { files } => {
                println!("{}", "Lab reports:".bold());
                println!("{}", ConsoleFormatter::format_staged_files(files));
            }
            UiEvent::StagingRejected { error } => {
                println!("{} {}", "Error:".red().bold(), error);
            }
            UiEvent::DemographicsChanged(demographics) => {
                println!(
                    "{}",
                    ConsoleFormatter::format_demographics(demographics).dimmed()
                );
            }
            UiEvent::BmiResult(bmi) => {
                println!("{}", bmi.to_string().green());
            }
            UiEvent::BmiError { message } => {
                println!("{}", message.red());
            }
            UiEvent::EmptySymptoms => {
                println!(
                    "{} {}",
                    "⚠️".yellow(),
                    "Please select at least one symptom to continue".red()
                );
            }
            UiEvent::SubmissionRejected { reason } => {
                println!("{} {}", "⚠️".yellow(), reason.yellow());
            }
            UiEvent::SubmissionStarted {
                symptom_count,
                file_count,
            } => {
                let message = if *file_count > 0 {
                    format!(
                        "Analyzing with AI ({} symptom(s), {} lab report(s))",
                        symptom_count, file_count
                    )
                } else {
                    format!("Analyzing with AI ({} symptom(s))", symptom_count)
                };
                self.spinner.start(message);
            }
            UiEvent::PredictionResult(report) => {
                self.spinner.finish();
                println!("{}", ConsoleFormatter::format_report(report));
            }
            UiEvent::PredictionError(error) => self.render_prediction_error(error),
            UiEvent::SubmissionFinished => self.spinner.finish(),
            UiEvent::LabReportStarted { file_name } => {
                println!("{} {}...", "Analyzing".dimmed(), file_name);
            }
            UiEvent::LabReportResult { file_name, summary } => {
                println!();
                println!("{} {}", "Lab report:".cyan().bold(), file_name);
                println!("{}", summary);
                println!();
            }
            UiEvent::LabReportError { error } => {
                println!("{} {}", "Error:".red().bold(), error);
            }
            UiEvent::CommandError { message } => {
                println!("{} {}", "Error:".red().bold(), message);
            }
            UiEvent::UnknownCommand { command } => {
                println!("{} Unknown command: {}", "?".yellow(), command);
                println!("Type {} for available commands", "/help".cyan());
            }
            UiEvent::Exit => {
                println!("Bye!");
            }
        }
    }

    fn render_prediction_error(&mut self, error: &PredictionErrorEvent) {
        self.spinner.finish();
        self.spinner.notice(&error.reason, error.dismiss_after);
    }

    pub fn render_welcome(backend: &str) {
        println!();
        println!(
            "{}",
            "╭─────────────────────────────────────────────╮".cyan()
        );
        println!(
            "{}",
            "│      Symptom Checker - AI Doctor Assistant  │".cyan()
        );
        println!(
            "{}",
            "╰─────────────────────────────────────────────╯".cyan()
        );
        println!();
        println!("{} {}", "Backend:".bold(), backend);
        println!();
        println!(
            "{}",
            "Type part of a symptom to search, or /help for commands.".dimmed()
        );
        println!();
    }

    fn render_help() {
        println!();
        println!("{}", "Commands:".bold());
        println!("  <text>, /search <text>  - Suggest symptoms matching <text>");
        println!("  /pick <n>               - Add suggestion number <n>");
        println!("  /add <symptom>          - Add a symptom as typed");
        println!("  /remove <symptom>       - Remove a selected symptom");
        println!("  /symptoms               - Show selected symptoms");
        println!("  /files <path>...        - Stage lab reports (replaces current)");
        println!("  /unstage <name>         - Remove a staged lab report");
        println!("  /age, /gender <value>   - Set demographics (no value clears)");
        println!("  /weight, /height <value>");
        println!("  /bmi                    - Compute BMI from weight and height");
        println!("  /analyze                - Summarize the first staged lab report");
        println!("  /submit                 - Predict likely conditions");
        println!("  /status                 - Show the whole session");
        println!("  /reset                  - Clear everything");
        println!("  /help, /h, /?           - Show this help");
        println!("  /quit, /exit, /q        - Exit");
        println!();
        println!("{}", "Lab reports:".bold());
        println!("  PDF, JPEG or PNG, up to 10 MB each.");
        println!();
    }

    fn render_status(snapshot: &StatusSnapshot) {
        println!();
        println!("{}", "Current Session:".bold().cyan());
        println!(
            "  Symptoms:     {}",
            ConsoleFormatter::format_symptoms(&snapshot.symptoms)
        );
        println!(
            "  Demographics: {}",
            ConsoleFormatter::format_demographics(&snapshot.demographics)
        );
        println!("  Submission:   {}", snapshot.phase);
        println!("  Lab reports:");
        println!(
            "{}",
            ConsoleFormatter::format_staged_files(&snapshot.files)
        );
        println!();
    }
}
