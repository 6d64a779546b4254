//! Console output formatter for prediction results

use colored::Colorize;
use symptom_domain::util::format_kb;
use symptom_domain::{DemographicField, Demographics, PredictionReport, StagedFile, Symptom};

const BAR_WIDTH: usize = 20;

/// Formats prediction results and session state for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete prediction report
    pub fn format_report(report: &PredictionReport) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Prediction Results"));
        output.push('\n');

        // Most likely condition
        if let Some(top) = &report.most_likely {
            output.push_str(&format!(
                "\n{} {} {}\n",
                "Most likely:".cyan().bold(),
                top.disease.bold(),
                format!("({}%)", top.probability).yellow()
            ));
            output.push_str(&format!("  {}\n", Self::probability_bar(top.probability)));
            output.push_str(&format!(
                "  {}\n",
                report
                    .most_likely_description()
                    .unwrap_or("No description available.")
            ));
        }

        // Other candidates
        output.push_str(&Self::section_header("Other possibilities"));
        if report.possible.is_empty() {
            output.push_str(&format!(
                "  {}\n",
                "No other significant predictions found".dimmed().italic()
            ));
        } else {
            for condition in &report.possible {
                output.push_str(&format!(
                    "  {:<28} {} {}\n",
                    condition.disease,
                    Self::probability_bar(condition.probability),
                    format!("{}%", condition.probability).blue()
                ));
            }
        }

        if !report.recommendations.is_empty() {
            output.push_str(&Self::section_header("Recommendations"));
            for rec in &report.recommendations {
                output.push_str(&format!("  * {}\n", rec));
            }
        }

        if let Some(explanation) = &report.explanation {
            output.push_str(&Self::section_header("Why this prediction?"));
            output.push_str(&format!("  {}\n", explanation));
        }

        output.push_str(&Self::footer());
        output
    }

    /// Format as JSON
    pub fn format_json(report: &PredictionReport) -> String {
        serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string())
    }

    /// Selected symptoms as chips
    pub fn format_symptoms(symptoms: &[Symptom]) -> String {
        if symptoms.is_empty() {
            return "No symptoms selected.".dimmed().to_string();
        }
        symptoms
            .iter()
            .map(|s| format!("[{}]", s).green().to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Staged lab reports, one per line
    pub fn format_staged_files(files: &[StagedFile]) -> String {
        if files.is_empty() {
            return "No lab reports staged.".dimmed().to_string();
        }
        files
            .iter()
            .map(|f| {
                format!(
                    "  {} {} ({}, {})",
                    "-".dimmed(),
                    f.name(),
                    format_kb(f.size()),
                    f.media_type()
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Demographics the way the health report prints them
    pub fn format_demographics(demographics: &Demographics) -> String {
        let value = |field| demographics.get(field).unwrap_or("N/A");
        format!(
            "Age: {} | Gender: {} | Weight: {} kg | Height: {} cm",
            value(DemographicField::Age),
            value(DemographicField::Gender),
            value(DemographicField::Weight),
            value(DemographicField::Height)
        )
    }

    fn probability_bar(probability: f64) -> String {
        let filled = ((probability.clamp(0.0, 100.0) / 100.0) * BAR_WIDTH as f64).round() as usize;
        format!(
            "{}{}",
            "█".repeat(filled).green(),
            "░".repeat(BAR_WIDTH - filled).dimmed()
        )
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}
