//! Spinner shown while a prediction is pending, plus self-dismissing notices

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Pending-submission spinner.
///
/// Drawing is skipped automatically when stderr is not a terminal.
pub struct SubmissionSpinner {
    bar: Option<ProgressBar>,
    enabled: bool,
}

impl Default for SubmissionSpinner {
    fn default() -> Self {
        Self::new(true)
    }
}

impl SubmissionSpinner {
    pub fn new(enabled: bool) -> Self {
        Self { bar: None, enabled }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg} {elapsed:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    pub fn is_active(&self) -> bool {
        self.bar.is_some()
    }

    /// Start spinning; replaces any spinner already running
    pub fn start(&mut self, message: impl Into<String>) {
        self.finish();
        if !self.enabled {
            return;
        }
        let bar = ProgressBar::new_spinner();
        bar.set_style(Self::spinner_style());
        bar.set_message(message.into());
        bar.enable_steady_tick(Duration::from_millis(100));
        self.bar = Some(bar);
    }

    /// Stop and erase the spinner
    pub fn finish(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }

    /// Show `message` and erase it after `dismiss_after`.
    ///
    /// Falls back to a plain stderr line when nothing can be redrawn (no
    /// terminal, progress disabled, or no runtime to schedule the dismissal).
    pub fn notice(&self, message: &str, dismiss_after: Duration) {
        let runtime = tokio::runtime::Handle::try_current();
        let bar = ProgressBar::new_spinner();
        if !self.enabled || bar.is_hidden() || runtime.is_err() || dismiss_after.is_zero() {
            eprintln!("{} {}", "Analysis Failed:".red().bold(), message);
            return;
        }

        bar.set_style(
            ProgressStyle::default_spinner()
                .template("{msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message(format!("{} {}", "Analysis Failed:".red().bold(), message));
        bar.tick();
        if let Ok(handle) = runtime {
            handle.spawn(async move {
                tokio::time::sleep(dismiss_after).await;
                bar.finish_and_clear();
            });
        }
    }
}

impl Drop for SubmissionSpinner {
    fn drop(&mut self) {
        self.finish();
    }
}
