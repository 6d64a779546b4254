//! Symptom Check Controller
//!
//! Owns the session state (selected symptoms, staged lab reports,
//! demographics, visible suggestions) and drives the use cases from user
//! commands. Emits UiEvent messages to a channel for the presentation layer
//! to render; it never renders anything itself.
//!
//! The controller is cheap to clone and every method takes `&self`, so the
//! REPL can hand a clone to a background task (a pending submission) and keep
//! accepting input. State locks are never held across an `.await`.

use crate::config::ControllerConfig;
use crate::ports::symptom_api::SymptomApi;
use crate::ports::ui_event::{PredictionErrorEvent, StatusSnapshot, UiEvent};
use crate::use_cases::analyze_lab_report::{AnalyzeLabReportUseCase, LabReportError};
use crate::use_cases::search_suggestions::{SearchError, SearchOutcome, SuggestionSearch};
use crate::use_cases::submit_prediction::{PredictionOrchestrator, SubmitError};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use symptom_domain::{
    Bmi, DemographicField, Demographics, DomainError, FileHandle, FileStaging, PredictionOutcome,
    StagedFile, StagingError, SubmissionPhase, Symptom, SymptomSet,
};
use tokio::sync::mpsc;
use tracing::debug;

/// Result of handling a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandAction {
    /// Continue the REPL loop
    Continue,
    /// Exit the REPL
    Exit,
    /// Submit a prediction; caller decides whether to await or spawn it
    Submit,
    /// Analyze the first staged lab report
    AnalyzeLabReport,
    /// Load these paths from disk and stage them as one batch
    StageFiles(Vec<String>),
}

#[derive(Debug, Default)]
struct SessionState {
    symptoms: SymptomSet,
    staging: FileStaging,
    demographics: Demographics,
    /// Suggestions currently shown for the latest query
    suggestions: Vec<String>,
}

struct Inner<A: SymptomApi + 'static> {
    state: Mutex<SessionState>,
    search: SuggestionSearch<A>,
    orchestrator: PredictionOrchestrator<A>,
    lab_report: AnalyzeLabReportUseCase<A>,
    config: ControllerConfig,
    tx: mpsc::UnboundedSender<UiEvent>,
}

/// Controller managing a symptom-check session
pub struct SymptomCheckController<A: SymptomApi + 'static> {
    inner: Arc<Inner<A>>,
}

impl<A: SymptomApi + 'static> Clone for SymptomCheckController<A> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<A: SymptomApi + 'static> SymptomCheckController<A> {
    /// Create a new SymptomCheckController
    pub fn new(api: Arc<A>, config: ControllerConfig, tx: mpsc::UnboundedSender<UiEvent>) -> Self {
        let search = SuggestionSearch::new(api.clone())
            .with_debounce(config.debounce)
            .with_timeout(config.suggest_timeout)
            .with_cancel_superseded(config.cancel_superseded);
        let orchestrator =
            PredictionOrchestrator::new(api.clone()).with_timeout(config.predict_timeout);
        let lab_report = AnalyzeLabReportUseCase::new(api).with_timeout(config.predict_timeout);

        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(SessionState::default()),
                search,
                orchestrator,
                lab_report,
                config,
                tx,
            }),
        }
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.inner.config
    }

    fn state(&self) -> MutexGuard<'_, SessionState> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn emit(&self, event: UiEvent) {
        let _ = self.inner.tx.send(event);
    }

    // ==================== Commands ====================

    /// Handle a line of user input.
    ///
    /// Lines that do not start with `/` are treated as a suggestion query.
    pub async fn handle_command(&self, line: &str) -> CommandAction {
        let line = line.trim();
        if !line.starts_with('/') {
            self.search(line).await;
            return CommandAction::Continue;
        }

        let parts: Vec<&str> = line.splitn(2, ' ').collect();
        let command = parts.first().copied().unwrap_or("");
        let args = parts.get(1).copied().unwrap_or("").trim();

        match command {
            "/quit" | "/exit" | "/q" => {
                self.emit(UiEvent::Exit);
                return CommandAction::Exit;
            }
            "/help" | "/h" | "/?" => self.emit(UiEvent::Help),
            "/add" | "/a" => {
                if args.is_empty() {
                    self.command_error("Usage: /add <symptom>");
                } else {
                    self.add_symptom(args);
                }
            }
            "/remove" | "/rm" => {
                if args.is_empty() {
                    self.command_error("Usage: /remove <symptom>");
                } else if !self.remove_symptom(args) {
                    self.command_error(&format!("'{}' is not selected", args));
                }
            }
            "/symptoms" => self.emit(UiEvent::SymptomsChanged {
                symptoms: self.symptoms(),
            }),
            "/search" | "/s" => {
                self.search(args).await;
            }
            "/pick" | "/p" => match args.parse::<usize>() {
                Ok(n) if n >= 1 => {
                    if self.select_suggestion(n - 1).is_none() {
                        self.command_error(&format!("No suggestion #{}", n));
                    }
                }
                _ => self.command_error("Usage: /pick <number>"),
            },
            "/files" | "/upload" => {
                let paths = args.split_whitespace().map(str::to_string).collect();
                return CommandAction::StageFiles(paths);
            }
            "/unstage" => {
                if args.is_empty() {
                    self.command_error("Usage: /unstage <file name>");
                } else {
                    self.unstage_file(args);
                }
            }
            "/age" | "/gender" | "/sex" | "/weight" | "/height" => {
                match command.trim_start_matches('/').parse::<DemographicField>() {
                    Ok(field) => self.set_demographic(field, args),
                    Err(e) => self.command_error(&e),
                }
            }
            "/bmi" => {
                let _ = self.compute_bmi();
            }
            "/submit" | "/predict" => return CommandAction::Submit,
            "/analyze" => return CommandAction::AnalyzeLabReport,
            "/status" => self.emit(UiEvent::Status(Box::new(self.status()))),
            "/reset" | "/clear" => self.reset(),
            _ => self.emit(UiEvent::UnknownCommand {
                command: command.to_string(),
            }),
        }
        CommandAction::Continue
    }

    fn command_error(&self, message: &str) {
        self.emit(UiEvent::CommandError {
            message: message.to_string(),
        });
    }

    // ==================== Symptoms ====================

    /// Add a symptom typed or picked by the user. Returns whether the set changed.
    pub fn add_symptom(&self, label: &str) -> bool {
        let label = label.trim();
        if label.is_empty() {
            return false;
        }
        let symptoms = {
            let mut state = self.state();
            if !state.symptoms.add(label) {
                return false;
            }
            state.symptoms.to_vec()
        };
        self.emit(UiEvent::SymptomsChanged { symptoms });
        true
    }

    pub fn remove_symptom(&self, label: &str) -> bool {
        let symptoms = {
            let mut state = self.state();
            if !state.symptoms.remove(label) {
                return false;
            }
            state.symptoms.to_vec()
        };
        self.emit(UiEvent::SymptomsChanged { symptoms });
        true
    }

    pub fn symptoms(&self) -> Vec<Symptom> {
        self.state().symptoms.to_vec()
    }

    // ==================== Suggestions ====================

    /// Run a suggestion query and return the suggestions visible afterwards.
    ///
    /// Results are applied only if their query is still the latest one when
    /// they arrive. A failed lookup hides the dropdown.
    pub async fn search(&self, text: &str) -> Vec<String> {
        match self.inner.search.search(text).await {
            Ok(SearchOutcome::Cleared { seq }) => self.apply_suggestions(seq, None),
            Ok(SearchOutcome::Suggestions {
                seq,
                query,
                suggestions,
            }) => self.apply_suggestions(seq, Some((query, suggestions))),
            Ok(SearchOutcome::Superseded) => {}
            Err(SearchError::Unavailable { seq, .. }) => self.apply_suggestions(seq, None),
        }
        self.suggestions()
    }

    fn apply_suggestions(&self, seq: u64, update: Option<(String, Vec<String>)>) {
        let mut state = self.state();
        // Re-checked under the lock: a newer query may have landed meanwhile
        if !self.inner.search.is_latest(seq) {
            debug!("Dropping suggestions for superseded query (seq {})", seq);
            return;
        }
        match update {
            Some((query, suggestions)) if !suggestions.is_empty() => {
                state.suggestions = suggestions.clone();
                self.emit(UiEvent::SuggestionsUpdated { query, suggestions });
            }
            _ => {
                state.suggestions.clear();
                self.emit(UiEvent::SuggestionsCleared);
            }
        }
    }

    pub fn suggestions(&self) -> Vec<String> {
        self.state().suggestions.clone()
    }

    /// Pick the suggestion at `index` (zero-based) into the symptom set.
    ///
    /// Hides the dropdown and supersedes any query still in flight.
    pub fn select_suggestion(&self, index: usize) -> Option<String> {
        let label = {
            let mut state = self.state();
            let label = state.suggestions.get(index).cloned()?;
            state.suggestions.clear();
            self.inner.search.invalidate();
            label
        };
        self.emit(UiEvent::SuggestionsCleared);
        self.add_symptom(&label);
        Some(label)
    }

    // ==================== Lab reports ====================

    /// Replace the staged files with `batch`, all-or-nothing.
    pub fn stage_files(&self, batch: Vec<FileHandle>) -> Result<Vec<StagedFile>, StagingError> {
        let (result, files) = {
            let mut state = self.state();
            let result = state.staging.stage(batch).map(<[StagedFile]>::to_vec);
            (result, state.staging.files().to_vec())
        };
        self.emit(UiEvent::StagedFilesChanged { files });
        if let Err(error) = &result {
            self.emit(UiEvent::StagingRejected {
                error: error.clone(),
            });
        }
        result
    }

    pub fn unstage_file(&self, name: &str) -> Vec<StagedFile> {
        let files = self.state().staging.unstage(name).to_vec();
        self.emit(UiEvent::StagedFilesChanged {
            files: files.clone(),
        });
        files
    }

    pub fn staged_files(&self) -> Vec<StagedFile> {
        self.state().staging.files().to_vec()
    }

    /// Analyze the first staged file
    pub async fn analyze_lab_report(&self) -> Result<String, LabReportError> {
        let file = self.state().staging.first().cloned();
        if let Some(file) = &file {
            self.emit(UiEvent::LabReportStarted {
                file_name: file.name().to_string(),
            });
        }

        let result = self.inner.lab_report.execute(file.as_ref()).await;
        match (&result, &file) {
            (Ok(summary), Some(file)) => self.emit(UiEvent::LabReportResult {
                file_name: file.name().to_string(),
                summary: summary.clone(),
            }),
            (Err(e), _) => self.emit(UiEvent::LabReportError {
                error: e.to_string(),
            }),
            (Ok(_), None) => {}
        }
        result
    }

    // ==================== Demographics ====================

    /// Set (or clear, with a blank value) one demographic field
    pub fn set_demographic(&self, field: DemographicField, value: &str) {
        let demographics = {
            let mut state = self.state();
            state.demographics.set(field, value);
            state.demographics.clone()
        };
        self.emit(UiEvent::DemographicsChanged(demographics));
    }

    pub fn demographics(&self) -> Demographics {
        self.state().demographics.clone()
    }

    /// Compute BMI from the current weight and height
    pub fn compute_bmi(&self) -> Result<Bmi, DomainError> {
        let result = Bmi::from_demographics(&self.state().demographics);
        match &result {
            Ok(bmi) => self.emit(UiEvent::BmiResult(*bmi)),
            Err(DomainError::InvalidMeasurement(message)) => self.emit(UiEvent::BmiError {
                message: message.clone(),
            }),
            Err(e) => self.emit(UiEvent::BmiError {
                message: e.to_string(),
            }),
        }
        result
    }

    // ==================== Prediction ====================

    /// Submit the current session for prediction.
    ///
    /// Emits `SubmissionStarted`, then `PredictionResult` or `PredictionError`,
    /// then `SubmissionFinished`. A refused submission emits only the reason.
    pub async fn submit(&self) -> Result<PredictionOutcome, SubmitError> {
        let started = {
            let state = self.state();
            self.inner
                .orchestrator
                .start(&state.symptoms, &state.demographics, &state.staging)
        };

        let pending = match started {
            Ok(pending) => pending,
            Err(e) => {
                if e.is_empty_symptoms() {
                    self.emit(UiEvent::EmptySymptoms);
                } else {
                    self.emit(UiEvent::SubmissionRejected {
                        reason: e.to_string(),
                    });
                }
                return Err(e);
            }
        };

        let tx = self.inner.tx.clone();
        let pending = pending.on_release(move || {
            let _ = tx.send(UiEvent::SubmissionFinished);
        });

        self.emit(UiEvent::SubmissionStarted {
            symptom_count: pending.request().symptoms().len(),
            file_count: pending.request().lab_reports().len(),
        });

        let completed = pending.send().await;
        match completed.outcome() {
            PredictionOutcome::Success(report) => {
                self.emit(UiEvent::PredictionResult(Box::new(report.clone())));
            }
            PredictionOutcome::Failure(failure) => {
                self.emit(UiEvent::PredictionError(PredictionErrorEvent {
                    reason: failure.reason(),
                    dismiss_after: self.inner.config.error_dismiss_after,
                }));
            }
        }
        Ok(completed.into_outcome())
    }

    pub fn phase(&self) -> SubmissionPhase {
        self.inner.orchestrator.phase()
    }

    // ==================== Session ====================

    pub fn status(&self) -> StatusSnapshot {
        let state = self.state();
        StatusSnapshot {
            symptoms: state.symptoms.to_vec(),
            files: state.staging.files().to_vec(),
            demographics: state.demographics.clone(),
            phase: self.inner.orchestrator.phase(),
        }
    }

    /// Clear symptoms, staged files, demographics and suggestions.
    ///
    /// A pending submission is left to finish on its own.
    pub fn reset(&self) {
        {
            let mut state = self.state();
            state.symptoms.clear();
            state.staging.clear();
            state.demographics = Demographics::default();
            state.suggestions.clear();
            self.inner.search.invalidate();
        }
        self.emit(UiEvent::SessionReset);
    }
}
