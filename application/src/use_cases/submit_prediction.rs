//! Prediction submission
//!
//! Single-flight orchestration of `POST /predict`. A submission snapshots the
//! session, flips the shared phase to `Pending`, and always returns it to
//! `Idle` once the outcome has been handed over, whichever way the request
//! ended.

use crate::ports::symptom_api::{ApiError, SymptomApi};
use crate::use_cases::shared::within_timeout;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use symptom_domain::{
    Demographics, DomainError, FileStaging, PredictionFailure, PredictionOutcome,
    PredictionRequest, SubmissionPhase, SymptomSet,
};
use thiserror::Error;
use tracing::{info, warn};

/// Reasons a submission is refused before any network traffic
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SubmitError {
    #[error(transparent)]
    Invalid(#[from] DomainError),

    #[error("A prediction is already in progress")]
    AlreadyPending,
}

impl SubmitError {
    pub fn is_empty_symptoms(&self) -> bool {
        matches!(self, SubmitError::Invalid(e) if e.is_empty_symptoms())
    }
}

/// Map a transport-level error onto the user-facing failure taxonomy
fn classify(error: ApiError) -> PredictionFailure {
    match error {
        ApiError::Http { detail, .. } => PredictionFailure::RequestFailed { detail },
        ApiError::InvalidResponse(message) | ApiError::InvalidRequest(message) => {
            PredictionFailure::RequestFailed {
                detail: Some(message),
            }
        }
        ApiError::ConnectionError(_) | ApiError::Timeout => PredictionFailure::NetworkUnavailable,
    }
}

type ReleaseHook = Box<dyn FnOnce() + Send>;

/// Returns the submission phase to `Idle` when dropped.
///
/// Held for the whole life of a submission so that a panic, an early return
/// or a dropped future cannot leave the submit affordance disabled.
pub struct SubmissionGuard {
    phase: Arc<Mutex<SubmissionPhase>>,
    on_release: Option<ReleaseHook>,
}

impl SubmissionGuard {
    fn new(phase: Arc<Mutex<SubmissionPhase>>) -> Self {
        Self {
            phase,
            on_release: None,
        }
    }

    fn set(&self, next: SubmissionPhase) {
        *self.phase.lock().unwrap_or_else(PoisonError::into_inner) = next;
    }
}

impl Drop for SubmissionGuard {
    fn drop(&mut self) {
        self.set(SubmissionPhase::Idle);
        if let Some(hook) = self.on_release.take() {
            hook();
        }
    }
}

/// An accepted submission that has not been sent yet
pub struct PendingSubmission<A: SymptomApi + 'static> {
    api: Arc<A>,
    timeout: Option<Duration>,
    request: PredictionRequest,
    guard: SubmissionGuard,
}

impl<A: SymptomApi + 'static> PendingSubmission<A> {
    pub fn request(&self) -> &PredictionRequest {
        &self.request
    }

    /// Run `hook` once the submission is over and the phase is back to `Idle`
    pub fn on_release(mut self, hook: impl FnOnce() + Send + 'static) -> Self {
        self.guard.on_release = Some(Box::new(hook));
        self
    }

    pub async fn send(self) -> CompletedSubmission {
        let Self {
            api,
            timeout,
            request,
            guard,
        } = self;

        info!(
            "Submitting prediction: {} symptom(s), {} lab report(s)",
            request.symptoms().len(),
            request.lab_reports().len()
        );

        let outcome = match within_timeout(timeout, api.predict(&request)).await {
            Ok(report) => {
                guard.set(SubmissionPhase::Succeeded);
                PredictionOutcome::Success(report)
            }
            Err(e) => {
                warn!("Prediction failed: {}", e);
                guard.set(SubmissionPhase::Failed);
                PredictionOutcome::Failure(classify(e))
            }
        };

        CompletedSubmission { outcome, guard }
    }
}

/// A finished submission. Dropping it releases the phase back to `Idle`.
pub struct CompletedSubmission {
    outcome: PredictionOutcome,
    guard: SubmissionGuard,
}

impl CompletedSubmission {
    pub fn outcome(&self) -> &PredictionOutcome {
        &self.outcome
    }

    pub fn into_outcome(self) -> PredictionOutcome {
        let Self { outcome, guard } = self;
        drop(guard);
        outcome
    }
}

/// Single-flight prediction submission
pub struct PredictionOrchestrator<A: SymptomApi + 'static> {
    api: Arc<A>,
    phase: Arc<Mutex<SubmissionPhase>>,
    timeout: Option<Duration>,
}

impl<A: SymptomApi + 'static> PredictionOrchestrator<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self {
            api,
            phase: Arc::new(Mutex::new(SubmissionPhase::Idle)),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn phase(&self) -> SubmissionPhase {
        *self.phase.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Accept a submission: validate, snapshot, and move to `Pending`.
    ///
    /// Synchronous so that the caller can take the snapshot and claim the
    /// single flight slot atomically with respect to its own state lock.
    pub fn start(
        &self,
        symptoms: &SymptomSet,
        demographics: &Demographics,
        staging: &FileStaging,
    ) -> Result<PendingSubmission<A>, SubmitError> {
        let request = PredictionRequest::snapshot(symptoms, demographics, staging)?;

        {
            let mut phase = self.phase.lock().unwrap_or_else(PoisonError::into_inner);
            if !phase.accepts_submission() {
                return Err(SubmitError::AlreadyPending);
            }
            *phase = SubmissionPhase::Pending;
        }

        Ok(PendingSubmission {
            api: self.api.clone(),
            timeout: self.timeout,
            request,
            guard: SubmissionGuard::new(self.phase.clone()),
        })
    }

    /// Start and send in one step
    pub async fn submit(
        &self,
        symptoms: &SymptomSet,
        demographics: &Demographics,
        staging: &FileStaging,
    ) -> Result<PredictionOutcome, SubmitError> {
        let pending = self.start(symptoms, demographics, staging)?;
        Ok(pending.send().await.into_outcome())
    }
}
