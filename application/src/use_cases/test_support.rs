//! Test doubles shared by the use case tests.

use crate::ports::symptom_api::{ApiError, LabReportReply, SymptomApi};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use symptom_domain::{ConditionScore, PredictionReport, PredictionRequest, StagedFile};
use tokio::sync::oneshot;

type SuggestReply = Result<Vec<String>, ApiError>;

/// Scriptable in-memory backend.
///
/// Suggestion replies can be held back per query with [`MockApi::gate_suggest`]
/// so tests decide the order in which responses arrive. Predictions can be
/// held back with [`MockApi::gate_predict`].
#[derive(Default)]
pub(crate) struct MockApi {
    suggest_calls: Mutex<Vec<String>>,
    suggest_gates: Mutex<HashMap<String, oneshot::Receiver<SuggestReply>>>,
    suggest_error: Mutex<Option<ApiError>>,
    predict_calls: Mutex<Vec<PredictionRequest>>,
    predict_gate: Mutex<Option<oneshot::Receiver<()>>>,
    predict_replies: Mutex<VecDeque<Result<PredictionReport, ApiError>>>,
    lab_calls: Mutex<Vec<String>>,
    lab_reply: Mutex<Option<Result<LabReportReply, ApiError>>>,
}

impl MockApi {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Hold the reply for `query` until the returned sender fires
    pub(crate) fn gate_suggest(&self, query: &str) -> oneshot::Sender<SuggestReply> {
        let (tx, rx) = oneshot::channel();
        self.suggest_gates
            .lock()
            .unwrap()
            .insert(query.to_string(), rx);
        tx
    }

    pub(crate) fn fail_suggest(&self, error: ApiError) {
        *self.suggest_error.lock().unwrap() = Some(error);
    }

    /// Hold the next prediction until the returned sender fires
    pub(crate) fn gate_predict(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.predict_gate.lock().unwrap() = Some(rx);
        tx
    }

    pub(crate) fn push_predict(&self, reply: Result<PredictionReport, ApiError>) {
        self.predict_replies.lock().unwrap().push_back(reply);
    }

    pub(crate) fn set_lab_reply(&self, reply: Result<LabReportReply, ApiError>) {
        *self.lab_reply.lock().unwrap() = Some(reply);
    }

    pub(crate) fn suggest_calls(&self) -> Vec<String> {
        self.suggest_calls.lock().unwrap().clone()
    }

    pub(crate) fn predict_calls(&self) -> Vec<PredictionRequest> {
        self.predict_calls.lock().unwrap().clone()
    }

    pub(crate) fn lab_calls(&self) -> Vec<String> {
        self.lab_calls.lock().unwrap().clone()
    }
}

pub(crate) fn sample_report() -> PredictionReport {
    PredictionReport {
        most_likely: Some(ConditionScore {
            disease: "Influenza".to_string(),
            probability: 72.0,
            description: Some("Viral infection of the respiratory tract".to_string()),
        }),
        possible: vec![ConditionScore {
            disease: "Common Cold".to_string(),
            probability: 18.0,
            description: None,
        }],
        recommendations: vec!["Rest".to_string(), "Stay hydrated".to_string()],
        explanation: Some("Fever and cough weighed most.".to_string()),
    }
}

/// Yield until `condition` holds (single-threaded test runtime)
pub(crate) async fn wait_until(condition: impl Fn() -> bool) {
    for _ in 0..1000 {
        if condition() {
            return;
        }
        tokio::task::yield_now().await;
    }
    panic!("condition never became true");
}

#[async_trait]
impl SymptomApi for MockApi {
    async fn suggest(&self, query: &str) -> Result<Vec<String>, ApiError> {
        self.suggest_calls.lock().unwrap().push(query.to_string());

        let gate = self.suggest_gates.lock().unwrap().remove(query);
        if let Some(gate) = gate {
            return gate
                .await
                .unwrap_or_else(|_| Err(ApiError::ConnectionError("gate dropped".to_string())));
        }

        if let Some(error) = self.suggest_error.lock().unwrap().clone() {
            return Err(error);
        }
        Ok(vec![format!("{} (suggested)", query)])
    }

    async fn predict(&self, request: &PredictionRequest) -> Result<PredictionReport, ApiError> {
        self.predict_calls.lock().unwrap().push(request.clone());

        let gate = self.predict_gate.lock().unwrap().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }

        self.predict_replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(sample_report()))
    }

    async fn analyze_lab_report(&self, file: &StagedFile) -> Result<LabReportReply, ApiError> {
        self.lab_calls.lock().unwrap().push(file.name().to_string());
        self.lab_reply
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| Ok(LabReportReply::Summary("Hemoglobin: 13.5 g/dL".to_string())))
    }
}
