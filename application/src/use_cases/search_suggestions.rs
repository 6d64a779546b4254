//! Symptom autocomplete search
//!
//! Turns free-text input into suggestions while tolerating out-of-order
//! responses: every query is tagged with a sequence number and only the most
//! recently issued one may produce visible results. Superseded requests are
//! cancelled when possible and otherwise ignored on arrival.

use crate::ports::symptom_api::SymptomApi;
use crate::use_cases::shared::within_timeout;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use symptom_domain::{QuerySequencer, normalize_query};
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Result of one search call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Query too short; the dropdown should be hidden
    Cleared { seq: u64 },
    /// Suggestions for the latest query at the time they arrived
    Suggestions {
        seq: u64,
        query: String,
        suggestions: Vec<String>,
    },
    /// A newer query was issued; this result must not be shown
    Superseded,
}

/// Errors from the suggestion pipeline
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The backend could not be reached or answered garbage.
    /// Callers treat this as "no suggestions".
    #[error("Suggestion service unavailable: {reason}")]
    Unavailable { seq: u64, reason: String },
}

/// Debounced, cancelable suggestion search
pub struct SuggestionSearch<A: SymptomApi + 'static> {
    api: Arc<A>,
    sequencer: QuerySequencer,
    /// Token of the most recently issued query
    in_flight: Mutex<CancellationToken>,
    debounce: Duration,
    timeout: Option<Duration>,
    cancel_superseded: bool,
}

impl<A: SymptomApi + 'static> SuggestionSearch<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self {
            api,
            sequencer: QuerySequencer::new(),
            in_flight: Mutex::new(CancellationToken::new()),
            debounce: Duration::ZERO,
            timeout: None,
            cancel_superseded: true,
        }
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// When false, superseded requests run to completion and their results
    /// are discarded on arrival.
    pub fn with_cancel_superseded(mut self, cancel: bool) -> Self {
        self.cancel_superseded = cancel;
        self
    }

    /// Whether `seq` is still the most recently issued query
    pub fn is_latest(&self, seq: u64) -> bool {
        self.sequencer.is_latest(seq)
    }

    /// Supersede whatever is in flight without issuing a new query
    pub fn invalidate(&self) -> u64 {
        let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        if self.cancel_superseded {
            in_flight.cancel();
        }
        *in_flight = CancellationToken::new();
        self.sequencer.bump()
    }

    /// Run one search for the raw input text.
    ///
    /// Input shorter than two characters (after trimming) clears the
    /// suggestions without a network call, but still supersedes any
    /// outstanding query.
    pub async fn search(&self, raw: &str) -> Result<SearchOutcome, SearchError> {
        let (query, token) = {
            let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
            if self.cancel_superseded {
                in_flight.cancel();
            }
            let token = CancellationToken::new();
            *in_flight = token.clone();

            match normalize_query(raw) {
                Some(text) => (self.sequencer.issue(text), token),
                None => {
                    let seq = self.sequencer.bump();
                    return Ok(SearchOutcome::Cleared { seq });
                }
            }
        };

        if !self.debounce.is_zero() {
            tokio::select! {
                biased;
                _ = token.cancelled() => return Ok(SearchOutcome::Superseded),
                _ = tokio::time::sleep(self.debounce) => {}
            }
            if !self.sequencer.is_latest(query.seq()) {
                return Ok(SearchOutcome::Superseded);
            }
        }

        let result = tokio::select! {
            biased;
            _ = token.cancelled() => {
                debug!("Suggestion request for {:?} cancelled", query.text());
                return Ok(SearchOutcome::Superseded);
            }
            result = within_timeout(self.timeout, self.api.suggest(query.text())) => result,
        };

        if !self.sequencer.is_latest(query.seq()) {
            debug!(
                "Discarding stale suggestions for {:?} (seq {}, latest {})",
                query.text(),
                query.seq(),
                self.sequencer.latest()
            );
            return Ok(SearchOutcome::Superseded);
        }

        match result {
            Ok(suggestions) => Ok(SearchOutcome::Suggestions {
                seq: query.seq(),
                query: query.text().to_string(),
                suggestions,
            }),
            Err(e) => {
                warn!("Symptom suggestion failed for {:?}: {}", query.text(), e);
                Err(SearchError::Unavailable {
                    seq: query.seq(),
                    reason: e.to_string(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::symptom_api::ApiError;
    use crate::use_cases::test_support::{MockApi, wait_until};

    fn search_over(api: &Arc<MockApi>) -> SuggestionSearch<MockApi> {
        SuggestionSearch::new(api.clone())
    }

    #[tokio::test]
    async fn test_short_query_clears_without_network() {
        let api = Arc::new(MockApi::new());
        let search = search_over(&api);

        for raw in ["", " ", "f", "  f  "] {
            let outcome = search.search(raw).await.unwrap();
            assert!(matches!(outcome, SearchOutcome::Cleared { .. }));
        }
        assert!(api.suggest_calls().is_empty());
    }

    #[tokio::test]
    async fn test_query_is_trimmed_before_sending() {
        let api = Arc::new(MockApi::new());
        let search = search_over(&api);

        let outcome = search.search("  fev ").await.unwrap();
        assert_eq!(
            outcome,
            SearchOutcome::Suggestions {
                seq: 1,
                query: "fev".to_string(),
                suggestions: vec!["fev (suggested)".to_string()],
            }
        );
        assert_eq!(api.suggest_calls(), vec!["fev"]);
    }

    #[tokio::test]
    async fn test_short_query_supersedes_pending_result() {
        let api = Arc::new(MockApi::new());
        let release = api.gate_suggest("fe");
        let search = Arc::new(search_over(&api).with_cancel_superseded(false));

        let pending = tokio::spawn({
            let search = search.clone();
            async move { search.search("fe").await }
        });
        wait_until(|| api.suggest_calls().len() == 1).await;

        search.search("f").await.unwrap();
        let _ = release.send(Ok(vec!["fever".to_string()]));

        assert_eq!(pending.await.unwrap(), Ok(SearchOutcome::Superseded));
    }

    #[tokio::test]
    async fn test_out_of_order_responses_keep_latest() {
        let api = Arc::new(MockApi::new());
        let release_fe = api.gate_suggest("fe");
        let release_fev = api.gate_suggest("fev");
        let search = Arc::new(search_over(&api).with_cancel_superseded(false));

        let first = tokio::spawn({
            let search = search.clone();
            async move { search.search("fe").await }
        });
        wait_until(|| api.suggest_calls().len() == 1).await;
        let second = tokio::spawn({
            let search = search.clone();
            async move { search.search("fev").await }
        });
        wait_until(|| api.suggest_calls().len() == 2).await;

        // The newer query answers first, the older one last
        let _ = release_fev.send(Ok(vec!["fever".to_string()]));
        let second = second.await.unwrap().unwrap();
        let _ = release_fe.send(Ok(vec!["feet pain".to_string()]));
        let first = first.await.unwrap().unwrap();

        assert_eq!(first, SearchOutcome::Superseded);
        assert!(matches!(
            second,
            SearchOutcome::Suggestions { ref suggestions, .. } if suggestions == &["fever".to_string()]
        ));
    }

    #[tokio::test]
    async fn test_superseded_request_is_cancelled() {
        let api = Arc::new(MockApi::new());
        // Never released: only cancellation can finish this call
        let _hold = api.gate_suggest("fe");
        let search = Arc::new(search_over(&api));

        let first = tokio::spawn({
            let search = search.clone();
            async move { search.search("fe").await }
        });
        wait_until(|| api.suggest_calls().len() == 1).await;

        let second = search.search("fev").await.unwrap();

        assert_eq!(first.await.unwrap(), Ok(SearchOutcome::Superseded));
        assert!(matches!(second, SearchOutcome::Suggestions { seq: 2, .. }));
    }

    #[tokio::test]
    async fn test_failure_is_unavailable() {
        let api = Arc::new(MockApi::new());
        api.fail_suggest(ApiError::ConnectionError("refused".to_string()));
        let search = search_over(&api);

        let err = search.search("cough").await.unwrap_err();
        assert!(matches!(err, SearchError::Unavailable { seq: 1, .. }));
    }

    #[tokio::test]
    async fn test_stale_failure_is_superseded_not_error() {
        let api = Arc::new(MockApi::new());
        let release = api.gate_suggest("co");
        let search = Arc::new(search_over(&api).with_cancel_superseded(false));

        let first = tokio::spawn({
            let search = search.clone();
            async move { search.search("co").await }
        });
        wait_until(|| api.suggest_calls().len() == 1).await;
        search.invalidate();
        let _ = release.send(Err(ApiError::Timeout));

        assert_eq!(first.await.unwrap(), Ok(SearchOutcome::Superseded));
    }

    #[tokio::test]
    async fn test_invalidate_lets_request_finish_when_not_cancelling() {
        let api = Arc::new(MockApi::new());
        let release = api.gate_suggest("co");
        let search = Arc::new(search_over(&api).with_cancel_superseded(false));

        let first = tokio::spawn({
            let search = search.clone();
            async move { search.search("co").await }
        });
        wait_until(|| api.suggest_calls().len() == 1).await;
        search.invalidate();
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
        assert!(!first.is_finished());

        let _ = release.send(Ok(vec!["cough".to_string()]));
        assert_eq!(first.await.unwrap(), Ok(SearchOutcome::Superseded));
    }

    #[tokio::test]
    async fn test_invalidate_cancels_in_flight_request() {
        let api = Arc::new(MockApi::new());
        let _hold = api.gate_suggest("co");
        let search = Arc::new(search_over(&api));

        let first = tokio::spawn({
            let search = search.clone();
            async move { search.search("co").await }
        });
        wait_until(|| api.suggest_calls().len() == 1).await;
        search.invalidate();

        assert_eq!(first.await.unwrap(), Ok(SearchOutcome::Superseded));
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_is_unavailable() {
        let api = Arc::new(MockApi::new());
        let _hold = api.gate_suggest("rash");
        let search = search_over(&api).with_timeout(Some(Duration::from_secs(5)));

        let err = search.search("rash").await.unwrap_err();
        assert!(matches!(err, SearchError::Unavailable { .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_debounce_sends_only_last_keystroke() {
        let api = Arc::new(MockApi::new());
        let search = Arc::new(search_over(&api).with_debounce(Duration::from_millis(150)));

        let first = tokio::spawn({
            let search = search.clone();
            async move { search.search("fe").await }
        });
        wait_until(|| search.is_latest(1)).await;

        let second = search.search("fev").await.unwrap();

        assert_eq!(first.await.unwrap(), Ok(SearchOutcome::Superseded));
        assert!(matches!(second, SearchOutcome::Suggestions { seq: 2, .. }));
        assert_eq!(api.suggest_calls(), vec!["fev"]);
    }
}
