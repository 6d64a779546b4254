//! Application-level configuration.
//!
//! Controls how the use cases behave at runtime: network timeouts, the
//! autocomplete debounce window, and how long error notices stay visible.

use std::time::Duration;

/// Runtime behavior of [`SymptomCheckController`](crate::SymptomCheckController).
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Upper bound on a single suggestion request. `None` waits forever.
    pub suggest_timeout: Option<Duration>,
    /// Upper bound on a single prediction or lab-report request.
    pub predict_timeout: Option<Duration>,
    /// Quiet period before a suggestion query is sent.
    pub debounce: Duration,
    /// Abort superseded suggestion requests instead of just ignoring them.
    pub cancel_superseded: bool,
    /// How long a prediction error stays on screen before dismissing itself.
    pub error_dismiss_after: Duration,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            suggest_timeout: Some(Duration::from_secs(5)),
            predict_timeout: Some(Duration::from_secs(60)),
            debounce: Duration::from_millis(150),
            cancel_superseded: true,
            error_dismiss_after: Duration::from_secs(5),
        }
    }
}

impl ControllerConfig {
    // ==================== Builder Methods ====================

    pub fn with_suggest_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.suggest_timeout = timeout;
        self
    }

    pub fn with_predict_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.predict_timeout = timeout;
        self
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn with_cancel_superseded(mut self, cancel: bool) -> Self {
        self.cancel_superseded = cancel;
        self
    }

    pub fn with_error_dismiss_after(mut self, after: Duration) -> Self {
        self.error_dismiss_after = after;
        self
    }
}
