//! Shared utilities for use cases.
//!
//! Contains the timeout wrapper applied to every backend call
//! (SuggestionSearch, PredictionOrchestrator, AnalyzeLabReport).

use crate::ports::symptom_api::ApiError;
use std::future::Future;
use std::time::Duration;

/// Await a backend call, bounded by `timeout` when one is configured.
///
/// Elapsed time surfaces as [`ApiError::Timeout`] so that callers classify
/// it exactly like any other transport failure.
pub(crate) async fn within_timeout<T, F>(timeout: Option<Duration>, call: F) -> Result<T, ApiError>
where
    F: Future<Output = Result<T, ApiError>>,
{
    match timeout {
        Some(limit) => tokio::time::timeout(limit, call)
            .await
            .unwrap_or(Err(ApiError::Timeout)),
        None => call.await,
    }
}
