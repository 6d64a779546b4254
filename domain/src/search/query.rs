//! Suggestion query value objects and the latest-wins sequencer

use std::sync::atomic::{AtomicU64, Ordering};

/// Queries shorter than this (in characters, after trimming) never hit the network
pub const MIN_QUERY_CHARS: usize = 2;

/// Trim a raw query and decide whether it is long enough to search.
pub fn normalize_query(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    if trimmed.chars().count() < MIN_QUERY_CHARS {
        None
    } else {
        Some(trimmed)
    }
}

/// A query tagged with the sequence number assigned when it was issued
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionQuery {
    text: String,
    seq: u64,
}

impl SuggestionQuery {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }
}

/// Issues monotonically increasing sequence numbers and tracks the latest.
///
/// A response may only be applied while its query is still the latest one
/// issued. Sequence numbers start at 1; 0 means nothing has been issued.
#[derive(Debug, Default)]
pub struct QuerySequencer {
    latest: AtomicU64,
}

impl QuerySequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tag a query with the next sequence number
    pub fn issue(&self, text: impl Into<String>) -> SuggestionQuery {
        SuggestionQuery {
            text: text.into(),
            seq: self.bump(),
        }
    }

    /// Advance the sequence without a query, invalidating everything in flight
    pub fn bump(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn is_latest(&self, seq: u64) -> bool {
        self.latest.load(Ordering::SeqCst) == seq
    }

    pub fn latest(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }
}
