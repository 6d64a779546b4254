//! Submission lifecycle state

/// Single-flight submission state.
///
/// `Idle → Pending → {Succeeded, Failed} → Idle`. The terminal states are
/// transient: the orchestrator returns to `Idle` as soon as the outcome has
/// been handed to the presenter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionPhase {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed,
}

impl SubmissionPhase {
    /// Whether a new submission may start from this phase
    pub fn accepts_submission(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Pending => "pending",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        }
    }
}

impl std::fmt::Display for SubmissionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
