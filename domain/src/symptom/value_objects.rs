//! Symptom value object

use serde::{Deserialize, Serialize};

/// A user-selected symptom label (Value Object)
///
/// Labels are opaque and case-sensitive: `"Fever"` and `"fever"` are
/// different symptoms. Identity is exact string equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symptom {
    label: String,
}

impl Symptom {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }

    /// Get the label text
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Consume and return the inner label
    pub fn into_label(self) -> String {
        self.label
    }
}

impl std::fmt::Display for Symptom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label)
    }
}

impl From<&str> for Symptom {
    fn from(s: &str) -> Self {
        Symptom::new(s)
    }
}

impl From<String> for Symptom {
    fn from(s: String) -> Self {
        Symptom::new(s)
    }
}

impl PartialEq<str> for Symptom {
    fn eq(&self, other: &str) -> bool {
        self.label == other
    }
}
