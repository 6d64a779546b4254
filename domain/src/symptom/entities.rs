//! Symptom set entity

use super::value_objects::Symptom;
use serde::Serialize;

/// Ordered, duplicate-free collection of selected symptoms.
///
/// Insertion order is preserved and is the order used both for display and
/// for request serialization. Both mutators are total: they never fail and
/// report whether the set actually changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SymptomSet {
    symptoms: Vec<Symptom>,
}

impl SymptomSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a symptom. Returns `false` if it was already present.
    pub fn add(&mut self, symptom: impl Into<Symptom>) -> bool {
        let symptom = symptom.into();
        if self.symptoms.contains(&symptom) {
            return false;
        }
        self.symptoms.push(symptom);
        true
    }

    /// Remove a symptom by label. Returns `false` if it was not present.
    pub fn remove(&mut self, label: &str) -> bool {
        let before = self.symptoms.len();
        self.symptoms.retain(|s| s.label() != label);
        self.symptoms.len() != before
    }

    /// Remove every symptom. Returns `false` if the set was already empty.
    pub fn clear(&mut self) -> bool {
        let changed = !self.symptoms.is_empty();
        self.symptoms.clear();
        changed
    }

    pub fn contains(&self, label: &str) -> bool {
        self.symptoms.iter().any(|s| s.label() == label)
    }

    pub fn len(&self) -> usize {
        self.symptoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symptoms.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Symptom> {
        self.symptoms.iter()
    }

    /// Snapshot of the current contents in insertion order
    pub fn to_vec(&self) -> Vec<Symptom> {
        self.symptoms.clone()
    }

    /// Labels in insertion order
    pub fn labels(&self) -> Vec<String> {
        self.symptoms.iter().map(|s| s.label().to_string()).collect()
    }
}

impl<'a> IntoIterator for &'a SymptomSet {
    type Item = &'a Symptom;
    type IntoIter = std::slice::Iter<'a, Symptom>;

    fn into_iter(self) -> Self::IntoIter {
        self.symptoms.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_reports_change() {
        let mut set = SymptomSet::new();
        assert!(set.add("fever"));
        assert!(!set.add("fever"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_remove_reports_change() {
        let mut set = SymptomSet::new();
        set.add("fever");
        assert!(set.remove("fever"));
        assert!(!set.remove("fever"));
        assert!(set.is_empty());
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut set = SymptomSet::new();
        set.add("cough");
        set.add("fever");
        set.add("headache");
        set.add("cough");
        assert_eq!(set.labels(), vec!["cough", "fever", "headache"]);
    }

    #[test]
    fn test_readd_after_remove_goes_to_end() {
        let mut set = SymptomSet::new();
        set.add("cough");
        set.add("fever");
        set.remove("cough");
        set.add("cough");
        assert_eq!(set.labels(), vec!["fever", "cough"]);
    }

    #[test]
    fn test_mixed_sequence_keeps_invariants() {
        let ops: &[(&str, bool)] = &[
            ("a", true),
            ("b", true),
            ("a", true),
            ("c", true),
            ("b", false),
            ("d", true),
            ("b", true),
            ("a", false),
            ("a", true),
            ("c", true),
        ];

        let mut set = SymptomSet::new();
        let mut model: Vec<&str> = Vec::new();
        for (label, is_add) in ops {
            if *is_add {
                set.add(*label);
                if !model.contains(label) {
                    model.push(label);
                }
            } else {
                set.remove(label);
                model.retain(|l| l != label);
            }

            let labels = set.labels();
            let unique: std::collections::HashSet<_> = labels.iter().collect();
            assert_eq!(labels.len(), unique.len());
            assert_eq!(labels, model);
        }
    }

    #[test]
    fn test_empty_label_is_accepted() {
        let mut set = SymptomSet::new();
        assert!(set.add(""));
        assert!(set.contains(""));
    }

    #[test]
    fn test_serializes_as_json_array() {
        let mut set = SymptomSet::new();
        set.add("fever");
        set.add("cough");
        assert_eq!(serde_json::to_string(&set).unwrap(), r#"["fever","cough"]"#);
    }
}
