//! Prediction request snapshot

use super::demographics::Demographics;
use crate::core::error::DomainError;
use crate::staging::entities::{FileStaging, StagedFile};
use crate::symptom::entities::SymptomSet;
use crate::symptom::value_objects::Symptom;

/// Everything sent with one submission attempt.
///
/// Built from the live session state at the moment of submission and never
/// mutated afterwards; later edits to the session do not affect it.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionRequest {
    symptoms: Vec<Symptom>,
    demographics: Demographics,
    lab_reports: Vec<StagedFile>,
}

impl PredictionRequest {
    /// Take a snapshot, rejecting an empty symptom set.
    pub fn snapshot(
        symptoms: &SymptomSet,
        demographics: &Demographics,
        staging: &FileStaging,
    ) -> Result<Self, DomainError> {
        if symptoms.is_empty() {
            return Err(DomainError::EmptySymptoms);
        }
        Ok(Self {
            symptoms: symptoms.to_vec(),
            demographics: demographics.clone(),
            lab_reports: staging.files().to_vec(),
        })
    }

    pub fn symptoms(&self) -> &[Symptom] {
        &self.symptoms
    }

    pub fn symptom_labels(&self) -> Vec<&str> {
        self.symptoms.iter().map(Symptom::label).collect()
    }

    pub fn demographics(&self) -> &Demographics {
        &self.demographics
    }

    pub fn lab_reports(&self) -> &[StagedFile] {
        &self.lab_reports
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prediction::demographics::DemographicField;
    use crate::staging::entities::FileHandle;

    #[test]
    fn test_empty_symptoms_rejected() {
        let result = PredictionRequest::snapshot(
            &SymptomSet::new(),
            &Demographics::new(),
            &FileStaging::new(),
        );
        assert_eq!(result, Err(DomainError::EmptySymptoms));
    }

    #[test]
    fn test_snapshot_is_detached_from_session() {
        let mut symptoms = SymptomSet::new();
        symptoms.add("fever");
        let mut staging = FileStaging::new();
        staging
            .stage(vec![FileHandle::new("cbc.png", "image/png", vec![1, 2, 3])])
            .unwrap();
        let demographics = Demographics::new().with(DemographicField::Age, "40");

        let request = PredictionRequest::snapshot(&symptoms, &demographics, &staging).unwrap();

        symptoms.add("cough");
        staging.clear();

        assert_eq!(request.symptom_labels(), vec!["fever"]);
        assert_eq!(request.lab_reports().len(), 1);
        assert_eq!(request.demographics().get(DemographicField::Age), Some("40"));
    }
}
