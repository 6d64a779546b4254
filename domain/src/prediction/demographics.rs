//! Optional demographic fields sent with a prediction

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// One of the four optional demographic fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DemographicField {
    Age,
    Gender,
    Weight,
    Height,
}

impl DemographicField {
    pub const ALL: [DemographicField; 4] = [Self::Age, Self::Gender, Self::Weight, Self::Height];

    /// Form field name used on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Age => "age",
            Self::Gender => "gender",
            Self::Weight => "weight",
            Self::Height => "height",
        }
    }
}

impl std::fmt::Display for DemographicField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DemographicField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "age" => Ok(Self::Age),
            "gender" | "sex" => Ok(Self::Gender),
            "weight" => Ok(Self::Weight),
            "height" => Ok(Self::Height),
            other => Err(format!("unknown demographic field: {}", other)),
        }
    }
}

/// Free-text demographic inputs.
///
/// Values are kept as entered. A blank value counts as absent, so only
/// present fields are ever serialized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Demographics {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    /// Weight in kilograms
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,
    /// Height in centimeters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
}

impl Demographics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: DemographicField, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// Set a field; blank input clears it
    pub fn set(&mut self, field: DemographicField, value: impl Into<String>) {
        let value = value.into();
        let value = if value.trim().is_empty() {
            None
        } else {
            Some(value.trim().to_string())
        };
        *self.slot_mut(field) = value;
    }

    pub fn get(&self, field: DemographicField) -> Option<&str> {
        match field {
            DemographicField::Age => self.age.as_deref(),
            DemographicField::Gender => self.gender.as_deref(),
            DemographicField::Weight => self.weight.as_deref(),
            DemographicField::Height => self.height.as_deref(),
        }
    }

    /// Present fields in wire order (age, gender, weight, height)
    pub fn present_fields(&self) -> Vec<(DemographicField, &str)> {
        DemographicField::ALL
            .iter()
            .filter_map(|field| self.get(*field).map(|v| (*field, v)))
            .collect()
    }

    fn slot_mut(&mut self, field: DemographicField) -> &mut Option<String> {
        match field {
            DemographicField::Age => &mut self.age,
            DemographicField::Gender => &mut self.gender,
            DemographicField::Weight => &mut self.weight,
            DemographicField::Height => &mut self.height,
        }
    }
}
