//! Body-mass index

use super::demographics::{DemographicField, Demographics};
use crate::core::error::DomainError;

/// WHO adult BMI categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub fn from_value(bmi: f64) -> Self {
        if bmi < 18.5 {
            Self::Underweight
        } else if bmi < 25.0 {
            Self::Normal
        } else if bmi < 30.0 {
            Self::Overweight
        } else {
            Self::Obese
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Underweight => "Underweight",
            Self::Normal => "Normal",
            Self::Overweight => "Overweight",
            Self::Obese => "Obese",
        }
    }
}

/// A computed body-mass index
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bmi {
    value: f64,
    category: BmiCategory,
}

impl Bmi {
    /// Compute from weight in kilograms and height in centimeters
    pub fn from_metric(weight_kg: f64, height_cm: f64) -> Result<Self, DomainError> {
        if !(weight_kg.is_finite() && weight_kg > 0.0) || !(height_cm.is_finite() && height_cm > 0.0)
        {
            return Err(DomainError::InvalidMeasurement(
                "Please enter valid weight and height.".to_string(),
            ));
        }

        let meters = height_cm / 100.0;
        let value = weight_kg / (meters * meters);
        Ok(Self {
            value,
            category: BmiCategory::from_value(value),
        })
    }

    /// Compute from the free-text weight and height fields
    pub fn from_demographics(demographics: &Demographics) -> Result<Self, DomainError> {
        let weight = parse_measurement(demographics, DemographicField::Weight)?;
        let height = parse_measurement(demographics, DemographicField::Height)?;
        Self::from_metric(weight, height)
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn category(&self) -> BmiCategory {
        self.category
    }
}

impl std::fmt::Display for Bmi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BMI: {:.1} ({})", self.value, self.category.as_str())
    }
}

fn parse_measurement(demographics: &Demographics, field: DemographicField) -> Result<f64, DomainError> {
    demographics
        .get(field)
        .and_then(leading_number)
        .ok_or_else(|| {
            DomainError::InvalidMeasurement("Please enter valid weight and height.".to_string())
        })
}

/// Longest numeric prefix of `text`, so "70kg" reads as 70 and "kg70" as nothing
fn leading_number(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let numeric_len = text
        .find(|c: char| !(c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E')))
        .unwrap_or(text.len());
    (1..=numeric_len)
        .rev()
        .find_map(|end| text[..end].parse::<f64>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normal_bmi() {
        let bmi = Bmi::from_metric(70.0, 175.0).unwrap();
        assert_eq!(format!("{:.1}", bmi.value()), "22.9");
        assert_eq!(bmi.category(), BmiCategory::Normal);
        assert_eq!(bmi.to_string(), "BMI: 22.9 (Normal)");
    }

    #[test]
    fn test_category_boundaries() {
        assert_eq!(BmiCategory::from_value(18.4), BmiCategory::Underweight);
        assert_eq!(BmiCategory::from_value(18.5), BmiCategory::Normal);
        assert_eq!(BmiCategory::from_value(25.0), BmiCategory::Overweight);
        assert_eq!(BmiCategory::from_value(30.0), BmiCategory::Obese);
    }

    #[test]
    fn test_rejects_non_positive() {
        assert!(Bmi::from_metric(70.0, 0.0).is_err());
        assert!(Bmi::from_metric(-1.0, 170.0).is_err());
        assert!(Bmi::from_metric(f64::NAN, 170.0).is_err());
    }

    #[test]
    fn test_from_demographics() {
        let demo = Demographics::new()
            .with(DemographicField::Weight, "95")
            .with(DemographicField::Height, "170");
        let bmi = Bmi::from_demographics(&demo).unwrap();
        assert_eq!(bmi.category(), BmiCategory::Obese);
    }

    #[test]
    fn test_from_demographics_requires_numbers() {
        let demo = Demographics::new()
            .with(DemographicField::Weight, "heavy")
            .with(DemographicField::Height, "170");
        assert!(matches!(
            Bmi::from_demographics(&demo),
            Err(DomainError::InvalidMeasurement(_))
        ));
        assert!(Bmi::from_demographics(&Demographics::new()).is_err());
    }

    #[test]
    fn test_measurement_units_after_number_are_ignored() {
        let demo = Demographics::new()
            .with(DemographicField::Weight, "70kg")
            .with(DemographicField::Height, "175 cm");
        let bmi = Bmi::from_demographics(&demo).unwrap();
        assert_eq!(format!("{:.1}", bmi.value()), "22.9");
    }

    #[test]
    fn test_leading_number() {
        assert_eq!(leading_number("70kg"), Some(70.0));
        assert_eq!(leading_number("  72.5 kg"), Some(72.5));
        assert_eq!(leading_number("1.8e2cm"), Some(180.0));
        assert_eq!(leading_number("3e"), Some(3.0));
        assert_eq!(leading_number("kg70"), None);
        assert_eq!(leading_number("-"), None);
    }
}
