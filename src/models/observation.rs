use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::enums::Gender;
use crate::risk::RiskError;

/// One patient observation, as the estimator consumes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientObservation {
    /// mmHg
    pub systolic_pressure: i32,
    /// mmHg
    pub diastolic_pressure: i32,
    /// Celsius
    pub temperature: f64,
    /// bpm
    pub heart_rate: i32,
    pub has_cough: bool,
    pub has_headache: bool,
    /// `false` means loss of smell.
    pub can_smell: bool,
    /// Years.
    pub age: f64,
    #[serde(default)]
    pub gender: Gender,
    #[serde(default)]
    pub has_pneumonia: bool,
}

impl PatientObservation {
    /// Fields whose values fall outside a physiologically meaningful range.
    /// These are reported, not rejected.
    pub fn implausible_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.systolic_pressure <= 0 {
            fields.push("systolic_pressure");
        }
        if self.diastolic_pressure <= 0 {
            fields.push("diastolic_pressure");
        }
        if !self.temperature.is_finite() || !(30.0..=45.0).contains(&self.temperature) {
            fields.push("temperature");
        }
        if self.heart_rate <= 0 {
            fields.push("heart_rate");
        }
        if !self.age.is_finite() || self.age < 0.0 {
            fields.push("age");
        }
        fields
    }
}

/// Vitals as submitted by the intake form. Age comes in as a birthdate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VitalsIntake {
    pub temperature: f64,
    #[serde(rename = "systolicBP")]
    pub systolic_bp: i32,
    #[serde(rename = "diastolicBP")]
    pub diastolic_bp: i32,
    pub heart_rate: i32,
    /// YYYY-MM-DD
    pub birthdate: String,
    #[serde(default)]
    pub gender: Gender,
    pub has_cough: bool,
    pub has_headaches: bool,
    pub can_smell_taste: bool,
    #[serde(default)]
    pub has_pneumonia: bool,
}

impl VitalsIntake {
    /// Convert to an observation, taking age in completed years at `today`.
    pub fn to_observation(&self, today: NaiveDate) -> Result<PatientObservation, RiskError> {
        let born = NaiveDate::parse_from_str(self.birthdate.trim(), "%Y-%m-%d").map_err(|e| {
            RiskError::InvalidIntake(format!("birthdate '{}': {e}", self.birthdate))
        })?;
        let years = today.years_since(born).ok_or_else(|| {
            RiskError::InvalidIntake(format!(
                "birthdate {born} is after the assessment date {today}"
            ))
        })?;

        Ok(PatientObservation {
            systolic_pressure: self.systolic_bp,
            diastolic_pressure: self.diastolic_bp,
            temperature: self.temperature,
            heart_rate: self.heart_rate,
            has_cough: self.has_cough,
            has_headache: self.has_headaches,
            can_smell: self.can_smell_taste,
            age: f64::from(years),
            gender: self.gender,
            has_pneumonia: self.has_pneumonia,
        })
    }
}
