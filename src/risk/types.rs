use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::derivation::ObservedSymptoms;
use crate::models::{Condition, PatientObservation, RiskEstimate};

// ---------------------------------------------------------------------------
// PosteriorTrace
// ---------------------------------------------------------------------------

/// Where in the pipeline a posterior value was taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Prior,
    Symptoms,
    Age,
    Gender,
    Override,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Prior => "prior",
            Self::Symptoms => "symptoms",
            Self::Age => "age",
            Self::Gender => "gender",
            Self::Override => "override",
        }
    }
}

/// Posterior of one condition after each step, before the final clamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PosteriorTrace {
    pub condition: Condition,
    pub prior: f64,
    pub after_symptoms: f64,
    pub after_age: f64,
    pub after_gender: f64,
    pub after_override: f64,
    /// Clamped, scaled and rounded.
    pub percentage: f64,
}

impl PosteriorTrace {
    pub fn stages(&self) -> [(Stage, f64); 5] {
        [
            (Stage::Prior, self.prior),
            (Stage::Symptoms, self.after_symptoms),
            (Stage::Age, self.after_age),
            (Stage::Gender, self.after_gender),
            (Stage::Override, self.after_override),
        ]
    }
}

// ---------------------------------------------------------------------------
// RiskReport
// ---------------------------------------------------------------------------

/// A complete, explained assessment of one observation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskReport {
    pub id: Uuid,
    pub assessed_at: NaiveDateTime,
    pub observation: PatientObservation,
    pub symptoms: ObservedSymptoms,
    pub traces: Vec<PosteriorTrace>,
    pub estimate: RiskEstimate,
}

// ---------------------------------------------------------------------------
// RiskError
// ---------------------------------------------------------------------------

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RiskError {
    #[error("Invalid probability in {table} for {key}: {value}")]
    InvalidProbability {
        table: String,
        key: String,
        value: f64,
    },

    #[error("Knowledge base {table} has no entry for {key}")]
    MissingEntry { table: String, key: String },

    #[error("Invalid {field} value: {value}")]
    InvalidEnum { field: String, value: String },

    #[error("Posterior for {condition} is not finite after the {stage} step")]
    NonFinitePosterior { condition: String, stage: String },

    #[error("Invalid intake: {0}")]
    InvalidIntake(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<std::io::Error> for RiskError {
    fn from(e: std::io::Error) -> Self {
        RiskError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for RiskError {
    fn from(e: serde_json::Error) -> Self {
        RiskError::Serialization(e.to_string())
    }
}

// ---------------------------------------------------------------------------
// RiskEstimator trait
// ---------------------------------------------------------------------------

/// Maps one observation to a per-condition risk estimate.
pub trait RiskEstimator {
    /// Percentages only. Deterministic for a given observation.
    fn estimate(&self, observation: &PatientObservation) -> Result<RiskEstimate, RiskError>;

    /// Percentages plus the derived symptoms and every intermediate posterior.
    fn assess(&self, observation: &PatientObservation) -> Result<RiskReport, RiskError>;
}
