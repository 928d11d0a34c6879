use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::enums::Condition;

/// Top percentage strictly above which the assessment reads as High.
pub const HIGH_ABOVE_PERCENT: f64 = 60.0;

/// Per-condition risk, as a percentage in [0, 95] with 2 decimals.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RiskEstimate {
    percentages: BTreeMap<Condition, f64>,
}

/// One condition with its percentage, for ranked display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub label: Condition,
    pub confidence: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Moderate,
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Moderate => "Moderate",
            Self::High => "High",
        }
    }

    pub fn from_percentage(percentage: f64) -> Self {
        if percentage > HIGH_ABOVE_PERCENT {
            Self::High
        } else {
            Self::Moderate
        }
    }
}

impl RiskEstimate {
    pub fn from_percentages(percentages: BTreeMap<Condition, f64>) -> Self {
        Self { percentages }
    }

    pub fn get(&self, condition: Condition) -> Option<f64> {
        self.percentages.get(&condition).copied()
    }

    pub fn covid19(&self) -> f64 {
        self.get(Condition::Covid19).unwrap_or(0.0)
    }

    pub fn pneumonia(&self) -> f64 {
        self.get(Condition::Pneumonia).unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Condition, f64)> + '_ {
        self.percentages.iter().map(|(c, p)| (*c, *p))
    }

    /// Conditions by descending percentage. Ties keep the fixed condition order.
    pub fn ranked(&self) -> Vec<Prediction> {
        let mut predictions: Vec<Prediction> = self
            .iter()
            .map(|(label, confidence)| Prediction { label, confidence })
            .collect();
        predictions.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        predictions
    }

    pub fn top(&self) -> Option<Prediction> {
        self.ranked().into_iter().next()
    }

    /// Severity of the most likely condition. An empty estimate is Moderate.
    pub fn severity(&self) -> Severity {
        self.top()
            .map(|p| Severity::from_percentage(p.confidence))
            .unwrap_or(Severity::Moderate)
    }
}
