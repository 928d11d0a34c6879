use super::derivation::ObservedSymptoms;
use super::knowledge::KnowledgeBase;
use crate::models::{Condition, Symptom};

// ---------------------------------------------------------------------------
// Sequential naive-Bayes update
// ---------------------------------------------------------------------------

/// One step of the chain.
///
/// present: `P(s|c) * p / P(s)`
/// absent:  `(1 - P(s|c)) * p / (1 - P(s))`
pub fn update_for_symptom(posterior: f64, likelihood: f64, base_rate: f64, present: bool) -> f64 {
    if present {
        (likelihood * posterior) / base_rate
    } else {
        ((1.0 - likelihood) * posterior) / (1.0 - base_rate)
    }
}

/// Fold every symptom, in fixed order, into the prior of `condition`.
///
/// Symptoms are treated as independent given the condition and the chain is
/// never renormalised, so enough present symptoms push the result above 1.
pub fn posterior_after_symptoms(
    kb: &KnowledgeBase,
    condition: Condition,
    symptoms: &ObservedSymptoms,
) -> f64 {
    Symptom::ALL.iter().fold(kb.prior(condition), |posterior, &symptom| {
        update_for_symptom(
            posterior,
            kb.likelihood(condition, symptom),
            kb.base_rate(symptom),
            symptoms.is_present(symptom),
        )
    })
}
