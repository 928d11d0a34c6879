use std::collections::BTreeMap;

use uuid::Uuid;

use super::adjustments::{
    adjust_for_age, adjust_for_gender, apply_confirmed_pneumonia, to_percentage,
};
use super::bayes::posterior_after_symptoms;
use super::derivation::ObservedSymptoms;
use super::knowledge::KnowledgeBase;
use super::types::{PosteriorTrace, RiskError, RiskEstimator, RiskReport, Stage};
use crate::models::{Condition, PatientObservation, RiskEstimate};

/// Default implementation of the risk estimator.
/// Holds the knowledge base it was given; carries no other state.
pub struct DefaultRiskEngine {
    pub(crate) knowledge: KnowledgeBase,
}

impl DefaultRiskEngine {
    pub fn new(knowledge: KnowledgeBase) -> Self {
        Self { knowledge }
    }

    /// Engine over the hand-authored tables.
    pub fn standard() -> Result<Self, RiskError> {
        Ok(Self::new(KnowledgeBase::standard()?))
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    /// Run every step for one condition.
    fn trace_condition(
        &self,
        condition: Condition,
        obs: &PatientObservation,
        symptoms: &ObservedSymptoms,
    ) -> Result<PosteriorTrace, RiskError> {
        let prior = self.knowledge.prior(condition);
        let after_symptoms = posterior_after_symptoms(&self.knowledge, condition, symptoms);
        let after_age = adjust_for_age(after_symptoms, obs.age);
        let after_gender = adjust_for_gender(after_age, obs.gender.is_male());
        let after_override = apply_confirmed_pneumonia(condition, after_gender, obs.has_pneumonia);

        let trace = PosteriorTrace {
            condition,
            prior,
            after_symptoms,
            after_age,
            after_gender,
            after_override,
            percentage: to_percentage(after_override),
        };

        for (stage, value) in trace.stages() {
            if !value.is_finite() {
                return Err(RiskError::NonFinitePosterior {
                    condition: condition.as_str().into(),
                    stage: stage.as_str().into(),
                });
            }
        }

        // Known fragility of the chained update; reported, not corrected.
        if let Some((stage, value)) = trace
            .stages()
            .into_iter()
            .find(|(stage, v)| *stage != Stage::Prior && !(0.0..=1.0).contains(v))
        {
            tracing::warn!(
                condition = %condition,
                stage = stage.as_str(),
                posterior = value,
                "Posterior left [0, 1] before the final clamp"
            );
        }

        Ok(trace)
    }

    fn traces(
        &self,
        obs: &PatientObservation,
        symptoms: &ObservedSymptoms,
    ) -> Result<Vec<PosteriorTrace>, RiskError> {
        Condition::ALL
            .iter()
            .map(|&c| self.trace_condition(c, obs, symptoms))
            .collect()
    }
}

fn estimate_from(traces: &[PosteriorTrace]) -> RiskEstimate {
    let percentages: BTreeMap<Condition, f64> =
        traces.iter().map(|t| (t.condition, t.percentage)).collect();
    RiskEstimate::from_percentages(percentages)
}

impl RiskEstimator for DefaultRiskEngine {
    fn estimate(&self, observation: &PatientObservation) -> Result<RiskEstimate, RiskError> {
        let symptoms = ObservedSymptoms::derive(observation);
        let traces = self.traces(observation, &symptoms)?;
        Ok(estimate_from(&traces))
    }

    fn assess(&self, observation: &PatientObservation) -> Result<RiskReport, RiskError> {
        let implausible = observation.implausible_fields();
        if !implausible.is_empty() {
            tracing::warn!(
                fields = ?implausible,
                "Observation outside physiological range; estimating anyway"
            );
        }

        let symptoms = ObservedSymptoms::derive(observation);
        tracing::debug!(present = ?symptoms.present(), "Derived symptoms");

        let traces = self.traces(observation, &symptoms)?;
        let estimate = estimate_from(&traces);

        let report = RiskReport {
            id: Uuid::new_v4(),
            assessed_at: chrono::Local::now().naive_local(),
            observation: observation.clone(),
            symptoms,
            traces,
            estimate,
        };

        tracing::info!(
            report_id = %report.id,
            covid19 = report.estimate.covid19(),
            pneumonia = report.estimate.pneumonia(),
            severity = report.estimate.severity().as_str(),
            "Risk assessment complete"
        );

        Ok(report)
    }
}
