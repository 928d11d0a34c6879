use std::io::Write;

use serde::Serialize;

use crate::models::{Gender, PatientObservation, RiskEstimate};
use crate::risk::{RiskError, RiskEstimator};

/// A named manual acceptance case for the estimator.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub name: &'static str,
    pub observation: PatientObservation,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioOutcome {
    pub name: &'static str,
    pub parameters: PatientObservation,
    pub results: RiskEstimate,
}

#[allow(clippy::too_many_arguments)]
fn observation(
    systolic_pressure: i32,
    diastolic_pressure: i32,
    temperature: f64,
    heart_rate: i32,
    has_cough: bool,
    has_headache: bool,
    can_smell: bool,
    age: f64,
    gender: &str,
    has_pneumonia: bool,
) -> PatientObservation {
    PatientObservation {
        systolic_pressure,
        diastolic_pressure,
        temperature,
        heart_rate,
        has_cough,
        has_headache,
        can_smell,
        age,
        gender: Gender::parse(gender),
        has_pneumonia,
    }
}

// ---------------------------------------------------------------------------
// Reference scenarios
// ---------------------------------------------------------------------------

/// The five reference scenarios, in presentation order.
pub fn reference_scenarios() -> Vec<Scenario> {
    vec![
        Scenario {
            name: "Healthy Individual",
            observation: observation(120, 75, 36.8, 72, false, false, true, 35.0, "F", false),
        },
        Scenario {
            name: "COVID-19 Typical Presentation",
            observation: observation(135, 85, 38.5, 95, true, true, false, 45.0, "M", false),
        },
        Scenario {
            name: "Pneumonia Confirmed",
            observation: observation(125, 78, 39.0, 110, true, false, true, 68.0, "M", true),
        },
        Scenario {
            name: "Older Patient with Borderline Vitals",
            observation: observation(145, 90, 37.9, 92, true, true, true, 75.0, "F", false),
        },
        Scenario {
            name: "Likely Both Conditions",
            observation: observation(140, 88, 38.7, 105, true, true, false, 62.0, "M", true),
        },
    ]
}

// ---------------------------------------------------------------------------
// Printout
// ---------------------------------------------------------------------------

/// Estimate every scenario. Stops at the first fault.
pub fn evaluate<E: RiskEstimator>(
    engine: &E,
    scenarios: &[Scenario],
) -> Result<Vec<ScenarioOutcome>, RiskError> {
    scenarios
        .iter()
        .map(|s| {
            Ok(ScenarioOutcome {
                name: s.name,
                parameters: s.observation.clone(),
                results: engine.estimate(&s.observation)?,
            })
        })
        .collect()
}

/// Print one outcome as a titled block.
pub fn print_outcome<W: Write>(out: &mut W, outcome: &ScenarioOutcome) -> Result<(), RiskError> {
    writeln!(out)?;
    writeln!(out, "=== {} ===", outcome.name)?;
    writeln!(out, "Parameters: {}", serde_json::to_string(&outcome.parameters)?)?;
    writeln!(out, "Results: {}", serde_json::to_string(&outcome.results)?)?;
    Ok(())
}

/// Prints every reference scenario as name, parameters, results.
pub fn run_all<E: RiskEstimator, W: Write>(engine: &E, out: &mut W) -> Result<(), RiskError> {
    for outcome in evaluate(engine, &reference_scenarios())? {
        print_outcome(out, &outcome)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::risk::DefaultRiskEngine;

    fn outcomes() -> Vec<ScenarioOutcome> {
        let engine = DefaultRiskEngine::standard().unwrap();
        evaluate(&engine, &reference_scenarios()).unwrap()
    }

    fn find<'a>(outcomes: &'a [ScenarioOutcome], name: &str) -> &'a ScenarioOutcome {
        outcomes.iter().find(|o| o.name == name).unwrap()
    }

    #[test]
    fn healthy_individual_baseline() {
        let all = outcomes();
        let healthy = find(&all, "Healthy Individual");
        assert!((healthy.results.covid19() - 0.06).abs() < 1e-9);
        assert!((healthy.results.pneumonia() - 0.06).abs() < 1e-9);
    }

    #[test]
    fn healthy_well_below_typical_presentation() {
        let all = outcomes();
        let healthy = &find(&all, "Healthy Individual").results;
        let typical = &find(&all, "COVID-19 Typical Presentation").results;
        assert!(healthy.covid19() < typical.covid19());
        assert!(healthy.pneumonia() < typical.pneumonia());
    }

    #[test]
    fn symptomatic_scenarios_reach_the_ceiling() {
        for outcome in outcomes().iter().skip(1) {
            assert_eq!(outcome.results.covid19(), 95.0, "{}", outcome.name);
            assert_eq!(outcome.results.pneumonia(), 95.0, "{}", outcome.name);
        }
    }

    #[test]
    fn confirmed_pneumonia_scenarios_hold_override() {
        for outcome in outcomes().iter().filter(|o| o.parameters.has_pneumonia) {
            assert_eq!(outcome.results.pneumonia(), 95.0);
            assert!(outcome.results.covid19() >= 30.0);
        }
    }

    #[test]
    fn single_letter_gender_is_not_male() {
        for s in reference_scenarios() {
            assert_eq!(s.observation.gender, Gender::Other, "{}", s.name);
        }
    }

    #[test]
    fn printout_format() {
        let engine = DefaultRiskEngine::standard().unwrap();
        let mut buf = Vec::new();
        run_all(&engine, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.starts_with("\n=== Healthy Individual ===\n"));
        assert_eq!(text.matches("=== ").count(), 5);
        assert_eq!(text.matches("Parameters: ").count(), 5);
        assert!(text.contains(r#"Results: {"Covid-19":0.06,"Pneumonia":0.06}"#));
        assert!(text.contains(r#"Results: {"Covid-19":95.0,"Pneumonia":95.0}"#));
    }
}
