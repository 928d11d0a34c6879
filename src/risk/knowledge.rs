use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::types::RiskError;
use crate::models::{Condition, Symptom};

const CONDITIONS: usize = 2;
const SYMPTOMS: usize = 6;

/// Knowledge base in mapping form: the shape it is authored and printed in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeTables {
    /// P(condition) in the general population.
    pub priors: BTreeMap<Condition, f64>,
    /// P(symptom | condition).
    pub likelihood: BTreeMap<Condition, BTreeMap<Symptom, f64>>,
    /// P(symptom) in the general population.
    pub base_rates: BTreeMap<Symptom, f64>,
}

impl KnowledgeTables {
    /// The hand-authored tables.
    pub fn standard() -> Self {
        use Condition::*;
        use Symptom::*;

        Self {
            priors: BTreeMap::from([(Covid19, 0.05), (Pneumonia, 0.03)]),
            likelihood: BTreeMap::from([
                (
                    Covid19,
                    BTreeMap::from([
                        (Cough, 0.65),
                        (Headache, 0.60),
                        (LossOfSmell, 0.70),
                        (Fever, 0.75),
                        (HighHeartRate, 0.40),
                        (HighBloodPressure, 0.30),
                    ]),
                ),
                (
                    Pneumonia,
                    BTreeMap::from([
                        (Cough, 0.80),
                        (Headache, 0.35),
                        (LossOfSmell, 0.10),
                        (Fever, 0.80),
                        (HighHeartRate, 0.60),
                        (HighBloodPressure, 0.25),
                    ]),
                ),
            ]),
            base_rates: BTreeMap::from([
                (Cough, 0.15),
                (Headache, 0.25),
                (LossOfSmell, 0.10),
                (Fever, 0.05),
                (HighHeartRate, 0.10),
                (HighBloodPressure, 0.20),
            ]),
        }
    }
}

/// Validated, immutable knowledge base.
///
/// Every likelihood and base rate is strictly inside (0, 1) and every
/// condition covers every symptom, so the update never divides by zero
/// on account of the tables. Cheap to share by reference across threads.
#[derive(Debug, Clone, PartialEq)]
pub struct KnowledgeBase {
    priors: [f64; CONDITIONS],
    likelihood: [[f64; SYMPTOMS]; CONDITIONS],
    base_rates: [f64; SYMPTOMS],
}

impl KnowledgeBase {
    pub fn standard() -> Result<Self, RiskError> {
        Self::from_tables(&KnowledgeTables::standard())
    }

    pub fn from_tables(tables: &KnowledgeTables) -> Result<Self, RiskError> {
        let mut priors = [0.0; CONDITIONS];
        let mut likelihood = [[0.0; SYMPTOMS]; CONDITIONS];
        let mut base_rates = [0.0; SYMPTOMS];

        for &symptom in Symptom::ALL {
            let rate = lookup(&tables.base_rates, symptom, "base_rates")?;
            base_rates[symptom.index()] = open_unit(rate, "base_rates", symptom.as_str())?;
        }

        for &condition in Condition::ALL {
            let prior = lookup(&tables.priors, condition, "priors")?;
            if !prior.is_finite() || !(0.0..=1.0).contains(&prior) {
                return Err(RiskError::InvalidProbability {
                    table: "priors".into(),
                    key: condition.as_str().into(),
                    value: prior,
                });
            }
            priors[condition.index()] = prior;

            let table = format!("likelihood[{condition}]");
            let row = tables
                .likelihood
                .get(&condition)
                .ok_or_else(|| RiskError::MissingEntry {
                    table: "likelihood".into(),
                    key: condition.as_str().into(),
                })?;
            for &symptom in Symptom::ALL {
                let p = lookup(row, symptom, &table)?;
                likelihood[condition.index()][symptom.index()] =
                    open_unit(p, &table, symptom.as_str())?;
            }
        }

        Ok(Self {
            priors,
            likelihood,
            base_rates,
        })
    }

    pub fn prior(&self, condition: Condition) -> f64 {
        self.priors[condition.index()]
    }

    pub fn likelihood(&self, condition: Condition, symptom: Symptom) -> f64 {
        self.likelihood[condition.index()][symptom.index()]
    }

    pub fn base_rate(&self, symptom: Symptom) -> f64 {
        self.base_rates[symptom.index()]
    }

    /// Back to mapping form, e.g. for display.
    pub fn tables(&self) -> KnowledgeTables {
        KnowledgeTables {
            priors: Condition::ALL.iter().map(|&c| (c, self.prior(c))).collect(),
            likelihood: Condition::ALL
                .iter()
                .map(|&c| {
                    let row: BTreeMap<Symptom, f64> = Symptom::ALL
                        .iter()
                        .map(|&s| (s, self.likelihood(c, s)))
                        .collect();
                    (c, row)
                })
                .collect(),
            base_rates: Symptom::ALL.iter().map(|&s| (s, self.base_rate(s))).collect(),
        }
    }
}

fn lookup<K>(map: &BTreeMap<K, f64>, key: K, table: &str) -> Result<f64, RiskError>
where
    K: Ord + std::fmt::Display,
{
    map.get(&key).copied().ok_or_else(|| RiskError::MissingEntry {
        table: table.into(),
        key: key.to_string(),
    })
}

fn open_unit(value: f64, table: &str, key: &str) -> Result<f64, RiskError> {
    if value.is_finite() && value > 0.0 && value < 1.0 {
        Ok(value)
    } else {
        Err(RiskError::InvalidProbability {
            table: table.into(),
            key: key.into(),
            value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_tables_are_valid() {
        let kb = KnowledgeBase::standard().unwrap();
        assert_eq!(kb.prior(Condition::Covid19), 0.05);
        assert_eq!(kb.prior(Condition::Pneumonia), 0.03);
        assert_eq!(kb.likelihood(Condition::Covid19, Symptom::LossOfSmell), 0.70);
        assert_eq!(kb.likelihood(Condition::Pneumonia, Symptom::Cough), 0.80);
        assert_eq!(kb.base_rate(Symptom::Fever), 0.05);
        assert_eq!(kb.base_rate(Symptom::HighBloodPressure), 0.20);
    }

    #[test]
    fn tables_roundtrip() {
        let kb = KnowledgeBase::standard().unwrap();
        assert_eq!(kb.tables(), KnowledgeTables::standard());
    }

    #[test]
    fn base_rate_of_one_rejected() {
        let mut tables = KnowledgeTables::standard();
        tables.base_rates.insert(Symptom::Fever, 1.0);
        let err = KnowledgeBase::from_tables(&tables).unwrap_err();
        assert_eq!(
            err,
            RiskError::InvalidProbability {
                table: "base_rates".into(),
                key: "fever".into(),
                value: 1.0,
            }
        );
    }

    #[test]
    fn likelihood_of_zero_rejected() {
        let mut tables = KnowledgeTables::standard();
        tables
            .likelihood
            .get_mut(&Condition::Pneumonia)
            .unwrap()
            .insert(Symptom::Headache, 0.0);
        let err = KnowledgeBase::from_tables(&tables).unwrap_err();
        assert!(matches!(
            err,
            RiskError::InvalidProbability { ref table, ref key, .. }
                if table == "likelihood[Pneumonia]" && key == "headache"
        ));
    }

    #[test]
    fn nan_probability_rejected() {
        let mut tables = KnowledgeTables::standard();
        tables.base_rates.insert(Symptom::Cough, f64::NAN);
        assert!(matches!(
            KnowledgeBase::from_tables(&tables),
            Err(RiskError::InvalidProbability { .. })
        ));
    }

    #[test]
    fn prior_bounds_are_inclusive() {
        let mut tables = KnowledgeTables::standard();
        tables.priors.insert(Condition::Covid19, 0.0);
        assert!(KnowledgeBase::from_tables(&tables).is_ok());
        tables.priors.insert(Condition::Covid19, 1.2);
        assert!(matches!(
            KnowledgeBase::from_tables(&tables),
            Err(RiskError::InvalidProbability { .. })
        ));
    }

    #[test]
    fn missing_symptom_rejected() {
        let mut tables = KnowledgeTables::standard();
        tables
            .likelihood
            .get_mut(&Condition::Covid19)
            .unwrap()
            .remove(&Symptom::HighHeartRate);
        let err = KnowledgeBase::from_tables(&tables).unwrap_err();
        assert_eq!(
            err,
            RiskError::MissingEntry {
                table: "likelihood[Covid-19]".into(),
                key: "high_heart_rate".into(),
            }
        );
    }

    #[test]
    fn missing_condition_rejected() {
        let mut tables = KnowledgeTables::standard();
        tables.likelihood.remove(&Condition::Pneumonia);
        assert!(matches!(
            KnowledgeBase::from_tables(&tables),
            Err(RiskError::MissingEntry { .. })
        ));
    }

    #[test]
    fn tables_serialize_with_exact_names() {
        let json = serde_json::to_value(KnowledgeTables::standard()).unwrap();
        assert_eq!(json["priors"]["Covid-19"], 0.05);
        assert_eq!(json["likelihood"]["Pneumonia"]["loss_of_smell"], 0.10);
        assert_eq!(json["base_rates"]["high_bp"], 0.20);
    }
}
