use serde::{Deserialize, Serialize};

use crate::models::{PatientObservation, Symptom};

/// Fever above this temperature (Celsius, strict).
pub const FEVER_THRESHOLD_C: f64 = 37.8;
/// Elevated heart rate above this rate (bpm, strict).
pub const ELEVATED_HEART_RATE_BPM: i32 = 90;
/// High blood pressure above either value (mmHg, strict).
pub const HIGH_SYSTOLIC_MMHG: i32 = 130;
pub const HIGH_DIASTOLIC_MMHG: i32 = 80;

/// Presence of every symptom, derived once from the raw observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ObservedSymptoms {
    pub cough: bool,
    pub headache: bool,
    pub loss_of_smell: bool,
    pub fever: bool,
    pub high_heart_rate: bool,
    pub high_bp: bool,
}

impl ObservedSymptoms {
    pub fn derive(obs: &PatientObservation) -> Self {
        Self {
            cough: obs.has_cough,
            headache: obs.has_headache,
            loss_of_smell: !obs.can_smell,
            fever: obs.temperature > FEVER_THRESHOLD_C,
            high_heart_rate: obs.heart_rate > ELEVATED_HEART_RATE_BPM,
            high_bp: obs.systolic_pressure > HIGH_SYSTOLIC_MMHG
                || obs.diastolic_pressure > HIGH_DIASTOLIC_MMHG,
        }
    }

    pub fn is_present(&self, symptom: Symptom) -> bool {
        match symptom {
            Symptom::Cough => self.cough,
            Symptom::Headache => self.headache,
            Symptom::LossOfSmell => self.loss_of_smell,
            Symptom::Fever => self.fever,
            Symptom::HighHeartRate => self.high_heart_rate,
            Symptom::HighBloodPressure => self.high_bp,
        }
    }

    /// Present symptoms, in update order.
    pub fn present(&self) -> Vec<Symptom> {
        Symptom::ALL
            .iter()
            .copied()
            .filter(|&s| self.is_present(s))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Gender;

    fn base() -> PatientObservation {
        PatientObservation {
            systolic_pressure: 120,
            diastolic_pressure: 75,
            temperature: 36.8,
            heart_rate: 72,
            has_cough: false,
            has_headache: false,
            can_smell: true,
            age: 35.0,
            gender: Gender::Other,
            has_pneumonia: false,
        }
    }

    #[test]
    fn healthy_has_no_symptoms() {
        let s = ObservedSymptoms::derive(&base());
        assert_eq!(s, ObservedSymptoms::default());
        assert!(s.present().is_empty());
    }

    #[test]
    fn flags_pass_through_and_smell_is_negated() {
        let obs = PatientObservation {
            has_cough: true,
            has_headache: true,
            can_smell: false,
            ..base()
        };
        let s = ObservedSymptoms::derive(&obs);
        assert_eq!(
            s.present(),
            vec![Symptom::Cough, Symptom::Headache, Symptom::LossOfSmell]
        );
    }

    #[test]
    fn thresholds_are_strict() {
        let at = PatientObservation {
            temperature: 37.8,
            heart_rate: 90,
            systolic_pressure: 130,
            diastolic_pressure: 80,
            ..base()
        };
        assert!(ObservedSymptoms::derive(&at).present().is_empty());

        let above = PatientObservation {
            temperature: 37.9,
            heart_rate: 91,
            ..base()
        };
        let s = ObservedSymptoms::derive(&above);
        assert!(s.fever);
        assert!(s.high_heart_rate);
        assert!(!s.high_bp);
    }

    #[test]
    fn high_bp_on_either_reading() {
        let systolic = PatientObservation {
            systolic_pressure: 131,
            ..base()
        };
        assert!(ObservedSymptoms::derive(&systolic).high_bp);

        let diastolic = PatientObservation {
            diastolic_pressure: 81,
            ..base()
        };
        assert!(ObservedSymptoms::derive(&diastolic).high_bp);
    }

    #[test]
    fn is_present_matches_fields() {
        let s = ObservedSymptoms {
            fever: true,
            high_bp: true,
            ..Default::default()
        };
        assert!(s.is_present(Symptom::Fever));
        assert!(s.is_present(Symptom::HighBloodPressure));
        assert!(!s.is_present(Symptom::Cough));
    }
}
