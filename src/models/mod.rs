pub mod enums;
pub mod estimate;
pub mod observation;

pub use enums::{Condition, Gender, Symptom};
pub use estimate::{Prediction, RiskEstimate, Severity};
pub use observation::{PatientObservation, VitalsIntake};
