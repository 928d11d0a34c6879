pub mod adjustments;
pub mod bayes;
pub mod derivation;
pub mod engine;
pub mod knowledge;
pub mod types;

pub use derivation::ObservedSymptoms;
pub use engine::DefaultRiskEngine;
pub use knowledge::{KnowledgeBase, KnowledgeTables};
pub use types::{PosteriorTrace, RiskError, RiskEstimator, RiskReport, Stage};
