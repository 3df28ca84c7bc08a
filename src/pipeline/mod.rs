pub mod extraction; // Image → FeatureVector
pub mod scoring; // ABCDE, rule sets, normalization, adjustment, triage
pub mod assemble; // Distribution → PredictionResult

pub use assemble::assemble_prediction;
pub use extraction::{extract_features, ExtractionError};
