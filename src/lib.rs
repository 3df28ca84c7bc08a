pub mod config;
pub mod engine; // LesionClassifier: extraction → scoring → assembly
pub mod models;
pub mod pipeline;

pub use config::{ClassifyOptions, NoiseSettings, ScoringMode};
pub use engine::{classify, LesionClassifier};
pub use models::{
    AbcdeResult, ClassId, ClassProbabilities, ClassProfile, ClassScores, FeatureVector,
    MedicalFeatureSummary, ModelInfo, PredictionResult, RankedPrediction, RiskTier,
};
pub use pipeline::extraction::{decode_image, image_from_raw, ExtractionError};
pub use pipeline::scoring::{NoiseSource, RngNoise};

use tracing_subscriber::EnvFilter;

/// Install the global `tracing` subscriber. Logs go to stderr so stdout
/// stays free for results. `RUST_LOG` overrides the default filter.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .with_writer(std::io::stderr)
        .try_init();
}
