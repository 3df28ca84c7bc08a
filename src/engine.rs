//! Classification engine: composes extraction, scoring, and assembly.
//!
//! `LesionClassifier` holds no mutable state and may be shared across
//! threads; every call works on its own image and options.

use image::RgbImage;
use tracing::info;

use crate::config::{ClassifyOptions, ScoringMode, APP_VERSION};
use crate::models::{
    AbcdeResult, ClassId, ClassProbabilities, FeatureVector, MedicalFeatureSummary, ModelInfo,
    PredictionResult, CLASS_COUNT,
};
use crate::pipeline::extraction::{self, ExtractionError};
use crate::pipeline::scoring::{
    adjust_distribution, normalize_scores, score_abcde, score_classes, triage_distribution,
    NoiseSource, RngNoise,
};
use crate::pipeline::assemble_prediction;

pub const MODEL_TYPE: &str = "Heuristic Feature Classifier";

#[derive(Debug, Clone, Copy, Default)]
pub struct LesionClassifier;

impl LesionClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Classify one image. Noise, when enabled, is drawn from a source built
    /// from `options.noise` (seeded if a seed is set, OS entropy otherwise).
    pub fn classify(
        &self,
        image: &RgbImage,
        options: &ClassifyOptions,
    ) -> Result<PredictionResult, ExtractionError> {
        let mut noise = RngNoise::from_settings(&options.noise);
        self.classify_with_noise(image, options, &mut noise)
    }

    /// Classify one image drawing perturbations from `noise`.
    ///
    /// Only the feature-rules path consumes noise; triage templates and
    /// adjusted base distributions are deterministic.
    pub fn classify_with_noise(
        &self,
        image: &RgbImage,
        options: &ClassifyOptions,
        noise: &mut dyn NoiseSource,
    ) -> Result<PredictionResult, ExtractionError> {
        let features = self.extract_features(image)?;
        let abcde = score_abcde(&features);

        let probabilities = match &options.base_distribution {
            Some(base) => adjust_distribution(base, &features, &abcde),
            None => {
                let own = self.score(&features, &abcde, options, noise);
                if options.apply_medical_adjustment {
                    adjust_distribution(own.as_array(), &features, &abcde)
                } else {
                    own
                }
            }
        };

        let (abcde_result, summary) = if options.include_abcde {
            (
                Some(abcde.clone()),
                Some(MedicalFeatureSummary::from_features(&features)),
            )
        } else {
            (None, None)
        };

        let result = assemble_prediction(&probabilities, abcde_result, summary);

        info!(
            class = %result.class_id,
            confidence = result.confidence,
            abcde = abcde.score,
            mode = %options.mode,
            external_base = options.base_distribution.is_some(),
            "Lesion classified"
        );

        Ok(result)
    }

    pub fn extract_features(&self, image: &RgbImage) -> Result<FeatureVector, ExtractionError> {
        extraction::extract_features(image)
    }

    /// Engine descriptor for the given options.
    pub fn model_info(&self, options: &ClassifyOptions) -> ModelInfo {
        ModelInfo {
            model_type: MODEL_TYPE,
            version: APP_VERSION,
            num_classes: CLASS_COUNT,
            class_names: ClassId::ALL.iter().map(|id| id.as_str()).collect(),
            scoring_mode: options.mode.to_string(),
            abcde_enhanced: options.include_abcde,
        }
    }

    fn score(
        &self,
        features: &FeatureVector,
        abcde: &AbcdeResult,
        options: &ClassifyOptions,
        noise: &mut dyn NoiseSource,
    ) -> ClassProbabilities {
        match options.mode {
            ScoringMode::FeatureRules => {
                normalize_scores(&score_classes(features), &options.noise, noise)
            }
            ScoringMode::AbcdeTriage => triage_distribution(features, abcde),
        }
    }
}

/// Classify one image with a fresh engine.
pub fn classify(
    image: &RgbImage,
    options: &ClassifyOptions,
) -> Result<PredictionResult, ExtractionError> {
    LesionClassifier::new().classify(image, options)
}
