use serde::Serialize;

use super::enums::{ClassId, RiskTier};

/// Highest attainable ABCDE score (four criteria, two points each).
pub const ABCDE_MAX_SCORE: u8 = 8;

/// ABCDE melanoma screening outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AbcdeResult {
    /// Total points, 0..=8.
    pub score: u8,
    /// Findings in A-B-C-D order; only criteria above their lower band.
    pub reasons: Vec<String>,
}

/// Qualitative reading of the ABCDE descriptors, for report layers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MedicalFeatureSummary {
    pub asymmetry_level: String,
    pub border_regularity: String,
    pub color_uniformity: String,
    pub estimated_size_mm: f64,
}

/// One row of the ranked distribution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedPrediction {
    #[serde(skip)]
    pub class_id: ClassId,
    pub class_name: String,
    pub confidence: f64,
    pub description: String,
}

/// Final output of one classification call. Owned by the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionResult {
    #[serde(skip)]
    pub class_id: ClassId,
    pub predicted_class: String,
    pub confidence: f64,
    pub risk_level: RiskTier,
    pub is_malignant: bool,
    pub description: String,
    pub urgency: String,
    pub treatment: String,
    /// Every class, sorted by descending confidence.
    pub all_predictions: Vec<RankedPrediction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub abcde_score: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub abcde_max_score: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub abcde_reasons: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medical_features: Option<MedicalFeatureSummary>,
    pub analysis_notes: String,
}

impl PredictionResult {
    /// Confidence assigned to `id`, read from the ranked list.
    pub fn confidence_of(&self, id: ClassId) -> f64 {
        self.all_predictions
            .iter()
            .find(|p| p.class_id == id)
            .map(|p| p.confidence)
            .unwrap_or(0.0)
    }

    pub fn abcde(&self) -> Option<AbcdeResult> {
        match (self.abcde_score, &self.abcde_reasons) {
            (Some(score), Some(reasons)) => Some(AbcdeResult {
                score,
                reasons: reasons.clone(),
            }),
            _ => None,
        }
    }
}

/// Description of the engine, for health and about endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct ModelInfo {
    pub model_type: &'static str,
    pub version: &'static str,
    pub num_classes: usize,
    pub class_names: Vec<&'static str>,
    pub scoring_mode: String,
    pub abcde_enhanced: bool,
}
