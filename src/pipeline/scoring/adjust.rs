//! Medical knowledge adjustment.
//!
//! Re-weights a base distribution with multiplicative boosts derived from
//! the lesion's features and ABCDE score. The base may come from this
//! engine's own scorers or from an external classifier.

use tracing::{debug, warn};

use crate::models::{
    AbcdeResult, ClassId, ClassProbabilities, FeatureVector, ABCDE_MAX_SCORE, CLASS_COUNT,
};

/// Minimum probability after boosting.
pub const ADJUSTED_FLOOR: f64 = 0.005;

pub mod boosts {
    /// ABCDE score at or above which melanoma is boosted.
    pub const ABCDE_MIN_SCORE: u8 = 6;
    /// Melanoma gains up to this fraction at the maximum ABCDE score.
    pub const ABCDE_MELANOMA_GAIN: f64 = 0.5;

    pub const ASYMMETRY_ABOVE: f64 = 0.6;
    pub const ASYMMETRY_MELANOMA: f64 = 1.3;
    pub const ASYMMETRY_BASAL_CELL: f64 = 1.2;

    pub const COLOR_VARIANCE_ABOVE: f64 = 0.5;
    pub const COLOR_VARIANCE_MELANOMA: f64 = 1.2;
    pub const COLOR_VARIANCE_ACTINIC: f64 = 1.1;

    pub const REGULARITY_ABOVE: f64 = 0.7;
    pub const REGULARITY_NEVUS: f64 = 1.3;
    pub const REGULARITY_KERATOSIS: f64 = 1.2;
}

/// Adjust `base` (in `ClassId` order) using `features` and `abcde`.
///
/// `base` need not be normalized. Non-finite or negative entries are
/// treated as 0; a base with no positive mass becomes uniform. The output
/// is always a valid distribution.
pub fn adjust_distribution(
    base: &[f64; CLASS_COUNT],
    features: &FeatureVector,
    abcde: &AbcdeResult,
) -> ClassProbabilities {
    let mut weights = sanitize(base);

    let mut boost = |id: ClassId, factor: f64| weights[id.index()] *= factor;

    if abcde.score >= boosts::ABCDE_MIN_SCORE {
        let gain = abcde.score.min(ABCDE_MAX_SCORE) as f64 / ABCDE_MAX_SCORE as f64;
        boost(ClassId::Melanoma, 1.0 + gain * boosts::ABCDE_MELANOMA_GAIN);
    }

    let lateral = features.lateral_asymmetry();
    if lateral > boosts::ASYMMETRY_ABOVE {
        boost(ClassId::Melanoma, boosts::ASYMMETRY_MELANOMA);
        boost(ClassId::BasalCellCarcinoma, boosts::ASYMMETRY_BASAL_CELL);
    }

    let color = features.normalized_color_variance();
    if color > boosts::COLOR_VARIANCE_ABOVE {
        boost(ClassId::Melanoma, boosts::COLOR_VARIANCE_MELANOMA);
        boost(ClassId::ActinicKeratosis, boosts::COLOR_VARIANCE_ACTINIC);
    }

    let regularity = features.regularity();
    if regularity > boosts::REGULARITY_ABOVE {
        boost(ClassId::MelanocyticNevus, boosts::REGULARITY_NEVUS);
        boost(ClassId::BenignKeratosis, boosts::REGULARITY_KERATOSIS);
    }

    debug!(
        abcde = abcde.score,
        lateral_asymmetry = lateral,
        color_variance = color,
        regularity,
        "Medical adjustment applied"
    );

    ClassProbabilities::from_weights(weights, ADJUSTED_FLOOR)
}

/// Replace invalid entries with 0 and normalize; uniform when nothing
/// positive remains.
fn sanitize(base: &[f64; CLASS_COUNT]) -> [f64; CLASS_COUNT] {
    let invalid = base.iter().filter(|v| !v.is_finite() || **v < 0.0).count();
    if invalid > 0 {
        warn!(invalid, "Base distribution has non-finite or negative entries; treating as 0");
    }

    let cleaned = base.map(|v| if v.is_finite() && v > 0.0 { v } else { 0.0 });
    let total: f64 = cleaned.iter().sum();
    if total > 0.0 && total.is_finite() {
        cleaned.map(|v| v / total)
    } else if total > 0.0 {
        // Overflowed sum: let the distribution type rescale it.
        *ClassProbabilities::from_weights(cleaned, f64::MIN_POSITIVE).as_array()
    } else {
        warn!("Base distribution has no positive mass; using uniform");
        *ClassProbabilities::uniform().as_array()
    }
}
