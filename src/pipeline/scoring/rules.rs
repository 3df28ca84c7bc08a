//! Per-class rule sets.
//!
//! Each class is scored independently as a weighted sum of indicator
//! conditions over the feature vector. Classes are not mutually exclusive
//! here; the normalizer turns the scores into a distribution.
//!
//! The thresholds and weights are uncalibrated domain heuristics. They have
//! no measured accuracy and should not be read as clinical cut-offs.

use tracing::debug;

use crate::models::{ClassId, ClassScores, FeatureVector};

// ═══════════════════════════════════════════════════════════
// Rule constants
// ═══════════════════════════════════════════════════════════

/// Brightness (HSV value mean) and color variance are 8-bit units, hue is
/// the halved-degree scale, edge density and ratios are fractions.
pub mod melanoma {
    pub const VERY_DARK_BELOW: f64 = 80.0;
    pub const VERY_DARK_WEIGHT: f64 = 0.4;
    pub const DARK_BELOW: f64 = 120.0;
    pub const DARK_WEIGHT: f64 = 0.2;
    pub const HIGH_VARIANCE_ABOVE: f64 = 60.0;
    pub const HIGH_VARIANCE_WEIGHT: f64 = 0.4;
    pub const VARIANCE_ABOVE: f64 = 45.0;
    pub const VARIANCE_WEIGHT: f64 = 0.2;
    pub const VERY_ASYMMETRIC_BELOW: f64 = 0.5;
    pub const VERY_ASYMMETRIC_WEIGHT: f64 = 0.3;
    pub const ASYMMETRIC_BELOW: f64 = 0.65;
    pub const ASYMMETRIC_WEIGHT: f64 = 0.15;
    pub const VERY_IRREGULAR_EDGES_ABOVE: f64 = 0.18;
    pub const VERY_IRREGULAR_EDGES_WEIGHT: f64 = 0.3;
    pub const IRREGULAR_EDGES_ABOVE: f64 = 0.12;
    pub const IRREGULAR_EDGES_WEIGHT: f64 = 0.15;
    pub const IRREGULAR_SHAPE_BELOW: f64 = 0.5;
    pub const IRREGULAR_SHAPE_WEIGHT: f64 = 0.2;
}

pub mod basal_cell {
    pub const BRIGHTNESS_RANGE: (f64, f64) = (100.0, 160.0);
    pub const BRIGHTNESS_WEIGHT: f64 = 0.3;
    pub const PINK_RED_RATIO_ABOVE: f64 = 0.38;
    pub const PINK_SATURATION_BELOW: f64 = 120.0;
    pub const PINK_WEIGHT: f64 = 0.35;
    pub const SMOOTH_EDGES_BELOW: f64 = 0.12;
    pub const SMOOTH_EDGES_WEIGHT: f64 = 0.2;
    pub const ROUND_ABOVE: f64 = 0.55;
    pub const ROUND_WEIGHT: f64 = 0.25;
    pub const UNIFORM_VARIANCE_BELOW: f64 = 50.0;
    pub const UNIFORM_WEIGHT: f64 = 0.2;
}

pub mod nevus {
    pub const VERY_SYMMETRIC_ABOVE: f64 = 0.75;
    pub const VERY_SYMMETRIC_WEIGHT: f64 = 0.35;
    pub const SYMMETRIC_ABOVE: f64 = 0.65;
    pub const SYMMETRIC_WEIGHT: f64 = 0.2;
    pub const VERY_ROUND_ABOVE: f64 = 0.7;
    pub const VERY_ROUND_WEIGHT: f64 = 0.35;
    pub const ROUND_ABOVE: f64 = 0.6;
    pub const ROUND_WEIGHT: f64 = 0.2;
    pub const VERY_UNIFORM_BELOW: f64 = 35.0;
    pub const VERY_UNIFORM_WEIGHT: f64 = 0.3;
    pub const UNIFORM_BELOW: f64 = 50.0;
    pub const UNIFORM_WEIGHT: f64 = 0.15;
    pub const BROWN_BRIGHTNESS_RANGE: (f64, f64) = (50.0, 110.0);
    pub const BROWN_WEIGHT: f64 = 0.25;
    pub const SMOOTH_EDGES_BELOW: f64 = 0.10;
    pub const SMOOTH_EDGES_WEIGHT: f64 = 0.2;
}

pub mod vascular {
    pub const RED_RATIO_ABOVE: f64 = 0.45;
    pub const RED_DOMINANT_WEIGHT: f64 = 0.5;
    /// Hue below the first or above the second bound reads as true red.
    pub const RED_HUE_BOUNDS: (f64, f64) = (15.0, 165.0);
    pub const RED_HUE_WEIGHT: f64 = 0.4;
    pub const SATURATED_ABOVE: f64 = 100.0;
    pub const SATURATED_WEIGHT: f64 = 0.3;
    pub const SYMMETRIC_ABOVE: f64 = 0.7;
    pub const SYMMETRIC_WEIGHT: f64 = 0.2;
    pub const BRIGHTNESS_RANGE: (f64, f64) = (80.0, 150.0);
    pub const BRIGHTNESS_WEIGHT: f64 = 0.15;
}

pub mod actinic {
    pub const VERY_LIGHT_ABOVE: f64 = 130.0;
    pub const VERY_LIGHT_WEIGHT: f64 = 0.35;
    pub const LIGHT_ABOVE: f64 = 110.0;
    pub const LIGHT_WEIGHT: f64 = 0.2;
    pub const VERY_ROUGH_ABOVE: f64 = 0.15;
    pub const VERY_ROUGH_WEIGHT: f64 = 0.35;
    pub const ROUGH_ABOVE: f64 = 0.10;
    pub const ROUGH_WEIGHT: f64 = 0.2;
    pub const DESATURATED_BELOW: f64 = 70.0;
    pub const DESATURATED_WEIGHT: f64 = 0.25;
    pub const VARIANCE_RANGE: (f64, f64) = (45.0, 65.0);
    pub const VARIANCE_WEIGHT: f64 = 0.25;
    pub const IRREGULAR_SHAPE_BELOW: f64 = 0.65;
    pub const IRREGULAR_SHAPE_WEIGHT: f64 = 0.2;
}

pub mod benign_keratosis {
    pub const LIGHT_ABOVE: f64 = 95.0;
    pub const LIGHT_WEIGHT: f64 = 0.25;
    pub const TEXTURED_ABOVE: f64 = 0.12;
    pub const TEXTURED_WEIGHT: f64 = 0.3;
    pub const IRREGULAR_SHAPE_BELOW: f64 = 0.65;
    pub const IRREGULAR_SHAPE_WEIGHT: f64 = 0.25;
    pub const VARIANCE_RANGE: (f64, f64) = (40.0, 60.0);
    pub const VARIANCE_WEIGHT: f64 = 0.3;
    pub const TAN_BRIGHTNESS_RANGE: (f64, f64) = (90.0, 140.0);
    pub const TAN_WEIGHT: f64 = 0.2;
}

pub mod dermatofibroma {
    pub const ROUND_ABOVE: f64 = 0.65;
    pub const ROUND_WEIGHT: f64 = 0.3;
    pub const SYMMETRIC_ABOVE: f64 = 0.7;
    pub const SYMMETRIC_WEIGHT: f64 = 0.3;
    pub const BRIGHTNESS_RANGE: (f64, f64) = (60.0, 120.0);
    pub const BRIGHTNESS_WEIGHT: f64 = 0.25;
    pub const UNIFORM_BELOW: f64 = 40.0;
    pub const UNIFORM_WEIGHT: f64 = 0.25;
    pub const SMOOTH_EDGES_BELOW: f64 = 0.12;
    pub const SMOOTH_EDGES_WEIGHT: f64 = 0.2;
}

/// Open interval test.
#[inline]
fn within(value: f64, (low, high): (f64, f64)) -> f64 {
    if low < value && value < high {
        1.0
    } else {
        0.0
    }
}

#[inline]
fn when(condition: bool, weight: f64) -> f64 {
    if condition {
        weight
    } else {
        0.0
    }
}

/// First matching weight of a two-tier condition.
#[inline]
fn tiered(strong: bool, strong_weight: f64, weak: bool, weak_weight: f64) -> f64 {
    if strong {
        strong_weight
    } else if weak {
        weak_weight
    } else {
        0.0
    }
}

// ═══════════════════════════════════════════════════════════
// Per-class scores
// ═══════════════════════════════════════════════════════════

/// Dark, irregularly colored, asymmetric lesions with rough borders.
pub fn melanoma_score(f: &FeatureVector) -> f64 {
    use melanoma::*;
    tiered(
        f.brightness < VERY_DARK_BELOW,
        VERY_DARK_WEIGHT,
        f.brightness < DARK_BELOW,
        DARK_WEIGHT,
    ) + tiered(
        f.color_variance > HIGH_VARIANCE_ABOVE,
        HIGH_VARIANCE_WEIGHT,
        f.color_variance > VARIANCE_ABOVE,
        VARIANCE_WEIGHT,
    ) + tiered(
        f.symmetry < VERY_ASYMMETRIC_BELOW,
        VERY_ASYMMETRIC_WEIGHT,
        f.symmetry < ASYMMETRIC_BELOW,
        ASYMMETRIC_WEIGHT,
    ) + tiered(
        f.edge_density > VERY_IRREGULAR_EDGES_ABOVE,
        VERY_IRREGULAR_EDGES_WEIGHT,
        f.edge_density > IRREGULAR_EDGES_ABOVE,
        IRREGULAR_EDGES_WEIGHT,
    ) + when(f.circularity < IRREGULAR_SHAPE_BELOW, IRREGULAR_SHAPE_WEIGHT)
}

/// Moderately light, pinkish, smooth and round.
pub fn basal_cell_carcinoma_score(f: &FeatureVector) -> f64 {
    use basal_cell::*;
    let (red_ratio, _, _) = f.color_ratios();
    within(f.brightness, BRIGHTNESS_RANGE) * BRIGHTNESS_WEIGHT
        + when(
            red_ratio > PINK_RED_RATIO_ABOVE && f.saturation < PINK_SATURATION_BELOW,
            PINK_WEIGHT,
        )
        + when(f.edge_density < SMOOTH_EDGES_BELOW, SMOOTH_EDGES_WEIGHT)
        + when(f.circularity > ROUND_ABOVE, ROUND_WEIGHT)
        + when(f.color_variance < UNIFORM_VARIANCE_BELOW, UNIFORM_WEIGHT)
}

/// Symmetric, round, uniformly brown moles.
pub fn melanocytic_nevus_score(f: &FeatureVector) -> f64 {
    use nevus::*;
    tiered(
        f.symmetry > VERY_SYMMETRIC_ABOVE,
        VERY_SYMMETRIC_WEIGHT,
        f.symmetry > SYMMETRIC_ABOVE,
        SYMMETRIC_WEIGHT,
    ) + tiered(
        f.circularity > VERY_ROUND_ABOVE,
        VERY_ROUND_WEIGHT,
        f.circularity > ROUND_ABOVE,
        ROUND_WEIGHT,
    ) + tiered(
        f.color_variance < VERY_UNIFORM_BELOW,
        VERY_UNIFORM_WEIGHT,
        f.color_variance < UNIFORM_BELOW,
        UNIFORM_WEIGHT,
    ) + within(f.brightness, BROWN_BRIGHTNESS_RANGE) * BROWN_WEIGHT
        + when(f.edge_density < SMOOTH_EDGES_BELOW, SMOOTH_EDGES_WEIGHT)
}

/// Strongly red, saturated lesions.
pub fn vascular_lesion_score(f: &FeatureVector) -> f64 {
    use vascular::*;
    let (red_ratio, green_ratio, blue_ratio) = f.color_ratios();
    let (hue_low, hue_high) = RED_HUE_BOUNDS;
    when(
        red_ratio > RED_RATIO_ABOVE && red_ratio > blue_ratio + green_ratio,
        RED_DOMINANT_WEIGHT,
    ) + when(
        f.dominant_hue < hue_low || f.dominant_hue > hue_high,
        RED_HUE_WEIGHT,
    ) + when(f.saturation > SATURATED_ABOVE, SATURATED_WEIGHT)
        + when(f.symmetry > SYMMETRIC_ABOVE, SYMMETRIC_WEIGHT)
        + within(f.brightness, BRIGHTNESS_RANGE) * BRIGHTNESS_WEIGHT
}

/// Light, rough, desaturated patches.
pub fn actinic_keratosis_score(f: &FeatureVector) -> f64 {
    use actinic::*;
    tiered(
        f.brightness > VERY_LIGHT_ABOVE,
        VERY_LIGHT_WEIGHT,
        f.brightness > LIGHT_ABOVE,
        LIGHT_WEIGHT,
    ) + tiered(
        f.edge_density > VERY_ROUGH_ABOVE,
        VERY_ROUGH_WEIGHT,
        f.edge_density > ROUGH_ABOVE,
        ROUGH_WEIGHT,
    ) + when(f.saturation < DESATURATED_BELOW, DESATURATED_WEIGHT)
        + within(f.color_variance, VARIANCE_RANGE) * VARIANCE_WEIGHT
        + when(f.circularity < IRREGULAR_SHAPE_BELOW, IRREGULAR_SHAPE_WEIGHT)
}

/// Light, textured, tan lesions of irregular outline.
pub fn benign_keratosis_score(f: &FeatureVector) -> f64 {
    use benign_keratosis::*;
    when(f.brightness > LIGHT_ABOVE, LIGHT_WEIGHT)
        + when(f.edge_density > TEXTURED_ABOVE, TEXTURED_WEIGHT)
        + when(f.circularity < IRREGULAR_SHAPE_BELOW, IRREGULAR_SHAPE_WEIGHT)
        + within(f.color_variance, VARIANCE_RANGE) * VARIANCE_WEIGHT
        + within(f.brightness, TAN_BRIGHTNESS_RANGE) * TAN_WEIGHT
}

/// Round, symmetric, darker nodules.
pub fn dermatofibroma_score(f: &FeatureVector) -> f64 {
    use dermatofibroma::*;
    when(f.circularity > ROUND_ABOVE, ROUND_WEIGHT)
        + when(f.symmetry > SYMMETRIC_ABOVE, SYMMETRIC_WEIGHT)
        + within(f.brightness, BRIGHTNESS_RANGE) * BRIGHTNESS_WEIGHT
        + when(f.color_variance < UNIFORM_BELOW, UNIFORM_WEIGHT)
        + when(f.edge_density < SMOOTH_EDGES_BELOW, SMOOTH_EDGES_WEIGHT)
}

/// Evaluate all seven rule sets.
pub fn score_classes(features: &FeatureVector) -> ClassScores {
    let mut scores = ClassScores::default();
    scores[ClassId::ActinicKeratosis] = actinic_keratosis_score(features);
    scores[ClassId::BasalCellCarcinoma] = basal_cell_carcinoma_score(features);
    scores[ClassId::BenignKeratosis] = benign_keratosis_score(features);
    scores[ClassId::Dermatofibroma] = dermatofibroma_score(features);
    scores[ClassId::MelanocyticNevus] = melanocytic_nevus_score(features);
    scores[ClassId::Melanoma] = melanoma_score(features);
    scores[ClassId::VascularLesion] = vascular_lesion_score(features);

    debug!(scores = ?scores.as_array(), top = %scores.top_class(), "Rule scores");
    scores
}
