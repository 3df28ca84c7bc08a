//! ABCDE triage scoring.
//!
//! Maps the ABCDE tier to a fixed differential template, refined by texture
//! and lesion lightness in the lower tiers. Classes missing from the
//! template share the leftover mass.

use tracing::debug;

use crate::models::{AbcdeResult, ClassId, ClassProbabilities, FeatureVector, CLASS_COUNT};

/// Smallest probability a class outside the template receives.
pub const REMAINDER_FLOOR: f64 = 0.01;

pub mod tiers {
    pub const URGENT_SCORE: u8 = 6;
    pub const SUSPICIOUS_SCORE: u8 = 4;
    pub const ATYPICAL_SCORE: u8 = 2;
    /// Grayscale variance on the [0,1] scale above which a lesion reads as
    /// textured.
    pub const TEXTURED_VARIANCE_ABOVE: f64 = 0.02;
    /// Mean red intensity on the [0,1] scale above which a lesion reads as
    /// light colored.
    pub const LIGHT_RED_ABOVE: f64 = 0.7;
}

type Template = &'static [(ClassId, f64)];

const URGENT: Template = &[
    (ClassId::Melanoma, 0.85),
    (ClassId::ActinicKeratosis, 0.10),
    (ClassId::BasalCellCarcinoma, 0.05),
];

const SUSPICIOUS: Template = &[
    (ClassId::Melanoma, 0.65),
    (ClassId::BasalCellCarcinoma, 0.20),
    (ClassId::ActinicKeratosis, 0.15),
];

const ATYPICAL_TEXTURED: Template = &[
    (ClassId::BasalCellCarcinoma, 0.45),
    (ClassId::ActinicKeratosis, 0.30),
    (ClassId::Melanoma, 0.25),
];

const ATYPICAL_SMOOTH: Template = &[
    (ClassId::BenignKeratosis, 0.50),
    (ClassId::MelanocyticNevus, 0.30),
    (ClassId::Dermatofibroma, 0.20),
];

const BENIGN_LIGHT: Template = &[
    (ClassId::BenignKeratosis, 0.60),
    (ClassId::MelanocyticNevus, 0.25),
    (ClassId::VascularLesion, 0.15),
];

const BENIGN_DARK: Template = &[
    (ClassId::MelanocyticNevus, 0.55),
    (ClassId::Dermatofibroma, 0.25),
    (ClassId::BenignKeratosis, 0.20),
];

fn select_template(features: &FeatureVector, abcde: &AbcdeResult) -> Template {
    if abcde.score >= tiers::URGENT_SCORE {
        URGENT
    } else if abcde.score >= tiers::SUSPICIOUS_SCORE {
        SUSPICIOUS
    } else if abcde.score >= tiers::ATYPICAL_SCORE {
        let variance = features.texture_variance / (255.0 * 255.0);
        if variance > tiers::TEXTURED_VARIANCE_ABOVE {
            ATYPICAL_TEXTURED
        } else {
            ATYPICAL_SMOOTH
        }
    } else if features.red_mean / 255.0 > tiers::LIGHT_RED_ABOVE {
        BENIGN_LIGHT
    } else {
        BENIGN_DARK
    }
}

/// Triage distribution for one lesion.
pub fn triage_distribution(features: &FeatureVector, abcde: &AbcdeResult) -> ClassProbabilities {
    let template = select_template(features, abcde);

    let mut weights = [0.0f64; CLASS_COUNT];
    let mut assigned = [false; CLASS_COUNT];
    for &(id, p) in template {
        weights[id.index()] = p;
        assigned[id.index()] = true;
    }

    let used: f64 = template.iter().map(|(_, p)| p).sum();
    let remaining = assigned.iter().filter(|a| !**a).count().max(1);
    let share = ((1.0 - used) / remaining as f64).max(REMAINDER_FLOOR);
    for (w, a) in weights.iter_mut().zip(assigned) {
        if !a {
            *w = share;
        }
    }

    debug!(abcde = abcde.score, lead = %template[0].0, "Triage template selected");
    ClassProbabilities::from_weights(weights, REMAINDER_FLOOR)
}
