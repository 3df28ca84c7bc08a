//! ABCDE melanoma screening.
//!
//! Asymmetry, Border, Color and Diameter each score 0, 1 or 2 points
//! against a (lower, upper) band. Evolution cannot be seen in a single
//! image and is not scored.

use crate::models::{AbcdeResult, FeatureVector, MedicalFeatureSummary, ABCDE_MAX_SCORE};

/// (lower, upper) band per criterion. Above upper ⇒ 2 points, above lower ⇒ 1.
pub mod bands {
    pub const ASYMMETRY: (f64, f64) = (0.05, 0.1);
    pub const BORDER: (f64, f64) = (0.1, 0.15);
    pub const COLOR_VARIATION: (f64, f64) = (0.2, 0.3);
    /// Millimetres.
    pub const DIAMETER: (f64, f64) = (4.0, 6.0);
}

/// Score at or above which the lesion is reported as high risk.
pub const HIGH_RISK_SCORE: u8 = 4;

struct Criterion {
    value: f64,
    band: (f64, f64),
    major: &'static str,
    minor: &'static str,
}

/// Points for one value: 2 above the upper bound, 1 above the lower.
/// NaN scores nothing.
fn band_points(value: f64, (lower, upper): (f64, f64)) -> u8 {
    if value > upper {
        2
    } else if value > lower {
        1
    } else {
        0
    }
}

/// Score the four visible ABCDE criteria.
pub fn score_abcde(features: &FeatureVector) -> AbcdeResult {
    let criteria = [
        Criterion {
            value: features.asymmetry,
            band: bands::ASYMMETRY,
            major: "High asymmetry detected",
            minor: "Moderate asymmetry",
        },
        Criterion {
            value: features.border_irregularity,
            band: bands::BORDER,
            major: "Irregular borders",
            minor: "Moderately irregular borders",
        },
        Criterion {
            value: features.color_variation,
            band: bands::COLOR_VARIATION,
            major: "Multiple colors present",
            minor: "Some color variation",
        },
        Criterion {
            value: features.estimated_diameter,
            band: bands::DIAMETER,
            major: "Large diameter (>6mm)",
            minor: "Moderate size",
        },
    ];

    let mut score = 0u8;
    let mut reasons = Vec::new();
    for c in &criteria {
        match band_points(c.value, c.band) {
            2 => {
                score += 2;
                reasons.push(c.major.to_string());
            }
            1 => {
                score += 1;
                reasons.push(c.minor.to_string());
            }
            _ => {}
        }
    }

    AbcdeResult {
        score: score.min(ABCDE_MAX_SCORE),
        reasons,
    }
}

impl AbcdeResult {
    pub fn is_high_risk(&self) -> bool {
        self.score >= HIGH_RISK_SCORE
    }

    /// One-line interpretation for reports.
    pub fn interpretation(&self) -> String {
        let verdict = if self.is_high_risk() {
            "HIGH RISK - Medical attention required"
        } else {
            "Lower risk - routine monitoring"
        };
        format!("ABCDE score: {}/{}. {verdict}", self.score, ABCDE_MAX_SCORE)
    }
}

impl MedicalFeatureSummary {
    /// Qualitative levels for the same descriptors the ABCDE scorer reads.
    pub fn from_features(features: &FeatureVector) -> Self {
        let level = |value: f64, band: (f64, f64), labels: [&str; 3]| -> String {
            labels[2 - band_points(value, band) as usize].to_string()
        };

        Self {
            asymmetry_level: level(
                features.asymmetry,
                bands::ASYMMETRY,
                ["High", "Moderate", "Low"],
            ),
            border_regularity: level(
                features.border_irregularity,
                bands::BORDER,
                ["Irregular", "Moderately regular", "Regular"],
            ),
            color_uniformity: level(
                features.color_variation,
                bands::COLOR_VARIATION,
                ["Multiple colors", "Some variation", "Uniform"],
            ),
            estimated_size_mm: (features.estimated_diameter * 10.0).round() / 10.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::features::fixtures;

    fn with_abcde(a: f64, b: f64, c: f64, d: f64) -> FeatureVector {
        FeatureVector {
            asymmetry: a,
            border_irregularity: b,
            color_variation: c,
            estimated_diameter: d,
            ..fixtures::neutral()
        }
    }

    #[test]
    fn flat_features_score_zero() {
        let r = score_abcde(&fixtures::neutral());
        assert_eq!(r.score, 0);
        assert!(r.reasons.is_empty());
        assert!(!r.is_high_risk());
    }

    #[test]
    fn all_criteria_high_scores_eight() {
        let r = score_abcde(&with_abcde(0.2, 0.3, 0.5, 9.0));
        assert_eq!(r.score, 8);
        assert_eq!(
            r.reasons,
            vec![
                "High asymmetry detected",
                "Irregular borders",
                "Multiple colors present",
                "Large diameter (>6mm)",
            ]
        );
    }

    #[test]
    fn moderate_band_scores_one_each() {
        let r = score_abcde(&with_abcde(0.07, 0.12, 0.25, 5.0));
        assert_eq!(r.score, 4);
        assert_eq!(
            r.reasons,
            vec![
                "Moderate asymmetry",
                "Moderately irregular borders",
                "Some color variation",
                "Moderate size",
            ]
        );
        assert!(r.is_high_risk());
    }

    #[test]
    fn band_edges_are_exclusive() {
        // Values exactly on a bound do not cross it.
        let r = score_abcde(&with_abcde(0.05, 0.15, 0.2, 6.0));
        assert_eq!(r.score, 2, "Reasons: {:?}", r.reasons);
        assert_eq!(r.reasons, vec!["Moderately irregular borders", "Moderate size"]);
    }

    #[test]
    fn score_is_monotone_in_each_criterion() {
        let steps = [0.0, 0.03, 0.06, 0.11, 0.14, 0.2, 0.25, 0.35, 1.0, 5.0, 7.0];
        for criterion in 0..4 {
            let mut previous = 0u8;
            for &v in &steps {
                let mut vals = [0.0; 4];
                vals[criterion] = v;
                let r = score_abcde(&with_abcde(vals[0], vals[1], vals[2], vals[3]));
                assert!(
                    r.score >= previous,
                    "Criterion {criterion}: score fell from {previous} to {} at {v}",
                    r.score
                );
                assert!(r.score <= ABCDE_MAX_SCORE);
                previous = r.score;
            }
        }
    }

    #[test]
    fn nan_scores_nothing() {
        let r = score_abcde(&with_abcde(f64::NAN, 0.0, 0.0, 0.0));
        assert_eq!(r.score, 0);
    }

    #[test]
    fn interpretation_text() {
        let high = AbcdeResult { score: 6, reasons: vec![] };
        assert_eq!(high.interpretation(), "ABCDE score: 6/8. HIGH RISK - Medical attention required");
        let low = AbcdeResult { score: 1, reasons: vec![] };
        assert_eq!(low.interpretation(), "ABCDE score: 1/8. Lower risk - routine monitoring");
    }

    #[test]
    fn feature_summary_levels() {
        let s = MedicalFeatureSummary::from_features(&with_abcde(0.2, 0.12, 0.0, 5.26));
        assert_eq!(s.asymmetry_level, "High");
        assert_eq!(s.border_regularity, "Moderately regular");
        assert_eq!(s.color_uniformity, "Uniform");
        assert!((s.estimated_size_mm - 5.3).abs() < 1e-12);
    }
}
