use serde::{Deserialize, Serialize};

/// Quantitative descriptors of one lesion image.
///
/// Color statistics use 8-bit units ([0,255]); hue follows the 8-bit HSV
/// convention ([0,180)). The ABCDE descriptors (`asymmetry`,
/// `border_irregularity`, `color_variation`) are computed on the image
/// normalized to [0,1]. Computed once per image, never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub red_mean: f64,
    pub green_mean: f64,
    pub blue_mean: f64,
    /// Mean of the HSV value channel.
    pub brightness: f64,
    /// Mean of the HSV saturation channel.
    pub saturation: f64,
    /// Standard deviation over every channel of every pixel.
    pub color_variance: f64,
    /// Fraction of pixels marked by the edge detector, in [0,1].
    pub edge_density: f64,
    pub dominant_hue: f64,
    /// Left/right mirror similarity of the grayscale image, in [0,1].
    pub symmetry: f64,
    /// `4π·area/perimeter²` of the largest outer contour; 0 when none.
    pub circularity: f64,
    /// Top/bottom mirror difference, in [0,1].
    pub asymmetry: f64,
    pub border_irregularity: f64,
    /// Sum of the per-channel standard deviations, in [0,3].
    pub color_variation: f64,
    /// Approximate lesion size in millimetres.
    pub estimated_diameter: f64,
    /// Variance of the channel-mean grayscale, 8-bit units.
    pub texture_variance: f64,
}

/// Scale of the lateral (left/right) asymmetry measure. A mean mirror
/// difference of 128 gray levels counts as fully asymmetric.
const LATERAL_ASYMMETRY_SCALE: f64 = 128.0;

/// Texture variance at which regularity drops to one half.
const REGULARITY_VARIANCE_SCALE: f64 = 1000.0;

impl FeatureVector {
    /// Channel means as fractions of their sum; `1/3` each for a black image.
    pub fn color_ratios(&self) -> (f64, f64, f64) {
        let total = self.red_mean + self.green_mean + self.blue_mean;
        if total > 0.0 {
            (
                self.red_mean / total,
                self.green_mean / total,
                self.blue_mean / total,
            )
        } else {
            (1.0 / 3.0, 1.0 / 3.0, 1.0 / 3.0)
        }
    }

    /// Left/right asymmetry in [0,1], derived from `symmetry`.
    pub fn lateral_asymmetry(&self) -> f64 {
        ((1.0 - self.symmetry) * 255.0 / LATERAL_ASYMMETRY_SCALE).clamp(0.0, 1.0)
    }

    /// Texture regularity in (0,1]; 1 for a flat image.
    pub fn regularity(&self) -> f64 {
        1.0 / (1.0 + self.texture_variance.max(0.0) / REGULARITY_VARIANCE_SCALE)
    }

    /// `color_variance` rescaled to [0,1].
    pub fn normalized_color_variance(&self) -> f64 {
        self.color_variance / 255.0
    }

    pub fn is_finite(&self) -> bool {
        [
            self.red_mean,
            self.green_mean,
            self.blue_mean,
            self.brightness,
            self.saturation,
            self.color_variance,
            self.edge_density,
            self.dominant_hue,
            self.symmetry,
            self.circularity,
            self.asymmetry,
            self.border_irregularity,
            self.color_variation,
            self.estimated_diameter,
            self.texture_variance,
        ]
        .iter()
        .all(|v| v.is_finite())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_ratios_sum_to_one() {
        let f = FeatureVector {
            red_mean: 220.0,
            green_mean: 40.0,
            blue_mean: 40.0,
            ..fixtures::neutral()
        };
        let (r, g, b) = f.color_ratios();
        assert!((r + g + b - 1.0).abs() < 1e-12);
        assert!((r - 220.0 / 300.0).abs() < 1e-12);
    }

    #[test]
    fn color_ratios_fallback_for_black() {
        let f = FeatureVector {
            red_mean: 0.0,
            green_mean: 0.0,
            blue_mean: 0.0,
            ..fixtures::neutral()
        };
        let (r, g, b) = f.color_ratios();
        assert!((r - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(r, g);
        assert_eq!(g, b);
    }

    #[test]
    fn lateral_asymmetry_is_clamped() {
        let symmetric = fixtures::neutral();
        assert_eq!(symmetric.lateral_asymmetry(), 0.0);

        let mirrored_black_white = FeatureVector {
            symmetry: 0.0,
            ..fixtures::neutral()
        };
        assert_eq!(mirrored_black_white.lateral_asymmetry(), 1.0);
    }

    #[test]
    fn regularity_decreases_with_texture() {
        let flat = fixtures::neutral();
        let rough = FeatureVector {
            texture_variance: 3000.0,
            ..fixtures::neutral()
        };
        assert_eq!(flat.regularity(), 1.0);
        assert!((rough.regularity() - 0.25).abs() < 1e-12);
    }

    #[test]
    fn non_finite_detected() {
        let f = FeatureVector {
            symmetry: f64::NAN,
            ..fixtures::neutral()
        };
        assert!(!f.is_finite());
        assert!(fixtures::neutral().is_finite());
    }
}
