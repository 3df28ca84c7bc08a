//! ABCDE-oriented descriptors on the normalized channel-mean grayscale.
//!
//! The plane is row-major, `width * height` values in [0,1].

use image::RgbImage;

/// Percentile of the grayscale distribution below which a pixel counts as
/// lesion (dark) tissue.
pub const DARK_MASK_PERCENTILE: f64 = 30.0;

/// Side of the reference frame the diameter calibration assumes, in pixels.
/// Mask areas are rescaled to this frame so the estimate does not depend on
/// input resolution.
pub const DIAMETER_REFERENCE_SIDE: f64 = 224.0;

/// Pixels per millimetre at the reference frame.
pub const DIAMETER_CALIBRATION: f64 = 10.0;

/// Borrowed view of a grayscale plane.
#[derive(Debug, Clone, Copy)]
pub struct GrayPlane<'a> {
    pub values: &'a [f64],
    pub width: usize,
    pub height: usize,
}

impl<'a> GrayPlane<'a> {
    pub fn new(values: &'a [f64], width: usize, height: usize) -> Self {
        debug_assert_eq!(values.len(), width * height);
        Self {
            values,
            width,
            height,
        }
    }

    #[inline]
    fn at(&self, x: usize, y: usize) -> f64 {
        self.values[y * self.width + x]
    }
}

/// Mean |top − vertically mirrored bottom| over the first `h/2` rows.
pub fn vertical_asymmetry(plane: &GrayPlane<'_>) -> f64 {
    let half = plane.height / 2;
    if half == 0 || plane.width == 0 {
        return 0.0;
    }

    let mut sum = 0.0;
    for y in 0..half {
        let mirror = plane.height - 1 - y;
        for x in 0..plane.width {
            sum += (plane.at(x, y) - plane.at(x, mirror)).abs();
        }
    }
    sum / (half * plane.width) as f64
}

/// Mean absolute first difference down columns plus across rows.
/// An axis with a single line contributes 0.
pub fn border_irregularity(plane: &GrayPlane<'_>) -> f64 {
    let (w, h) = (plane.width, plane.height);

    let vertical = if h > 1 {
        let mut sum = 0.0;
        for y in 1..h {
            for x in 0..w {
                sum += (plane.at(x, y) - plane.at(x, y - 1)).abs();
            }
        }
        sum / ((h - 1) * w) as f64
    } else {
        0.0
    };

    let horizontal = if w > 1 {
        let mut sum = 0.0;
        for y in 0..h {
            for x in 1..w {
                sum += (plane.at(x, y) - plane.at(x - 1, y)).abs();
            }
        }
        sum / (h * (w - 1)) as f64
    } else {
        0.0
    };

    vertical + horizontal
}

/// Approximate lesion diameter in millimetres from the dark-pixel mask.
pub fn estimated_diameter(plane: &GrayPlane<'_>) -> f64 {
    let total = plane.values.len();
    if total == 0 {
        return 0.0;
    }

    let threshold = percentile(plane.values, DARK_MASK_PERCENTILE);
    let dark = plane.values.iter().filter(|&&v| v < threshold).count();

    let reference_area = DIAMETER_REFERENCE_SIDE * DIAMETER_REFERENCE_SIDE;
    let scaled_area = dark as f64 * reference_area / total as f64;
    scaled_area.sqrt() / DIAMETER_CALIBRATION
}

/// Population variance of the channel-mean grayscale, in 8-bit units.
///
/// Accumulates integer `r+g+b` sums so a uniform image gives exactly 0.
pub fn texture_variance(image: &RgbImage) -> f64 {
    let n = image.pixels().len() as u128;
    if n == 0 {
        return 0.0;
    }
    let (sum, sum_sq) = image.pixels().fold((0u128, 0u128), |(sum, sum_sq), p| {
        let s = p.0.iter().map(|&c| c as u128).sum::<u128>();
        (sum + s, sum_sq + s * s)
    });
    // n²·var(r+g+b); the grayscale is (r+g+b)/3, so divide by 9 as well.
    let scaled = n * sum_sq - sum * sum;
    scaled as f64 / (n * n) as f64 / 9.0
}

/// Percentile with linear interpolation between closest ranks.
pub fn percentile(values: &[f64], pct: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let rank = (pct.clamp(0.0, 100.0) / 100.0) * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let frac = rank - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * frac
}
