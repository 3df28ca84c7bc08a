//! Color statistics over an RGB image.
//!
//! HSV follows the 8-bit convention used by most vision toolkits:
//! V = max(R,G,B), S = 255·(V−min)/V, H = degrees/2 in [0,180).

use image::{Rgb, RgbImage};

/// Number of 8-bit hue bins (degrees halved).
const HUE_BINS: usize = 180;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStats {
    pub red_mean: f64,
    pub green_mean: f64,
    pub blue_mean: f64,
    pub brightness: f64,
    pub saturation: f64,
    pub color_variance: f64,
    pub dominant_hue: f64,
}

/// Convert one pixel to 8-bit HSV `(h, s, v)`.
pub fn rgb_to_hsv(pixel: &Rgb<u8>) -> (u8, u8, u8) {
    let [r, g, b] = pixel.0;
    let v = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = (v - min) as f64;

    if v == 0 || delta == 0.0 {
        return (0, 0, v);
    }

    let s = (255.0 * delta / v as f64).round() as u8;
    let (rf, gf, bf) = (r as f64, g as f64, b as f64);
    let mut h = if v == r {
        60.0 * (gf - bf) / delta
    } else if v == g {
        120.0 + 60.0 * (bf - rf) / delta
    } else {
        240.0 + 60.0 * (rf - gf) / delta
    };
    if h < 0.0 {
        h += 360.0;
    }
    let h = ((h / 2.0).round() as usize % HUE_BINS) as u8;
    (h, s, v)
}

/// Compute every color descriptor in one pass over the pixels.
///
/// Caller guarantees a non-empty image.
pub fn color_stats(image: &RgbImage) -> ColorStats {
    let count = image.pixels().len() as f64;

    let mut channel_sum = [0.0f64; 3];
    let mut value_sum = 0.0f64;
    let mut saturation_sum = 0.0f64;
    let mut all_sum = 0.0f64;
    let mut all_sum_sq = 0.0f64;
    let mut hue_hist = [0u64; HUE_BINS];

    for p in image.pixels() {
        for (c, &v) in p.0.iter().enumerate() {
            let v = v as f64;
            channel_sum[c] += v;
            all_sum += v;
            all_sum_sq += v * v;
        }
        let (h, s, v) = rgb_to_hsv(p);
        value_sum += v as f64;
        saturation_sum += s as f64;
        hue_hist[h as usize] += 1;
    }

    let samples = count * 3.0;
    let mean = all_sum / samples;
    let variance = (all_sum_sq / samples - mean * mean).max(0.0);

    ColorStats {
        red_mean: channel_sum[0] / count,
        green_mean: channel_sum[1] / count,
        blue_mean: channel_sum[2] / count,
        brightness: value_sum / count,
        saturation: saturation_sum / count,
        color_variance: variance.sqrt(),
        dominant_hue: histogram_median(&hue_hist),
    }
}

/// Median of the values counted in `hist`; the two middle values are
/// averaged for an even total. 0 for an empty histogram.
pub fn histogram_median(hist: &[u64]) -> f64 {
    let total: u64 = hist.iter().sum();
    if total == 0 {
        return 0.0;
    }

    let nth = |k: u64| -> usize {
        let mut seen = 0u64;
        for (bin, &n) in hist.iter().enumerate() {
            seen += n;
            if seen > k {
                return bin;
            }
        }
        hist.len() - 1
    };

    if total % 2 == 1 {
        nth(total / 2) as f64
    } else {
        (nth(total / 2 - 1) as f64 + nth(total / 2) as f64) / 2.0
    }
}

/// Population standard deviation of each channel on the [0,1] scale.
pub fn channel_std_normalized(image: &RgbImage) -> [f64; 3] {
    let count = image.pixels().len() as f64;
    if count == 0.0 {
        return [0.0; 3];
    }

    let mut sum = [0.0f64; 3];
    let mut sum_sq = [0.0f64; 3];
    for p in image.pixels() {
        for c in 0..3 {
            let v = p.0[c] as f64 / 255.0;
            sum[c] += v;
            sum_sq[c] += v * v;
        }
    }

    let mut out = [0.0f64; 3];
    for c in 0..3 {
        let mean = sum[c] / count;
        out[c] = (sum_sq[c] / count - mean * mean).max(0.0).sqrt();
    }
    out
}
