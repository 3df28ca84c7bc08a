//! Texture and shape descriptors on the 8-bit grayscale image.

use image::{GrayImage, Luma};
use imageproc::contours::{find_contours, BorderType, Contour};
use imageproc::contrast::otsu_level;
use imageproc::edges::canny;
use imageproc::point::Point;
use tracing::debug;

/// Canny hysteresis thresholds (gradient magnitude).
pub const CANNY_LOW_THRESHOLD: f32 = 50.0;
pub const CANNY_HIGH_THRESHOLD: f32 = 150.0;

/// Circularity reported when no usable lesion contour exists.
pub const DEFAULT_CIRCULARITY: f64 = 0.0;

/// Fraction of pixels the edge detector marks.
pub fn edge_density(gray: &GrayImage) -> f64 {
    let total = (gray.width() as u64) * (gray.height() as u64);
    if total == 0 {
        return 0.0;
    }
    let edges = canny(gray, CANNY_LOW_THRESHOLD, CANNY_HIGH_THRESHOLD);
    let edge_pixels = edges.pixels().filter(|p| p.0[0] > 0).count() as f64;
    edge_pixels / total as f64
}

/// Left/right mirror similarity: `1 − mean|left − mirrored right| / 255`.
///
/// Compares column `x` with column `w−1−x` for every `x < w/2`. A single
/// column has nothing to compare and counts as perfectly symmetric.
pub fn horizontal_symmetry(gray: &GrayImage) -> f64 {
    let (w, h) = gray.dimensions();
    let half = w / 2;
    if half == 0 || h == 0 {
        return 1.0;
    }

    let mut diff_sum = 0u64;
    for y in 0..h {
        for x in 0..half {
            let left = gray.get_pixel(x, y).0[0] as i32;
            let right = gray.get_pixel(w - 1 - x, y).0[0] as i32;
            diff_sum += (left - right).unsigned_abs() as u64;
        }
    }

    let mean = diff_sum as f64 / (half as u64 * h as u64) as f64;
    1.0 - mean / 255.0
}

/// Circularity `4π·area/perimeter²` of the largest outer contour after
/// Otsu binarization.
///
/// The mask is framed by a one-pixel background border so a foreground
/// region touching the image edge still yields an outer contour.
///
/// Returns [`DEFAULT_CIRCULARITY`] when the binary mask is uniform (no
/// foreground/background split), when no contour is found, or when the
/// perimeter is zero. These degenerate-contour cases are not errors.
pub fn contour_circularity(gray: &GrayImage) -> f64 {
    let level = otsu_level(gray);
    let binary = binarize(gray, level);

    let foreground = binary.pixels().filter(|p| p.0[0] > 0).count();
    let total = gray.pixels().len();
    if foreground == 0 || foreground == total {
        debug!(level, foreground, "Degenerate contour: uniform binary mask");
        return DEFAULT_CIRCULARITY;
    }

    let contours: Vec<Contour<i32>> = find_contours(&binary);
    debug!(level, foreground, contours = contours.len(), "Contours traced");
    let largest = contours
        .iter()
        .filter(|c| matches!(c.border_type, BorderType::Outer) && c.parent.is_none())
        .map(|c| (polygon_area(&c.points), polygon_perimeter(&c.points)))
        .max_by(|a, b| a.0.total_cmp(&b.0));

    match largest {
        Some((area, perimeter)) if perimeter > 0.0 => {
            4.0 * std::f64::consts::PI * area / (perimeter * perimeter)
        }
        Some(_) => {
            debug!("Degenerate contour: zero perimeter");
            DEFAULT_CIRCULARITY
        }
        None => {
            debug!("Degenerate contour: no outer contour found");
            DEFAULT_CIRCULARITY
        }
    }
}

/// Pixels strictly above `level` become foreground (255), inside a
/// one-pixel background frame.
fn binarize(gray: &GrayImage, level: u8) -> GrayImage {
    let (w, h) = gray.dimensions();
    GrayImage::from_fn(w + 2, h + 2, |x, y| {
        let inside = (1..=w).contains(&x) && (1..=h).contains(&y);
        if inside && gray.get_pixel(x - 1, y - 1).0[0] > level {
            Luma([255])
        } else {
            Luma([0])
        }
    })
}

/// Enclosed area of a closed polygon (shoelace formula).
pub fn polygon_area(points: &[Point<i32>]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut twice_area = 0i64;
    for (i, p) in points.iter().enumerate() {
        let q = &points[(i + 1) % points.len()];
        twice_area += p.x as i64 * q.y as i64 - q.x as i64 * p.y as i64;
    }
    twice_area.abs() as f64 / 2.0
}

/// Length of the closed polyline through `points`.
pub fn polygon_perimeter(points: &[Point<i32>]) -> f64 {
    if points.len() < 2 {
        return 0.0;
    }
    points
        .iter()
        .zip(points.iter().cycle().skip(1))
        .map(|(p, q)| {
            let dx = (q.x - p.x) as f64;
            let dy = (q.y - p.y) as f64;
            dx.hypot(dy)
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn disc(size: u32, radius: f64) -> GrayImage {
        let c = size as f64 / 2.0;
        GrayImage::from_fn(size, size, |x, y| {
            let dx = x as f64 + 0.5 - c;
            let dy = y as f64 + 0.5 - c;
            if dx * dx + dy * dy <= radius * radius {
                Luma([220])
            } else {
                Luma([30])
            }
        })
    }

    #[test]
    fn uniform_image_has_no_edges() {
        let gray = GrayImage::from_pixel(50, 50, Luma([128]));
        assert_eq!(edge_density(&gray), 0.0);
    }

    #[test]
    fn sharp_step_produces_edges() {
        let gray = GrayImage::from_fn(64, 64, |x, _| if x < 32 { Luma([0]) } else { Luma([255]) });
        let density = edge_density(&gray);
        assert!(density > 0.0 && density < 0.2, "Got {density}");
    }

    #[test]
    fn symmetry_of_uniform_is_one() {
        let gray = GrayImage::from_pixel(10, 7, Luma([90]));
        assert_eq!(horizontal_symmetry(&gray), 1.0);
    }

    #[test]
    fn symmetry_of_half_black_half_white_is_zero() {
        let gray = GrayImage::from_fn(10, 4, |x, _| if x < 5 { Luma([0]) } else { Luma([255]) });
        assert!(horizontal_symmetry(&gray).abs() < 1e-12);
    }

    #[test]
    fn symmetry_single_column() {
        let gray = GrayImage::from_pixel(1, 5, Luma([3]));
        assert_eq!(horizontal_symmetry(&gray), 1.0);
    }

    #[test]
    fn symmetry_odd_width_skips_center_column() {
        // Center column differs; mirrored pairs are equal.
        let gray = GrayImage::from_fn(5, 2, |x, _| if x == 2 { Luma([255]) } else { Luma([10]) });
        assert_eq!(horizontal_symmetry(&gray), 1.0);
    }

    #[test]
    fn circularity_uniform_defaults_to_zero() {
        let gray = GrayImage::from_pixel(100, 100, Luma([128]));
        assert_eq!(contour_circularity(&gray), DEFAULT_CIRCULARITY);
    }

    #[test]
    fn circularity_of_disc_is_high() {
        let c = contour_circularity(&disc(120, 40.0));
        assert!(c > 0.7 && c <= 1.05, "Disc circularity should approach 1, got {c}");
    }

    #[test]
    fn circularity_of_thin_bar_is_low() {
        let gray = GrayImage::from_fn(120, 120, |x, y| {
            if (10..110).contains(&x) && (58..62).contains(&y) {
                Luma([230])
            } else {
                Luma([20])
            }
        });
        let c = contour_circularity(&gray);
        assert!(c < 0.2, "Thin bar circularity should be low, got {c}");
    }

    #[test]
    fn region_touching_frame_has_contour() {
        // Light skin fills the frame around a dark lesion.
        let skin = GrayImage::from_fn(80, 80, |x, y| {
            let dx = x as f64 + 0.5 - 40.0;
            let dy = y as f64 + 0.5 - 40.0;
            if dx * dx + dy * dy < 25.0 * 25.0 {
                Luma([40])
            } else {
                Luma([210])
            }
        });
        let c = contour_circularity(&skin);
        // Outer contour runs along the frame: a square, π/4.
        assert!(c > 0.6 && c < 0.9, "Frame contour should be square-like, got {c}");

        let half = GrayImage::from_fn(60, 40, |x, _| if x < 30 { Luma([200]) } else { Luma([20]) });
        let c = contour_circularity(&half);
        assert!(c > 0.0, "Left half touches the frame, got {c}");
    }

    #[test]
    fn binarize_adds_background_frame() {
        let gray = GrayImage::from_pixel(3, 2, Luma([200]));
        let binary = binarize(&gray, 100);
        assert_eq!(binary.dimensions(), (5, 4));
        assert_eq!(binary.get_pixel(0, 0).0[0], 0);
        assert_eq!(binary.get_pixel(4, 3).0[0], 0);
        assert_eq!(binary.get_pixel(1, 1).0[0], 255);
        assert_eq!(binary.get_pixel(3, 2).0[0], 255);
    }

    #[test]
    fn polygon_helpers_on_square() {
        let square = vec![
            Point::new(0, 0),
            Point::new(4, 0),
            Point::new(4, 4),
            Point::new(0, 4),
        ];
        assert_eq!(polygon_area(&square), 16.0);
        assert_eq!(polygon_perimeter(&square), 16.0);
        assert_eq!(polygon_area(&square[..2]), 0.0);
    }
}
