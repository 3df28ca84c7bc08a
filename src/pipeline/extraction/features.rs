//! Feature extraction orchestrator.
//!
//! Runs every descriptor over one decoded image and collects them into a
//! [`FeatureVector`]. No I/O; the input is never mutated.

use image::RgbImage;
use tracing::debug;

use super::color::{channel_std_normalized, color_stats};
use super::dermoscopic::{
    border_irregularity, estimated_diameter, texture_variance, vertical_asymmetry, GrayPlane,
};
use super::preprocess::{mean_gray_plane, rgb_to_gray, validate_dimensions};
use super::shape::{contour_circularity, edge_density, horizontal_symmetry};
use super::ExtractionError;
use crate::models::FeatureVector;

/// Compute the full feature vector for one image.
pub fn extract_features(image: &RgbImage) -> Result<FeatureVector, ExtractionError> {
    validate_dimensions(image)?;
    let (width, height) = image.dimensions();

    let color = color_stats(image);

    let gray = rgb_to_gray(image);
    let edges = edge_density(&gray);
    let symmetry = horizontal_symmetry(&gray);
    let circularity = contour_circularity(&gray);

    let values = mean_gray_plane(image);
    let plane = GrayPlane::new(&values, width as usize, height as usize);
    let color_variation: f64 = channel_std_normalized(image).iter().sum();

    let features = FeatureVector {
        red_mean: color.red_mean,
        green_mean: color.green_mean,
        blue_mean: color.blue_mean,
        brightness: color.brightness,
        saturation: color.saturation,
        color_variance: color.color_variance,
        edge_density: edges,
        dominant_hue: color.dominant_hue,
        symmetry,
        circularity,
        asymmetry: vertical_asymmetry(&plane),
        border_irregularity: border_irregularity(&plane),
        color_variation,
        estimated_diameter: estimated_diameter(&plane),
        texture_variance: texture_variance(image),
    };

    debug!(
        size = format!("{width}x{height}"),
        brightness = features.brightness,
        color_variance = features.color_variance,
        edge_density = features.edge_density,
        symmetry = features.symmetry,
        circularity = features.circularity,
        diameter_mm = features.estimated_diameter,
        "Features extracted"
    );

    Ok(features)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn uniform_gray_is_flat_and_symmetric() {
        let img = RgbImage::from_pixel(100, 100, Rgb([128, 128, 128]));
        let f = extract_features(&img).unwrap();

        assert!((f.symmetry - 1.0).abs() < 1e-9, "Expected symmetry 1, got {}", f.symmetry);
        assert!(f.edge_density.abs() < 1e-9, "Expected no edges, got {}", f.edge_density);
        assert_eq!(f.circularity, 0.0);
        assert!(f.asymmetry.abs() < 1e-9);
        assert!(f.border_irregularity.abs() < 1e-9);
        assert!(f.color_variation.abs() < 1e-9);
        assert_eq!(f.estimated_diameter, 0.0);
        assert_eq!(f.texture_variance, 0.0);
        assert!((f.brightness - 128.0).abs() < 1e-9);
        assert_eq!(f.saturation, 0.0);
        assert!(f.is_finite());
    }

    #[test]
    fn uniform_red_color_descriptors() {
        let img = RgbImage::from_pixel(64, 64, Rgb([220, 40, 40]));
        let f = extract_features(&img).unwrap();

        assert!((f.red_mean - 220.0).abs() < 1e-9);
        assert!((f.saturation - 209.0).abs() < 1e-9);
        assert_eq!(f.dominant_hue, 0.0);
        assert!((f.brightness - 220.0).abs() < 1e-9);
        assert!((f.color_variance - 7200f64.sqrt()).abs() < 1e-6);
    }

    #[test]
    fn single_pixel_image_is_valid() {
        let img = RgbImage::from_pixel(1, 1, Rgb([10, 200, 30]));
        let f = extract_features(&img).unwrap();
        assert_eq!(f.symmetry, 1.0);
        assert_eq!(f.asymmetry, 0.0);
        assert_eq!(f.border_irregularity, 0.0);
        assert!(f.is_finite());
    }

    #[test]
    fn empty_image_is_rejected() {
        let img = RgbImage::new(0, 0);
        assert_eq!(extract_features(&img), Err(ExtractionError::EmptyBuffer));
    }

    #[test]
    fn input_is_not_mutated() {
        let img = RgbImage::from_fn(40, 30, |x, y| Rgb([(x * 6) as u8, (y * 8) as u8, 90]));
        let before = img.clone();
        let _ = extract_features(&img).unwrap();
        assert_eq!(img, before);
    }

    #[test]
    fn extraction_is_deterministic() {
        let img = RgbImage::from_fn(48, 48, |x, y| Rgb([((x * y) % 256) as u8, (x * 5) as u8, (y * 3) as u8]));
        assert_eq!(extract_features(&img).unwrap(), extract_features(&img).unwrap());
    }

    #[test]
    fn dark_lesion_on_light_skin() {
        let img = RgbImage::from_fn(80, 80, |x, y| {
            let dx = x as f64 + 0.5 - 40.0;
            let dy = y as f64 + 0.5 - 40.0;
            let r = (dx * dx + dy * dy).sqrt();
            if r < 25.0 {
                // Darker toward the center.
                let d = r as u8;
                Rgb([40 + d, 20 + d / 2, 15 + d / 2])
            } else {
                Rgb([230, 190, 170])
            }
        });
        let f = extract_features(&img).unwrap();
        assert!(f.circularity > 0.0, "Otsu split should yield a contour, got {}", f.circularity);
        assert!(f.edge_density > 0.0);
        assert!(f.estimated_diameter > 0.0, "Dark mask should be non-empty");
        assert!(f.symmetry > 0.95, "Centered disc is mirror symmetric, got {}", f.symmetry);
    }
}
