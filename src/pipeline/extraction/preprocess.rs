//! Input boundary: turn caller data into a validated `RgbImage`.
//!
//! The engine itself consumes decoded RGB buffers. These helpers sit at the
//! edge for callers holding raw pixel bytes or an encoded file; format policy
//! (allowed extensions, dimension limits) stays with the caller.

use image::{DynamicImage, GrayImage, Luma, RgbImage};
use tracing::debug;

use super::ExtractionError;

/// Maximum encoded input size before rejecting.
/// Prevents OOM on corrupt/adversarial files.
const MAX_IMAGE_BYTES: usize = 50 * 1024 * 1024; // 50 MB

/// BT.601 luma weights, matching the common RGB→gray conversion.
const LUMA_R: f32 = 0.299;
const LUMA_G: f32 = 0.587;
const LUMA_B: f32 = 0.114;

/// Check that an image has at least one pixel.
pub fn validate_dimensions(image: &RgbImage) -> Result<(), ExtractionError> {
    let (width, height) = image.dimensions();
    if image.as_raw().is_empty() && width == 0 && height == 0 {
        return Err(ExtractionError::EmptyBuffer);
    }
    if width == 0 || height == 0 {
        return Err(ExtractionError::ZeroArea { width, height });
    }
    Ok(())
}

/// Wrap raw interleaved RGB bytes (row-major, 3 bytes per pixel).
pub fn image_from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<RgbImage, ExtractionError> {
    if data.is_empty() {
        return Err(ExtractionError::EmptyBuffer);
    }
    if width == 0 || height == 0 {
        return Err(ExtractionError::ZeroArea { width, height });
    }

    let expected = (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(3))
        .ok_or(ExtractionError::BufferSizeMismatch {
            expected: usize::MAX,
            actual: data.len(),
        })?;
    if data.len() != expected {
        return Err(ExtractionError::BufferSizeMismatch {
            expected,
            actual: data.len(),
        });
    }

    RgbImage::from_raw(width, height, data).ok_or(ExtractionError::BufferSizeMismatch {
        expected,
        actual: 0,
    })
}

/// Decode an encoded image (PNG, JPEG, TIFF) and convert it to RGB.
pub fn decode_image(bytes: &[u8]) -> Result<RgbImage, ExtractionError> {
    if bytes.is_empty() {
        return Err(ExtractionError::EmptyBuffer);
    }
    if bytes.len() > MAX_IMAGE_BYTES {
        return Err(ExtractionError::InputTooLarge {
            limit_mb: MAX_IMAGE_BYTES / (1024 * 1024),
        });
    }

    let img = image::load_from_memory(bytes).map_err(|e| ExtractionError::Decode(e.to_string()))?;
    let rgb = to_rgb(img);
    validate_dimensions(&rgb)?;

    debug!(
        size = format!("{}x{}", rgb.width(), rgb.height()),
        bytes = bytes.len(),
        "Decoded lesion image"
    );
    Ok(rgb)
}

/// Convert any decoded image to 8-bit RGB, dropping alpha.
pub fn to_rgb(img: DynamicImage) -> RgbImage {
    match img {
        DynamicImage::ImageRgb8(rgb) => rgb,
        other => other.to_rgb8(),
    }
}

/// Convert RGB image to grayscale using ITU-R BT.601 luminance, rounded.
pub fn rgb_to_gray(rgb: &RgbImage) -> GrayImage {
    let (w, h) = rgb.dimensions();
    let mut gray = GrayImage::new(w, h);
    for (x, y, p) in rgb.enumerate_pixels() {
        let luma = LUMA_R * p.0[0] as f32 + LUMA_G * p.0[1] as f32 + LUMA_B * p.0[2] as f32;
        gray.put_pixel(x, y, Luma([luma.round().clamp(0.0, 255.0) as u8]));
    }
    gray
}

/// Channel-mean grayscale normalized to [0,1], row-major.
///
/// The ABCDE descriptors are defined on this plane rather than on luma.
pub fn mean_gray_plane(rgb: &RgbImage) -> Vec<f64> {
    rgb.pixels()
        .map(|p| (p.0[0] as f64 + p.0[1] as f64 + p.0[2] as f64) / (3.0 * 255.0))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgb};
    use std::io::Cursor;

    fn encode_png(img: &RgbImage) -> Vec<u8> {
        let mut cursor = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(img.clone())
            .write_to(&mut cursor, ImageFormat::Png)
            .unwrap();
        cursor.into_inner()
    }

    #[test]
    fn from_raw_accepts_exact_buffer() {
        let img = image_from_raw(2, 2, vec![10; 12]).unwrap();
        assert_eq!(img.dimensions(), (2, 2));
        assert_eq!(img.get_pixel(1, 1).0, [10, 10, 10]);
    }

    #[test]
    fn from_raw_rejects_empty() {
        assert_eq!(image_from_raw(0, 0, vec![]), Err(ExtractionError::EmptyBuffer));
        assert_eq!(image_from_raw(4, 4, vec![]), Err(ExtractionError::EmptyBuffer));
    }

    #[test]
    fn from_raw_rejects_zero_area() {
        assert_eq!(
            image_from_raw(0, 5, vec![1, 2, 3]),
            Err(ExtractionError::ZeroArea { width: 0, height: 5 })
        );
    }

    #[test]
    fn from_raw_rejects_short_buffer() {
        assert_eq!(
            image_from_raw(2, 2, vec![0; 11]),
            Err(ExtractionError::BufferSizeMismatch { expected: 12, actual: 11 })
        );
    }

    #[test]
    fn validate_rejects_empty_image() {
        let img = RgbImage::new(0, 0);
        assert_eq!(validate_dimensions(&img), Err(ExtractionError::EmptyBuffer));
        let img = RgbImage::new(3, 0);
        assert_eq!(
            validate_dimensions(&img),
            Err(ExtractionError::ZeroArea { width: 3, height: 0 })
        );
    }

    #[test]
    fn decode_png_roundtrip_dimensions() {
        let img = RgbImage::from_pixel(8, 5, Rgb([200, 100, 50]));
        let decoded = decode_image(&encode_png(&img)).unwrap();
        assert_eq!(decoded.dimensions(), (8, 5));
        assert_eq!(decoded.get_pixel(0, 0).0, [200, 100, 50]);
    }

    #[test]
    fn decode_rejects_zero_bytes() {
        assert_eq!(decode_image(&[]), Err(ExtractionError::EmptyBuffer));
    }

    #[test]
    fn decode_rejects_garbage() {
        let result = decode_image(&[0x42; 128]);
        assert!(matches!(result, Err(ExtractionError::Decode(_))), "Got {result:?}");
    }

    #[test]
    fn gray_uses_bt601_weights() {
        let img = RgbImage::from_pixel(1, 1, Rgb([255, 0, 0]));
        assert_eq!(rgb_to_gray(&img).get_pixel(0, 0).0[0], 76);
        let img = RgbImage::from_pixel(1, 1, Rgb([128, 128, 128]));
        assert_eq!(rgb_to_gray(&img).get_pixel(0, 0).0[0], 128);
    }

    #[test]
    fn mean_gray_plane_is_normalized() {
        let img = RgbImage::from_pixel(2, 1, Rgb([255, 255, 255]));
        assert_eq!(mean_gray_plane(&img), vec![1.0, 1.0]);
        let img = RgbImage::from_pixel(1, 1, Rgb([255, 0, 0]));
        assert!((mean_gray_plane(&img)[0] - 1.0 / 3.0).abs() < 1e-12);
    }
}
