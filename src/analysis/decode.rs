use super::config::QualityLimits;
use super::context::luma;
use crate::error::AnalysisError;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use image::{DynamicImage, RgbImage};

/// Decode the `image` field of an analyze request: either a bare base64
/// string or a browser `data:image/...;base64,` URL.
pub fn decode_image(payload: &str) -> Result<DynamicImage, AnalysisError> {
    let trimmed = payload.trim();
    if trimmed.is_empty() {
        return Err(AnalysisError::InvalidImage(
            "empty image payload".to_string(),
        ));
    }

    let encoded = match trimmed.split_once(',') {
        Some((prefix, rest)) if prefix.starts_with("data:") => rest,
        _ => trimmed,
    };

    let bytes = STANDARD
        .decode(encoded)
        .map_err(|e| AnalysisError::InvalidImage(format!("base64 decode failed: {e}")))?;
    if bytes.is_empty() {
        return Err(AnalysisError::InvalidImage(
            "empty image payload".to_string(),
        ));
    }

    image::load_from_memory(&bytes)
        .map_err(|e| AnalysisError::InvalidImage(format!("undecodable image data: {e}")))
}

/// Reject captures below the minimum resolution. Checked against the
/// original dimensions, before any downscaling.
pub fn validate_dimensions(
    width: u32,
    height: u32,
    limits: &QualityLimits,
) -> Result<(), AnalysisError> {
    if width < limits.min_edge || height < limits.min_edge {
        return Err(AnalysisError::InvalidImage(
            "image too small; use a higher resolution capture".to_string(),
        ));
    }
    Ok(())
}

/// Reject underexposed and overexposed captures by mean luma.
pub fn validate_brightness(
    rgb: &RgbImage,
    limits: &QualityLimits,
    sample_step: u32,
) -> Result<(), AnalysisError> {
    let step = sample_step.max(1) as usize;
    let mut sum = 0.0f64;
    let mut samples = 0u32;
    for y in (0..rgb.height()).step_by(step) {
        for x in (0..rgb.width()).step_by(step) {
            let [r, g, b] = rgb.get_pixel(x, y).0;
            sum += luma(r, g, b) as f64;
            samples += 1;
        }
    }
    if samples == 0 {
        return Err(AnalysisError::InvalidImage(
            "image has zero area".to_string(),
        ));
    }

    let mean = (sum / samples as f64) as f32;
    if mean < limits.dark_floor {
        return Err(AnalysisError::InvalidImage(
            "image too dark; retake the photo with better lighting".to_string(),
        ));
    }
    if mean > limits.bright_ceiling {
        return Err(AnalysisError::InvalidImage(
            "image too bright; reduce lighting or avoid flash".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb};
    use std::io::Cursor;

    fn png_base64(width: u32, height: u32, pixel: [u8; 3]) -> String {
        let rgb = ImageBuffer::<Rgb<u8>, Vec<u8>>::from_pixel(width, height, Rgb(pixel));
        let mut buffer = Vec::new();
        DynamicImage::ImageRgb8(rgb)
            .write_to(&mut Cursor::new(&mut buffer), image::ImageFormat::Png)
            .expect("Failed to encode test image");
        STANDARD.encode(&buffer)
    }

    #[test]
    fn test_decode_rejects_empty_payload() {
        assert!(matches!(
            decode_image(""),
            Err(AnalysisError::InvalidImage(_))
        ));
        assert!(matches!(
            decode_image("   "),
            Err(AnalysisError::InvalidImage(_))
        ));
    }

    #[test]
    fn test_decode_rejects_bad_base64() {
        assert!(matches!(
            decode_image("!!!not-base64!!!"),
            Err(AnalysisError::InvalidImage(_))
        ));
    }

    #[test]
    fn test_decode_rejects_undecodable_bytes() {
        let payload = STANDARD.encode(b"definitely not an image");
        assert!(matches!(
            decode_image(&payload),
            Err(AnalysisError::InvalidImage(_))
        ));
    }

    #[test]
    fn test_decode_raw_base64() {
        let payload = png_base64(8, 8, [200, 200, 200]);
        let image = decode_image(&payload).expect("Failed to decode raw base64 image");
        assert_eq!((image.width(), image.height()), (8, 8));
    }

    #[test]
    fn test_decode_data_url() {
        let payload = format!("data:image/png;base64,{}", png_base64(8, 8, [10, 20, 30]));
        let image = decode_image(&payload).expect("Failed to decode data URL image");
        assert_eq!((image.width(), image.height()), (8, 8));
    }

    #[test]
    fn test_dimension_limits() {
        let limits = QualityLimits::default();
        assert!(validate_dimensions(100, 300, &limits).is_err());
        assert!(validate_dimensions(300, 100, &limits).is_err());
        assert!(validate_dimensions(300, 300, &limits).is_ok());
    }

    #[test]
    fn test_brightness_limits() {
        let limits = QualityLimits::default();

        let dark = ImageBuffer::<Rgb<u8>, Vec<u8>>::from_pixel(32, 32, Rgb([20, 20, 20]));
        assert!(validate_brightness(&dark, &limits, 1).is_err());

        let bright = ImageBuffer::<Rgb<u8>, Vec<u8>>::from_pixel(32, 32, Rgb([250, 250, 250]));
        assert!(validate_brightness(&bright, &limits, 1).is_err());

        let fine = ImageBuffer::<Rgb<u8>, Vec<u8>>::from_pixel(32, 32, Rgb([180, 180, 180]));
        assert!(validate_brightness(&fine, &limits, 1).is_ok());
    }
}
