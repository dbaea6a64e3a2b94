use super::region::ToothMask;
use image::RgbImage;

/// Rec. 709 luminance
pub fn luma(r: u8, g: u8, b: u8) -> f32 {
    0.2126 * r as f32 + 0.7152 * g as f32 + 0.0722 * b as f32
}

/// Shared per-scan context that flows through the metric analyzers.
///
/// Holds the decoded pixels, a precomputed luma grid, and the tooth region
/// mask so each analyzer can sample without re-deriving them.
pub struct AnalysisContext {
    rgb: RgbImage,
    luma: Vec<f32>,
    mask: ToothMask,
    sample_step: u32,
}

impl AnalysisContext {
    pub fn new(rgb: RgbImage, mask: ToothMask, sample_step: u32) -> Self {
        let (width, height) = rgb.dimensions();
        let mut luma_grid = Vec::with_capacity((width * height) as usize);
        for y in 0..height {
            for x in 0..width {
                let [r, g, b] = rgb.get_pixel(x, y).0;
                luma_grid.push(luma(r, g, b));
            }
        }

        Self {
            rgb,
            luma: luma_grid,
            mask,
            sample_step: sample_step.max(1),
        }
    }

    pub fn width(&self) -> u32 {
        self.rgb.width()
    }

    pub fn height(&self) -> u32 {
        self.rgb.height()
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        self.rgb.get_pixel(x, y).0
    }

    pub fn luma_at(&self, x: u32, y: u32) -> f32 {
        self.luma[(y * self.width() + x) as usize]
    }

    pub fn is_tooth(&self, x: u32, y: u32) -> bool {
        self.mask.contains(x, y)
    }

    pub fn mask(&self) -> &ToothMask {
        &self.mask
    }

    pub fn sample_step(&self) -> u32 {
        self.sample_step
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb};

    #[test]
    fn test_luma_grid_matches_pixels() {
        let rgb = ImageBuffer::<Rgb<u8>, Vec<u8>>::from_pixel(4, 4, Rgb([100, 150, 200]));
        let context = AnalysisContext::new(rgb, ToothMask::full(4, 4), 1);
        let expected = luma(100, 150, 200);
        assert_eq!(context.luma_at(0, 0), expected);
        assert_eq!(context.luma_at(3, 3), expected);
    }

    #[test]
    fn test_sample_step_floor() {
        let rgb = ImageBuffer::<Rgb<u8>, Vec<u8>>::from_pixel(2, 2, Rgb([0, 0, 0]));
        let context = AnalysisContext::new(rgb, ToothMask::full(2, 2), 0);
        assert_eq!(context.sample_step(), 1);
    }
}
