use super::config::RegionConfig;
use super::context::luma;
use image::RgbImage;

/// Pixel mask covering the part of the frame that looks like teeth.
#[derive(Debug, Clone)]
pub struct ToothMask {
    bits: Vec<bool>,
    width: u32,
    height: u32,
    coverage: f32,
    detected: bool,
}

impl ToothMask {
    /// Full-frame mask, used as the fallback when no tooth-like region stands
    /// out. Callers can still score every pixel; `detected` stays false.
    pub fn full(width: u32, height: u32) -> Self {
        Self {
            bits: vec![true; (width * height) as usize],
            width,
            height,
            coverage: 1.0,
            detected: false,
        }
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        self.bits[(y * self.width + x) as usize]
    }

    pub fn coverage(&self) -> f32 {
        self.coverage
    }

    pub fn detected(&self) -> bool {
        self.detected
    }
}

/// Finds tooth candidates: pixels at least as bright as the frame mean (with
/// an absolute floor) whose channel spread stays low. Teeth photograph bright
/// and nearly neutral; lips and gums carry far more red.
pub fn detect_tooth_region(rgb: &RgbImage, config: &RegionConfig, sample_step: u32) -> ToothMask {
    let (width, height) = rgb.dimensions();
    let step = sample_step.max(1) as usize;

    let mut luma_sum = 0.0f64;
    let mut samples = 0u32;
    for y in (0..height).step_by(step) {
        for x in (0..width).step_by(step) {
            let [r, g, b] = rgb.get_pixel(x, y).0;
            luma_sum += luma(r, g, b) as f64;
            samples += 1;
        }
    }
    if samples == 0 {
        return ToothMask::full(width, height);
    }
    let mean_luma = (luma_sum / samples as f64) as f32;
    let threshold = mean_luma.max(config.brightness_floor);

    let mut bits = vec![false; (width * height) as usize];
    let mut hits = 0u32;
    for y in 0..height {
        for x in 0..width {
            let [r, g, b] = rgb.get_pixel(x, y).0;
            let spread = r.max(g).max(b) - r.min(g).min(b);
            if luma(r, g, b) >= threshold && spread <= config.saturation_cap {
                bits[(y * width + x) as usize] = true;
                hits += 1;
            }
        }
    }

    let coverage = hits as f32 / (width * height) as f32;
    if coverage < config.min_coverage {
        // Nothing tooth-like stood out; score the whole frame instead.
        return ToothMask::full(width, height);
    }

    ToothMask {
        bits,
        width,
        height,
        coverage,
        detected: true,
    }
}
