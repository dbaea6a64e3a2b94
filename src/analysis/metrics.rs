/// Metric analyzers scoring one condition each over the masked tooth region
use super::config::{FlawConfig, MetricKind, YellownessConfig};
use super::context::AnalysisContext;
use super::report::Severity;

/// Fallback advice when every metric lands in the good bucket.
pub const MAINTENANCE_TIP: &str =
    "Keep up your current oral care routine and regular dental checkups.";

/// One named indicator. Scores are in [0,1]; higher is worse.
pub trait MetricAnalyzer: Send + Sync {
    fn kind(&self) -> MetricKind;
    fn name(&self) -> &'static str;
    fn score(&self, context: &AnalysisContext) -> f32;
    /// Canned advice for a non-good bucket. None when the bucket is good.
    fn recommendation(&self, severity: Severity) -> Option<&'static str>;
}

fn clamp01(value: f32) -> f32 {
    value.clamp(0.0, 1.0)
}

pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> (f32, f32, f32) {
    let rf = r as f32 / 255.0;
    let gf = g as f32 / 255.0;
    let bf = b as f32 / 255.0;

    let max = rf.max(gf).max(bf);
    let min = rf.min(gf).min(bf);
    let delta = max - min;

    let mut hue = if delta == 0.0 {
        0.0
    } else if max == rf {
        60.0 * (((gf - bf) / delta) % 6.0)
    } else if max == gf {
        60.0 * ((bf - rf) / delta + 2.0)
    } else {
        60.0 * ((rf - gf) / delta + 4.0)
    };
    if hue < 0.0 {
        hue += 360.0;
    }

    let saturation = if max == 0.0 { 0.0 } else { delta / max };

    (hue, saturation, max)
}

/// Yellowness: how far the masked region's mean color leans warm. A neutral
/// white tooth scores 0; a strong yellow cast saturates at 1.
pub struct YellownessAnalyzer {
    config: YellownessConfig,
}

impl YellownessAnalyzer {
    pub fn new(config: YellownessConfig) -> Self {
        Self { config }
    }
}

impl MetricAnalyzer for YellownessAnalyzer {
    fn kind(&self) -> MetricKind {
        MetricKind::Yellowness
    }

    fn name(&self) -> &'static str {
        "yellowness"
    }

    fn score(&self, context: &AnalysisContext) -> f32 {
        let step = context.sample_step() as usize;
        let (mut sum_r, mut sum_g, mut sum_b) = (0.0f64, 0.0f64, 0.0f64);
        let mut samples = 0u32;

        for y in (0..context.height()).step_by(step) {
            for x in (0..context.width()).step_by(step) {
                if !context.is_tooth(x, y) {
                    continue;
                }
                let [r, g, b] = context.pixel(x, y);
                sum_r += r as f64;
                sum_g += g as f64;
                sum_b += b as f64;
                samples += 1;
            }
        }
        if samples == 0 {
            return 0.0;
        }

        let n = samples as f64;
        // Warm bias: red+green average over blue. Yellow is exactly the
        // high-red, high-green, low-blue corner.
        let warm = (sum_r / n + sum_g / n) / 2.0 - sum_b / n;
        let raw = (warm / 255.0) as f32;

        clamp01(raw * self.config.gain)
    }

    fn recommendation(&self, severity: Severity) -> Option<&'static str> {
        match severity {
            Severity::Good => None,
            Severity::Moderate => Some(
                "Brush twice daily with a whitening toothpaste and cut back on coffee, tea, and red wine.",
            ),
            Severity::Severe => Some(
                "Consider a professional whitening treatment and schedule a dental cleaning to address the discoloration.",
            ),
        }
    }
}

/// Surface flaws: mean of four sub-scores over the masked region - gradient
/// edge density, local texture deviation, dark-spot coverage, and yellow-brown
/// stain coverage.
pub struct SurfaceFlawAnalyzer {
    config: FlawConfig,
}

impl SurfaceFlawAnalyzer {
    pub fn new(config: FlawConfig) -> Self {
        Self { config }
    }

    fn is_stain(&self, r: u8, g: u8, b: u8) -> bool {
        let (hue, saturation, value) = rgb_to_hsv(r, g, b);
        let (hue_min, hue_max) = self.config.stain_hue_range;
        hue >= hue_min
            && hue <= hue_max
            && saturation >= self.config.stain_saturation_floor
            && value <= self.config.stain_value_cap
    }
}

impl MetricAnalyzer for SurfaceFlawAnalyzer {
    fn kind(&self) -> MetricKind {
        MetricKind::SurfaceFlaws
    }

    fn name(&self) -> &'static str {
        "surface_flaws"
    }

    fn score(&self, context: &AnalysisContext) -> f32 {
        let step = context.sample_step() as usize;
        let (width, height) = (context.width(), context.height());

        // Pass 1: masked luma statistics and stain coverage
        let mut sum = 0.0f64;
        let mut sum_sq = 0.0f64;
        let mut masked = 0u32;
        let mut stain_hits = 0u32;
        for y in (0..height).step_by(step) {
            for x in (0..width).step_by(step) {
                if !context.is_tooth(x, y) {
                    continue;
                }
                let l = context.luma_at(x, y) as f64;
                sum += l;
                sum_sq += l * l;
                masked += 1;

                let [r, g, b] = context.pixel(x, y);
                if self.is_stain(r, g, b) {
                    stain_hits += 1;
                }
            }
        }
        if masked == 0 {
            return 0.0;
        }
        let n = masked as f64;
        let mean = sum / n;
        let std_dev = (sum_sq / n - mean * mean).max(0.0).sqrt();
        let dark_threshold = (mean - self.config.dark_spot_sigma as f64 * std_dev) as f32;

        // Pass 2: gradients, texture, and dark spots
        let mut interior = 0u32;
        let mut edge_hits = 0u32;
        let mut dark_hits = 0u32;
        let mut texture_sum = 0.0f64;
        for y in (0..height).step_by(step) {
            for x in (0..width).step_by(step) {
                if !context.is_tooth(x, y) {
                    continue;
                }
                if context.luma_at(x, y) < dark_threshold {
                    dark_hits += 1;
                }
                if x == 0 || y == 0 || x + 1 >= width || y + 1 >= height {
                    continue;
                }

                let gx = (context.luma_at(x + 1, y) - context.luma_at(x - 1, y)).abs();
                let gy = (context.luma_at(x, y + 1) - context.luma_at(x, y - 1)).abs();
                if gx + gy > self.config.edge_threshold {
                    edge_hits += 1;
                }

                let mut neighborhood = 0.0f32;
                for ny in (y - 1)..=(y + 1) {
                    for nx in (x - 1)..=(x + 1) {
                        neighborhood += context.luma_at(nx, ny);
                    }
                }
                texture_sum += (context.luma_at(x, y) - neighborhood / 9.0).abs() as f64;
                interior += 1;
            }
        }

        let edge_score = if interior > 0 {
            clamp01(edge_hits as f32 / interior as f32 * self.config.edge_gain)
        } else {
            0.0
        };
        let texture_score = if interior > 0 {
            clamp01((texture_sum / interior as f64) as f32 / self.config.texture_norm)
        } else {
            0.0
        };
        let dark_score = clamp01(dark_hits as f32 / masked as f32 * self.config.dark_spot_gain);
        let stain_score = clamp01(stain_hits as f32 / masked as f32 * self.config.stain_gain);

        (edge_score + texture_score + dark_score + stain_score) / 4.0
    }

    fn recommendation(&self, severity: Severity) -> Option<&'static str> {
        match severity {
            Severity::Good => None,
            Severity::Moderate => Some(
                "Improve your daily brushing and flossing routine and consider a professional cleaning.",
            ),
            Severity::Severe => Some(
                "Visible surface defects detected; schedule a dental examination promptly.",
            ),
        }
    }
}
