use serde::Serialize;

/// Configuration for the heuristic analyzer with tunable parameters
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    pub sample_step: u32,
    pub max_edge: u32,
    pub enabled_metrics: Vec<MetricKind>,
    pub severity: SeverityThresholds,
    pub weights: MetricWeights,
    pub quality: QualityLimits,
    pub region: RegionConfig,
    pub yellowness: YellownessConfig,
    pub flaws: FlawConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    Yellowness,
    SurfaceFlaws,
}

/// Severity bucket boundaries. The boundary value itself always classifies
/// into the higher (worse) bucket.
#[derive(Debug, Clone, Serialize)]
pub struct SeverityThresholds {
    pub good_below: f32,
    pub moderate_below: f32,
}

/// Relative weight of each metric in the overall score. Equal weights give
/// the plain mean.
#[derive(Debug, Clone, Serialize)]
pub struct MetricWeights {
    pub yellowness: f32,
    pub surface_flaws: f32,
}

impl MetricWeights {
    pub fn for_kind(&self, kind: MetricKind) -> f32 {
        match kind {
            MetricKind::Yellowness => self.yellowness,
            MetricKind::SurfaceFlaws => self.surface_flaws,
        }
    }
}

/// Capture quality gates applied before any scoring.
#[derive(Debug, Clone)]
pub struct QualityLimits {
    pub min_edge: u32,
    pub dark_floor: f32,
    pub bright_ceiling: f32,
}

#[derive(Debug, Clone)]
pub struct RegionConfig {
    pub brightness_floor: f32,
    pub saturation_cap: u8,
    pub min_coverage: f32,
}

#[derive(Debug, Clone)]
pub struct YellownessConfig {
    pub gain: f32,
}

#[derive(Debug, Clone)]
pub struct FlawConfig {
    pub edge_threshold: f32,
    pub edge_gain: f32,
    pub texture_norm: f32,
    pub dark_spot_sigma: f32,
    pub dark_spot_gain: f32,
    pub stain_hue_range: (f32, f32),
    pub stain_saturation_floor: f32,
    pub stain_value_cap: f32,
    pub stain_gain: f32,
}

impl Default for SeverityThresholds {
    fn default() -> Self {
        Self {
            good_below: 0.3,
            moderate_below: 0.6,
        }
    }
}

impl Default for MetricWeights {
    fn default() -> Self {
        Self {
            yellowness: 1.0,
            surface_flaws: 1.0,
        }
    }
}

impl Default for QualityLimits {
    fn default() -> Self {
        Self {
            min_edge: 200,
            dark_floor: 50.0,
            bright_ceiling: 240.0,
        }
    }
}

impl Default for RegionConfig {
    fn default() -> Self {
        Self {
            brightness_floor: 130.0,
            saturation_cap: 60,
            min_coverage: 0.05,
        }
    }
}

impl Default for YellownessConfig {
    fn default() -> Self {
        Self { gain: 2.5 }
    }
}

impl Default for FlawConfig {
    fn default() -> Self {
        Self {
            edge_threshold: 60.0,
            edge_gain: 4.0,
            texture_norm: 25.0,
            dark_spot_sigma: 1.5,
            dark_spot_gain: 20.0,
            stain_hue_range: (15.0, 45.0),
            stain_saturation_floor: 0.25,
            stain_value_cap: 0.85,
            stain_gain: 5.0,
        }
    }
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            sample_step: 2,
            max_edge: 512,
            enabled_metrics: vec![MetricKind::Yellowness, MetricKind::SurfaceFlaws],
            severity: SeverityThresholds::default(),
            weights: MetricWeights::default(),
            quality: QualityLimits::default(),
            region: RegionConfig::default(),
            yellowness: YellownessConfig::default(),
            flaws: FlawConfig::default(),
        }
    }
}

impl AnalyzerConfig {
    /// Configuration tuned for throughput: coarser sampling, same scoring.
    pub fn fast() -> Self {
        Self {
            sample_step: 4,
            ..Self::default()
        }
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<(), String> {
        if self.sample_step == 0 {
            return Err("Sample step must be greater than 0".to_string());
        }

        if self.max_edge < self.quality.min_edge {
            return Err("Max edge must not be smaller than the minimum image edge".to_string());
        }

        if self.severity.good_below <= 0.0
            || self.severity.good_below >= self.severity.moderate_below
            || self.severity.moderate_below >= 1.0
        {
            return Err("Severity thresholds must satisfy 0 < good < moderate < 1".to_string());
        }

        if self.weights.yellowness <= 0.0 || self.weights.surface_flaws <= 0.0 {
            return Err("Metric weights must be positive".to_string());
        }

        if self.quality.dark_floor >= self.quality.bright_ceiling {
            return Err("Dark floor must be below the bright ceiling".to_string());
        }

        if self.region.min_coverage < 0.0 || self.region.min_coverage > 1.0 {
            return Err("Region coverage must be between 0.0 and 1.0".to_string());
        }

        if self.yellowness.gain <= 0.0 {
            return Err("Yellowness gain must be positive".to_string());
        }

        Ok(())
    }

    /// Set the pixel sampling stride
    pub fn with_sample_step(mut self, sample_step: u32) -> Self {
        self.sample_step = sample_step.max(1);
        self
    }

    /// Set the severity bucket boundaries
    pub fn with_severity(mut self, severity: SeverityThresholds) -> Self {
        self.severity = severity;
        self
    }

    /// Set the overall score weights
    pub fn with_weights(mut self, weights: MetricWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Enable a specific metric
    pub fn enable_metric(mut self, kind: MetricKind) -> Self {
        if !self.enabled_metrics.contains(&kind) {
            self.enabled_metrics.push(kind);
        }
        self
    }

    /// Disable a specific metric
    pub fn disable_metric(mut self, kind: MetricKind) -> Self {
        self.enabled_metrics.retain(|k| *k != kind);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(AnalyzerConfig::default().validate().is_ok());
        assert!(AnalyzerConfig::fast().validate().is_ok());
    }

    #[test]
    fn test_zero_sample_step_rejected() {
        let mut config = AnalyzerConfig::default();
        config.sample_step = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_inverted_severity_thresholds_rejected() {
        let config = AnalyzerConfig::default().with_severity(SeverityThresholds {
            good_below: 0.7,
            moderate_below: 0.4,
        });
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_non_positive_weights_rejected() {
        let config = AnalyzerConfig::default().with_weights(MetricWeights {
            yellowness: 0.0,
            surface_flaws: 1.0,
        });
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_enable_disable_metric() {
        let config = AnalyzerConfig::default().disable_metric(MetricKind::Yellowness);
        assert_eq!(config.enabled_metrics, vec![MetricKind::SurfaceFlaws]);

        let config = config.enable_metric(MetricKind::Yellowness);
        assert!(config.enabled_metrics.contains(&MetricKind::Yellowness));
    }
}
