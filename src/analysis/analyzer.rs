/// Heuristic analyzer orchestrator - decode, gate, mask, score, grade
use super::config::{AnalyzerConfig, MetricKind, MetricWeights, SeverityThresholds};
use super::context::AnalysisContext;
use super::decode::{validate_brightness, validate_dimensions};
use super::metrics::{
    MetricAnalyzer, SurfaceFlawAnalyzer, YellownessAnalyzer, MAINTENANCE_TIP,
};
use super::region::detect_tooth_region;
use super::report::{AnalysisReport, Grade, MetricReport, OverallAssessment, Severity};
use crate::error::AnalysisError;
use chrono::Utc;
use image::{imageops::FilterType, DynamicImage, RgbImage};
use indexmap::IndexMap;
use serde::Serialize;
use std::time::Instant;
use tracing::debug;
use uuid::Uuid;

/// Static description of the analyzer, served by the info endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyzerInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub metrics: Vec<String>,
    pub severity_thresholds: SeverityThresholds,
    pub weights: MetricWeights,
}

/// Scores a single still image. Stateless between calls; construction is the
/// explicit initialization step, so a built analyzer is a ready analyzer.
pub struct ToothAnalyzer {
    config: AnalyzerConfig,
    metrics: Vec<Box<dyn MetricAnalyzer>>,
}

impl ToothAnalyzer {
    pub fn new(config: AnalyzerConfig) -> Result<Self, AnalysisError> {
        config.validate().map_err(AnalysisError::InvalidConfig)?;

        let metrics = config
            .enabled_metrics
            .iter()
            .map(|kind| match kind {
                MetricKind::Yellowness => {
                    Box::new(YellownessAnalyzer::new(config.yellowness.clone()))
                        as Box<dyn MetricAnalyzer>
                }
                MetricKind::SurfaceFlaws => {
                    Box::new(SurfaceFlawAnalyzer::new(config.flaws.clone()))
                        as Box<dyn MetricAnalyzer>
                }
            })
            .collect();

        Ok(Self { config, metrics })
    }

    pub fn ready(&self) -> bool {
        !self.metrics.is_empty()
    }

    pub fn info(&self) -> AnalyzerInfo {
        AnalyzerInfo {
            name: "heuristic-pixel-statistics",
            version: env!("CARGO_PKG_VERSION"),
            metrics: self.metrics.iter().map(|m| m.name().to_string()).collect(),
            severity_thresholds: self.config.severity.clone(),
            weights: self.config.weights.clone(),
        }
    }

    pub fn analyze(&self, image: &DynamicImage) -> Result<AnalysisReport, AnalysisError> {
        if self.metrics.is_empty() {
            return Err(AnalysisError::AnalyzerUnavailable);
        }
        let started = Instant::now();

        let rgb = self.preprocess(image)?;
        let mask = detect_tooth_region(&rgb, &self.config.region, self.config.sample_step);
        let teeth_detected = mask.detected();
        debug!(
            "Tooth region coverage {:.3}, detected: {}",
            mask.coverage(),
            teeth_detected
        );
        let context = AnalysisContext::new(rgb, mask, self.config.sample_step);

        let mut metrics = IndexMap::new();
        let mut weighted_sum = 0.0f32;
        let mut weight_total = 0.0f32;
        for analyzer in &self.metrics {
            let score = analyzer.score(&context).clamp(0.0, 1.0);
            let severity = Severity::from_score(score, &self.config.severity);
            let recommendations = analyzer
                .recommendation(severity)
                .map(|advice| vec![advice.to_string()])
                .unwrap_or_default();

            let weight = self.config.weights.for_kind(analyzer.kind());
            weighted_sum += score * weight;
            weight_total += weight;

            metrics.insert(
                analyzer.name().to_string(),
                MetricReport {
                    score,
                    severity,
                    recommendations,
                },
            );
        }

        let overall_score = 100.0 * (1.0 - weighted_sum / weight_total);
        let grade = Grade::from_score(overall_score);

        let mut recommendations: Vec<String> = metrics
            .values()
            .flat_map(|report| report.recommendations.iter().cloned())
            .collect();
        if recommendations.is_empty() {
            recommendations.push(MAINTENANCE_TIP.to_string());
        }

        Ok(AnalysisReport {
            scan_id: Uuid::new_v4(),
            timestamp: Utc::now().to_rfc3339(),
            teeth_detected,
            metrics,
            overall: OverallAssessment {
                score: overall_score,
                grade,
            },
            recommendations,
            processing_time_ms: started.elapsed().as_millis() as u64,
        })
    }

    fn preprocess(&self, image: &DynamicImage) -> Result<RgbImage, AnalysisError> {
        let (width, height) = (image.width(), image.height());
        if width == 0 || height == 0 {
            return Err(AnalysisError::InvalidImage(
                "image has zero area".to_string(),
            ));
        }
        validate_dimensions(width, height, &self.config.quality)?;

        let rgb = if width.max(height) > self.config.max_edge {
            image
                .resize(self.config.max_edge, self.config.max_edge, FilterType::Triangle)
                .to_rgb8()
        } else {
            image.to_rgb8()
        };
        validate_brightness(&rgb, &self.config.quality, self.config.sample_step)?;

        Ok(rgb)
    }
}
