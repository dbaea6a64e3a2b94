use super::config::SeverityThresholds;
use indexmap::IndexMap;
use serde::Serialize;
use uuid::Uuid;

/// Qualitative bucket derived from a metric score by fixed thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Good,
    Moderate,
    Severe,
}

impl Severity {
    /// A score sitting exactly on a boundary classifies into the higher
    /// (worse) bucket.
    pub fn from_score(score: f32, thresholds: &SeverityThresholds) -> Self {
        if score < thresholds.good_below {
            Severity::Good
        } else if score < thresholds.moderate_below {
            Severity::Moderate
        } else {
            Severity::Severe
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Severity::Good => "good",
            Severity::Moderate => "moderate",
            Severity::Severe => "severe",
        }
    }

    pub fn is_good(&self) -> bool {
        matches!(self, Severity::Good)
    }
}

/// Letter summary of the overall 0-100 score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Grade {
    #[serde(rename = "A+")]
    APlus,
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    pub fn from_score(score: f32) -> Self {
        if score >= 95.0 {
            Grade::APlus
        } else if score >= 85.0 {
            Grade::A
        } else if score >= 75.0 {
            Grade::B
        } else if score >= 65.0 {
            Grade::C
        } else if score >= 60.0 {
            Grade::D
        } else {
            Grade::F
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        }
    }
}

/// One scored metric with its bucket and the advice it triggered.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricReport {
    pub score: f32,
    pub severity: Severity,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverallAssessment {
    pub score: f32,
    pub grade: Grade,
}

/// Immutable result of one analysis call. Never persisted; the scan id and
/// timestamp exist only so the caller can correlate logs with responses.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub scan_id: Uuid,
    pub timestamp: String,
    pub teeth_detected: bool,
    pub metrics: IndexMap<String, MetricReport>,
    pub overall: OverallAssessment,
    pub recommendations: Vec<String>,
    pub processing_time_ms: u64,
}
