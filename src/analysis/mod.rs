pub mod analyzer;
pub mod config;
pub mod context;
pub mod decode;
pub mod metrics;
pub mod region;
pub mod report;

pub use analyzer::{AnalyzerInfo, ToothAnalyzer};
pub use config::{AnalyzerConfig, MetricKind};
pub use decode::decode_image;
pub use report::{AnalysisReport, Grade, MetricReport, OverallAssessment, Severity};
