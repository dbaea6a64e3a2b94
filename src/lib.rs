pub mod analysis;
pub mod config;
pub mod error;
pub mod server;

pub use error::{AnalysisError, AppError, ServerError};

pub use analysis::{AnalysisReport, AnalyzerConfig, ToothAnalyzer};
pub use config::Configuration;
