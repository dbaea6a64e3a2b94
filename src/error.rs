use thiserror::Error;

// Main Application Error Type

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Analysis Error: {0}")]
    Analysis(#[from] AnalysisError),
    #[error("Server Error: {0}")]
    Server(#[from] ServerError),
    #[error("Configuration Error: {0}")]
    Config(#[from] config::ConfigError),
}

// Analyzer Error Type
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Invalid image: {0}")]
    InvalidImage(String),
    #[error("The analyzer is not initialized.")]
    AnalyzerUnavailable,
    #[error("Invalid analyzer configuration: {0}")]
    InvalidConfig(String),
}

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Failed to bind to {1}: {0}")]
    Bind(std::io::Error, String),
    #[error("Server terminated unexpectedly: {0}")]
    Serve(std::io::Error),
}
