use crate::analysis::AnalyzerConfig;
use crate::error::AppError;
use serde::Deserialize;

/// Process-level configuration. Defaults live here; any field can be
/// overridden through `DENTASCAN_`-prefixed environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Configuration {
    pub host: String,
    pub port: u16,
    pub max_body_bytes: usize,
    pub request_timeout_secs: u64,
    pub max_concurrent_scans: usize,
    pub sample_step: u32,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            max_body_bytes: 16 * 1024 * 1024, // same cap the browser client assumes
            request_timeout_secs: 30,
            max_concurrent_scans: 8,
            sample_step: 2,
        }
    }
}

impl Configuration {
    pub fn load() -> Result<Self, AppError> {
        let defaults = Configuration::default();
        let cfg = config::Config::builder()
            .set_default("host", defaults.host)?
            .set_default("port", defaults.port as i64)?
            .set_default("max_body_bytes", defaults.max_body_bytes as i64)?
            .set_default("request_timeout_secs", defaults.request_timeout_secs as i64)?
            .set_default("max_concurrent_scans", defaults.max_concurrent_scans as i64)?
            .set_default("sample_step", defaults.sample_step as i64)?
            .add_source(config::Environment::with_prefix("DENTASCAN"))
            .build()?;
        Ok(cfg.try_deserialize()?)
    }

    pub fn analyzer_config(&self) -> AnalyzerConfig {
        AnalyzerConfig::default().with_sample_step(self.sample_step)
    }
}
