use serde::{Deserialize, Serialize};

use crate::classifier::config::MlpConfig;
use crate::error::{Error, Result};

/// Verbosity of the stderr log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

/// Everything the evaluation pipeline needs. The binary always runs with
/// `PipelineConfig::default()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Fraction of samples held out for evaluation.
    pub test_size: f64,
    /// Seed of the train/test shuffle.
    pub random_state: u64,
    pub model: MlpConfig,
    pub log_level: LogLevel,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            test_size: 0.2,
            random_state: 42,
            model: MlpConfig::default(),
            log_level: LogLevel::Warn,
        }
    }
}

impl PipelineConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.test_size > 0.0 && self.test_size < 1.0) {
            return Err(Error::InvalidConfig(format!(
                "test_size must be strictly between 0 and 1, got {}",
                self.test_size
            )));
        }
        self.model.validate()
    }
}
