use crate::config::ConfigError;
use crate::pipeline::{DEFAULT_ERROR_THRESHOLD, DEFAULT_TEE_BUFFER, DEFAULT_TOP_IPS, DEFAULT_WORKERS};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Top-level settings, as read from a TOML file:
///
/// ```toml
/// [pipeline]
/// workers = 3
/// buffer = 100
/// error_threshold = 400
///
/// [report]
/// top = 5
/// ```
///
/// Every key is optional.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct LogflowConfig {
    pub pipeline: PipelineConfig,
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Concurrent pass-through workers.
    pub workers: usize,
    /// Capacity of each tee branch.
    pub buffer: usize,
    /// Minimum status forwarded to the error branch.
    pub error_threshold: u16,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            buffer: DEFAULT_TEE_BUFFER,
            error_threshold: DEFAULT_ERROR_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    /// How many client IPs to list.
    pub top: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top: DEFAULT_TOP_IPS,
        }
    }
}

/// Values given on the command line; they win over the file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub workers: Option<usize>,
    pub buffer: Option<usize>,
    pub error_threshold: Option<u16>,
    pub top: Option<usize>,
}

impl LogflowConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents =
            fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        toml::from_str(&contents).map_err(|e| ConfigError::parse(path, e))
    }

    pub fn apply(&mut self, overrides: &ConfigOverrides) {
        if let Some(workers) = overrides.workers {
            self.pipeline.workers = workers;
        }
        if let Some(buffer) = overrides.buffer {
            self.pipeline.buffer = buffer;
        }
        if let Some(threshold) = overrides.error_threshold {
            self.pipeline.error_threshold = threshold;
        }
        if let Some(top) = overrides.top {
            self.report.top = top;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pipeline.workers == 0 {
            return Err(ConfigError::InvalidWorkers);
        }
        if self.pipeline.buffer == 0 {
            return Err(ConfigError::InvalidBuffer);
        }
        if !(100..=599).contains(&self.pipeline.error_threshold) {
            return Err(ConfigError::InvalidErrorThreshold {
                value: self.pipeline.error_threshold,
            });
        }
        Ok(())
    }
}
