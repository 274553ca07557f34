use crate::config::{ConfigError, ConfigOverrides, LogflowConfig};
use std::path::Path;

/// Defaults, then the optional TOML file, then command-line overrides.
/// The result is validated before it is returned.
pub fn load_config(
    path: Option<&Path>,
    overrides: &ConfigOverrides,
) -> Result<LogflowConfig, ConfigError> {
    let mut config = match path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading config file");
            LogflowConfig::from_file(path)?
        }
        None => LogflowConfig::default(),
    };

    config.apply(overrides);
    config.validate()?;

    tracing::debug!(
        workers = config.pipeline.workers,
        buffer = config.pipeline.buffer,
        error_threshold = config.pipeline.error_threshold,
        top = config.report.top,
        "configuration resolved"
    );

    Ok(config)
}
