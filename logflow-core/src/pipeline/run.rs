use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::pipeline::{
    Source, SourceSummary, aggregate, filter_status, open_source, spawn_workers, tee,
};
use crate::stats::Statistics;
use std::path::Path;
use tokio_util::sync::CancellationToken;

/// Everything a finished run produced.
#[derive(Debug, Clone)]
pub struct PipelineReport {
    /// Every record that reached the aggregators.
    pub statistics: Statistics,
    /// Only records at or above `error_threshold`.
    pub errors: Statistics,
    pub error_threshold: u16,
    pub source: SourceSummary,
}

/// Analyze the CSV access log at `path`.
///
/// Fails only if the file cannot be opened, or if a stage task panics.
/// A cancelled run still returns a report covering the records that made it
/// through; `source.stop` tells the two apart.
pub async fn run_pipeline(
    path: impl AsRef<Path>,
    config: &PipelineConfig,
    token: CancellationToken,
) -> Result<PipelineReport, PipelineError> {
    let source = open_source(path, token.clone()).await?;
    run_source(source, config, token).await
}

/// Run the stage graph over an already started [`Source`].
pub async fn run_source(
    source: Source,
    config: &PipelineConfig,
    token: CancellationToken,
) -> Result<PipelineReport, PipelineError> {
    let Source { records, summary } = source;

    let processed = spawn_workers(records, token, config.workers);
    let (unfiltered, filtered) = tee(processed, config.buffer);

    let all = tokio::spawn(aggregate(unfiltered));
    let errors = tokio::spawn(aggregate(filter_status(filtered, config.error_threshold)));

    // Both folds must finish before either result is read.
    let (all, errors) = tokio::join!(all, errors);
    let statistics = all.map_err(|e| PipelineError::stage("aggregate", e))?;
    let errors = errors.map_err(|e| PipelineError::stage("aggregate-errors", e))?;

    let source = summary
        .await
        .map_err(|e| PipelineError::stage("source", e))?;

    tracing::info!(
        total = statistics.total_requests,
        errors = errors.error_count,
        malformed = source.malformed_count,
        stop = ?source.stop,
        "pipeline finished"
    );

    Ok(PipelineReport {
        statistics,
        errors,
        error_threshold: config.error_threshold,
        source,
    })
}
