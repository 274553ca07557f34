use crate::cli::analyze::render_report;
use crate::config::{ConfigOverrides, load_config};
use crate::pipeline::run_pipeline;
use anyhow::{Context, Result};
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use tokio::runtime::Builder;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone)]
pub struct AnalyzeOptions {
    pub input: PathBuf,
    pub config: Option<PathBuf>,
    pub overrides: ConfigOverrides,
}

/// Resolve config, run the pipeline to completion and print the report.
///
/// Ctrl-C cancels the run; whatever was aggregated so far is still printed.
pub fn run_analyze(options: AnalyzeOptions) -> Result<()> {
    let config = load_config(options.config.as_deref(), &options.overrides)?;

    let token = CancellationToken::new();
    ctrlc::set_handler({
        let token = token.clone();
        move || {
            tracing::info!("shutdown requested, cancelling pipeline");
            token.cancel();
        }
    })
    .context("failed to install Ctrl-C handler")?;

    let runtime = Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to build Tokio runtime")?;

    let report = runtime.block_on(run_pipeline(&options.input, &config.pipeline, token))?;

    let stdout = io::stdout();
    let color = stdout.is_terminal();
    let mut out = stdout.lock();
    out.write_all(render_report(&report, config.report.top, color).as_bytes())?;
    out.flush()?;

    Ok(())
}
