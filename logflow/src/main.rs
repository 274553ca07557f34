use clap::{CommandFactory, Parser, ValueEnum};
use logflow_core::cli::analyze::{AnalyzeOptions, run_analyze};
use logflow_core::config::ConfigOverrides;
use logflow_core::logging::{LogFormat, default_log_format, init_logging};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "logflow",
    version,
    about = "logflow: streaming access-log statistics"
)]
struct Cli {
    /// CSV access log: timestamp,ip,method,url,status_code,response_time_ms
    input: Option<PathBuf>,

    /// Optional TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Concurrent pass-through workers
    #[arg(long)]
    workers: Option<usize>,

    /// Buffer size of each tee branch
    #[arg(long)]
    buffer: Option<usize>,

    /// Minimum status code counted on the error branch
    #[arg(long)]
    error_threshold: Option<u16>,

    /// Number of client IPs to list
    #[arg(long)]
    top: Option<usize>,

    /// Diagnostic log format on stderr (defaults to pretty on a terminal)
    #[arg(long, value_enum)]
    log_format: Option<LogFormatArg>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum LogFormatArg {
    Pretty,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let Some(input) = cli.input else {
        // No input is not an error: show usage and leave.
        let _ = Cli::command().print_help();
        println!();
        return;
    };

    init_logging(cli.log_format.map_or_else(default_log_format, LogFormat::from));

    let options = AnalyzeOptions {
        input,
        config: cli.config,
        overrides: ConfigOverrides {
            workers: cli.workers,
            buffer: cli.buffer,
            error_threshold: cli.error_threshold,
            top: cli.top,
        },
    };

    if let Err(e) = run_analyze(options) {
        tracing::error!("{e:#}");
        std::process::exit(1);
    }
}
