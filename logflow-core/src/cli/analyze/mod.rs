//! `logflow <FILE>`: run the pipeline over one access log and print the
//! summary.

mod render;
mod run;

pub use render::render_report;
pub use run::{AnalyzeOptions, run_analyze};
