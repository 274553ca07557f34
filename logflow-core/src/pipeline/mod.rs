//! Streaming access-log pipeline
//!
//! Records flow through a graph of Tokio tasks joined by bounded `mpsc`
//! channels. Each stage owns its receiver, spawns one task (or N, for the
//! worker pool) and hands back the receiver of its output. A stage ends when
//! its input closes, and its output closes when it ends, so shutdown ripples
//! downstream without extra signalling.
//!
//! The overall data processing architecture is:
//!
//! ```text
//! file
//!  └─ source (header skip, parse_line, malformed lines logged + skipped)
//!      └─ workers (N tasks racing on one input, merged into one output)
//!          └─ tee (two bounded buffers, same order on both)
//!              ├─ aggregate                    -> statistics
//!              └─ filter_status -> aggregate   -> errors
//! ```
//!
//! Cancellation is cooperative: the source and every worker check the shared
//! [`CancellationToken`](tokio_util::sync::CancellationToken) before emitting.
//! A send that is already waiting on a full channel is not interrupted; it
//! finishes once the consumer makes room, and the producer stops at its next
//! check. Downstream stages never look at the token.
//!
//! Only single-consumer stages keep order (source → tee → filter). The worker
//! pool does not, which is fine for [`Statistics`](crate::stats::Statistics)
//! since every field is a commutative fold.

mod aggregate;
mod constants;
mod filter;
mod run;
mod source;
mod tee;
mod workers;
#[cfg(test)]
mod tests;

pub use aggregate::aggregate;
pub use constants::*;
pub use filter::filter_status;
pub use run::{PipelineReport, run_pipeline, run_source};
pub use source::{Source, SourceSummary, StopReason, open_source, spawn_reader};
pub use tee::tee;
pub use workers::spawn_workers;

use crate::record::Record;
use tokio::sync::mpsc;

/// Receiving end of a stage's output.
pub type RecordRx = mpsc::Receiver<Record>;
