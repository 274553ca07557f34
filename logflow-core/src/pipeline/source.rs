use crate::error::PipelineError;
use crate::pipeline::{MALFORMED_SAMPLE_LIMIT, RecordRx, STAGE_CHANNEL_CAPACITY};
use crate::record::{MalformedRecord, Record, parse_line};
use std::io;
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// A running reader: its records, plus the summary it returns when done.
pub struct Source {
    pub records: RecordRx,
    pub summary: JoinHandle<SourceSummary>,
}

/// Why the reader stopped producing records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StopReason {
    /// Every line was read.
    #[default]
    Exhausted,
    /// The input had no header line.
    MissingHeader,
    Cancelled,
    /// Nothing downstream is listening anymore.
    Closed,
    /// The input could not be read past some point (I/O error, invalid UTF-8).
    ReadFailed,
}

/// What the reader saw, returned when its loop ends.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceSummary {
    /// Lines consumed, header included.
    pub lines_read: u64,
    pub records_emitted: u64,
    /// Lines skipped because they did not parse.
    pub malformed_count: u64,
    /// The first few malformed lines, in file order. Every one is logged.
    pub malformed_samples: Vec<MalformedRecord>,
    pub stop: StopReason,
}

impl SourceSummary {
    fn cancel(&mut self) {
        tracing::info!(lines_read = self.lines_read, "source cancelled");
        self.stop = StopReason::Cancelled;
    }
}

/// Open `path` and start streaming its records.
///
/// The file is opened and stat'd here, so an unreadable path fails before any
/// record exists. Reading happens on a spawned task that owns the file and
/// drops it on every exit path.
pub async fn open_source(
    path: impl AsRef<Path>,
    token: CancellationToken,
) -> Result<Source, PipelineError> {
    let path = path.as_ref();

    let file = File::open(path)
        .await
        .map_err(|e| PipelineError::open(path, e))?;
    let metadata = file
        .metadata()
        .await
        .map_err(|e| PipelineError::open(path, e))?;

    if metadata.is_dir() {
        return Err(PipelineError::open(
            path,
            io::Error::new(io::ErrorKind::InvalidInput, "path is a directory"),
        ));
    }

    tracing::info!(
        file = %path.file_name().unwrap_or(path.as_os_str()).to_string_lossy(),
        bytes = metadata.len(),
        "reading access log"
    );

    Ok(spawn_reader(BufReader::new(file), token))
}

/// Start streaming records from any buffered reader.
///
/// The first line is treated as the header and discarded.
pub fn spawn_reader<R>(reader: R, token: CancellationToken) -> Source
where
    R: AsyncBufRead + Unpin + Send + 'static,
{
    let (tx, rx) = mpsc::channel(STAGE_CHANNEL_CAPACITY);
    let summary = tokio::spawn(read_loop(reader, tx, token));

    Source {
        records: rx,
        summary,
    }
}

async fn read_loop<R>(
    reader: R,
    tx: mpsc::Sender<Record>,
    token: CancellationToken,
) -> SourceSummary
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut summary = SourceSummary::default();

    match lines.next_line().await {
        Ok(Some(_header)) => summary.lines_read += 1,
        Ok(None) => {
            tracing::warn!("input is empty, no header line");
            summary.stop = StopReason::MissingHeader;
            return summary;
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to read header line");
            summary.stop = StopReason::ReadFailed;
            return summary;
        }
    }

    loop {
        if token.is_cancelled() {
            summary.cancel();
            break;
        }

        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    line = summary.lines_read + 1,
                    "failed to read input"
                );
                summary.stop = StopReason::ReadFailed;
                break;
            }
        };
        summary.lines_read += 1;

        if line.trim().is_empty() {
            continue;
        }

        match parse_line(&line, summary.lines_read) {
            Ok(record) => {
                if tx.send(record).await.is_err() {
                    // Workers drop their receiver once cancelled.
                    if token.is_cancelled() {
                        summary.cancel();
                    } else {
                        tracing::debug!("source output closed");
                        summary.stop = StopReason::Closed;
                    }
                    break;
                }
                summary.records_emitted += 1;
            }
            Err(err) => {
                tracing::warn!(line = err.line(), error = %err, "skipping malformed record");
                summary.malformed_count += 1;
                if summary.malformed_samples.len() < MALFORMED_SAMPLE_LIMIT {
                    summary.malformed_samples.push(err);
                }
            }
        }
    }

    tracing::debug!(
        lines_read = summary.lines_read,
        records = summary.records_emitted,
        malformed = summary.malformed_count,
        stop = ?summary.stop,
        "source finished"
    );

    summary
}
