use crate::pipeline::{RecordRx, STAGE_CHANNEL_CAPACITY};
use crate::record::Record;
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};
use tokio_util::sync::CancellationToken;

/// Fan `input` out to `workers` tasks and merge what they forward into one
/// output.
///
/// Workers race for the shared input, so output order is not input order.
/// Records pass through unchanged. The output closes after every worker has
/// exited: input drained, cancellation observed, or output dropped.
///
/// A `workers` of 0 is treated as 1.
pub fn spawn_workers(input: RecordRx, token: CancellationToken, workers: usize) -> RecordRx {
    let workers = workers.max(1);
    let input = Arc::new(Mutex::new(input));
    let (tx, rx) = mpsc::channel(STAGE_CHANNEL_CAPACITY);

    for worker_id in 0..workers {
        tokio::spawn(worker_loop(
            worker_id,
            input.clone(),
            tx.clone(),
            token.clone(),
        ));
    }

    // Each worker holds a sender clone; the output closes when the last one exits.
    rx
}

async fn worker_loop(
    worker_id: usize,
    input: Arc<Mutex<RecordRx>>,
    output: mpsc::Sender<Record>,
    token: CancellationToken,
) {
    tracing::debug!(worker_id, "worker started");
    let mut forwarded: u64 = 0;

    loop {
        if token.is_cancelled() {
            tracing::debug!(worker_id, "worker cancelled");
            break;
        }

        let next = input.lock().await.recv().await;
        let Some(record) = next else {
            break;
        };

        if token.is_cancelled() {
            tracing::debug!(worker_id, "worker cancelled");
            break;
        }

        if output.send(record).await.is_err() {
            tracing::debug!(worker_id, "worker output closed");
            break;
        }
        forwarded += 1;
    }

    tracing::debug!(worker_id, forwarded, "worker stopped");
}
