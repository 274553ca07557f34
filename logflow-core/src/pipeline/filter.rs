use crate::pipeline::{RecordRx, STAGE_CHANNEL_CAPACITY};
use tokio::sync::mpsc;

/// Forward only records with `status >= threshold`, in input order.
pub fn filter_status(mut input: RecordRx, threshold: u16) -> RecordRx {
    let (tx, rx) = mpsc::channel(STAGE_CHANNEL_CAPACITY);

    tokio::spawn(async move {
        while let Some(record) = input.recv().await {
            if record.status < threshold {
                continue;
            }
            if tx.send(record).await.is_err() {
                tracing::debug!("filter output closed");
                break;
            }
        }
    });

    rx
}
