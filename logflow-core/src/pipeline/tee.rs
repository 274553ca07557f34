use crate::pipeline::RecordRx;
use tokio::sync::mpsc;

/// Duplicate `input` onto two outputs, each a bounded buffer of `capacity`.
///
/// One loop forwards every record to the left output and then the right one,
/// so both see the same order. When either buffer is full the loop waits,
/// which also holds back the other branch: the slower consumer sets the pace
/// for both. Both outputs close together once the input is exhausted.
///
/// A branch whose receiver was dropped is skipped from then on; the loop
/// stops early only when both are gone.
pub fn tee(mut input: RecordRx, capacity: usize) -> (RecordRx, RecordRx) {
    let capacity = capacity.max(1);
    let (left_tx, left_rx) = mpsc::channel(capacity);
    let (right_tx, right_rx) = mpsc::channel(capacity);

    tokio::spawn(async move {
        let mut left_open = true;
        let mut right_open = true;

        while let Some(record) = input.recv().await {
            if left_open && left_tx.send(record.clone()).await.is_err() {
                tracing::debug!("tee: left branch closed");
                left_open = false;
            }
            if right_open && right_tx.send(record).await.is_err() {
                tracing::debug!("tee: right branch closed");
                right_open = false;
            }
            if !left_open && !right_open {
                break;
            }
        }
    });

    (left_rx, right_rx)
}
