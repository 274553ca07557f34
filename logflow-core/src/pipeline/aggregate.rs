use crate::pipeline::RecordRx;
use crate::stats::{Statistics, StatsAccumulator};

/// Drain `input` and fold every record into a [`Statistics`].
///
/// Returns only once the input channel has closed.
pub async fn aggregate(mut input: RecordRx) -> Statistics {
    let mut acc = StatsAccumulator::new();

    while let Some(record) = input.recv().await {
        acc.push(record);
    }

    acc.finish()
}
