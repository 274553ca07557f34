/// Capacity of the hand-off channels between single-record stages.
pub const STAGE_CHANNEL_CAPACITY: usize = 1;

/// Malformed lines kept in a [`SourceSummary`](super::SourceSummary); the rest
/// are only counted.
pub const MALFORMED_SAMPLE_LIMIT: usize = 10;

pub const DEFAULT_WORKERS: usize = 3;
pub const DEFAULT_TEE_BUFFER: usize = 100;
pub const DEFAULT_ERROR_THRESHOLD: u16 = 400;
pub const DEFAULT_TOP_IPS: usize = 5;

pub const LATENCY_BUCKETS_MS: &[u64] = &[1, 5, 10, 25, 50, 100, 250, 500, 1000];
