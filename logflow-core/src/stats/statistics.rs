use crate::pipeline::LATENCY_BUCKETS_MS;
use crate::record::Record;
use crate::stats::Histogram;
use std::collections::HashMap;

/// Terminal summary of one record sequence.
///
/// Built by [`StatsAccumulator::finish`] once the input is drained and only
/// read afterwards. A cancelled run still yields a `Statistics` value; it then
/// describes the records that made it through, not the whole file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Statistics {
    pub total_requests: u64,
    /// Records with status >= 400, whatever filter ran upstream.
    pub error_count: u64,
    pub requests_by_ip: HashMap<String, u64>,
    /// Mean response time in milliseconds; 0 when there were no requests.
    pub average_response_time: f64,
    pub status_classes: StatusClasses,
    pub latency: LatencySummary,
}

impl Statistics {
    /// Up to `n` busiest client IPs, by descending count. Equal counts are
    /// ordered by IP so the output is stable across runs.
    pub fn top_ips(&self, n: usize) -> Vec<(&str, u64)> {
        let mut ips: Vec<(&str, u64)> = self
            .requests_by_ip
            .iter()
            .map(|(ip, count)| (ip.as_str(), *count))
            .collect();

        ips.sort_unstable_by(|(a_ip, a), (b_ip, b)| b.cmp(a).then_with(|| a_ip.cmp(b_ip)));
        ips.truncate(n);
        ips
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusClasses {
    pub informational: u64,
    pub success: u64,
    pub redirection: u64,
    pub client_error: u64,
    pub server_error: u64,
    pub other: u64,
}

impl StatusClasses {
    fn record(&mut self, status: u16) {
        match status {
            100..=199 => self.informational += 1,
            200..=299 => self.success += 1,
            300..=399 => self.redirection += 1,
            400..=499 => self.client_error += 1,
            500..=599 => self.server_error += 1,
            _ => self.other += 1,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LatencySummary {
    /// `(label, count)` per histogram bucket.
    pub buckets: Vec<(String, u64)>,
    pub p95_ms: u64,
    pub p99_ms: u64,
}

/// Running fold behind [`Statistics`]. Owned by exactly one aggregator.
pub struct StatsAccumulator {
    total_requests: u64,
    error_count: u64,
    requests_by_ip: HashMap<String, u64>,
    total_response_time_ms: u128,
    status_classes: StatusClasses,
    latency: Histogram,
}

impl Default for StatsAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl StatsAccumulator {
    pub fn new() -> Self {
        Self {
            total_requests: 0,
            error_count: 0,
            requests_by_ip: HashMap::new(),
            total_response_time_ms: 0,
            status_classes: StatusClasses::default(),
            latency: Histogram::new(LATENCY_BUCKETS_MS),
        }
    }

    pub fn push(&mut self, record: Record) {
        self.total_requests += 1;
        if record.is_error() {
            self.error_count += 1;
        }

        self.status_classes.record(record.status);
        self.latency.record(record.response_time_ms);
        self.total_response_time_ms += u128::from(record.response_time_ms);

        *self.requests_by_ip.entry(record.ip).or_insert(0) += 1;
    }

    pub fn finish(self) -> Statistics {
        let average_response_time = if self.total_requests > 0 {
            self.total_response_time_ms as f64 / self.total_requests as f64
        } else {
            0.0
        };

        Statistics {
            total_requests: self.total_requests,
            error_count: self.error_count,
            requests_by_ip: self.requests_by_ip,
            average_response_time,
            status_classes: self.status_classes,
            latency: LatencySummary {
                buckets: self.latency.snapshot(),
                p95_ms: self.latency.percentile(0.95),
                p99_ms: self.latency.percentile(0.99),
            },
        }
    }
}
