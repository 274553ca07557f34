/// Fixed-bucket histogram; the last slot counts values above every bucket.
#[derive(Debug, Clone)]
pub struct Histogram {
    buckets: &'static [u64],
    counts: Vec<u64>,
}

impl Histogram {
    pub fn new(buckets: &'static [u64]) -> Self {
        Self {
            buckets,
            counts: vec![0; buckets.len() + 1], // +∞ bucket
        }
    }

    pub fn record(&mut self, value: u64) {
        let slot = self
            .buckets
            .iter()
            .position(|upper| value <= *upper)
            .unwrap_or(self.buckets.len());
        self.counts[slot] += 1;
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    pub fn snapshot(&self) -> Vec<(String, u64)> {
        let mut out = Vec::with_capacity(self.counts.len());

        for (i, c) in self.counts.iter().enumerate() {
            let label = if i < self.buckets.len() {
                let lower = if i == 0 { 0 } else { self.buckets[i - 1] + 1 };
                format!("{lower}–{}ms", self.buckets[i])
            } else {
                match self.buckets.last() {
                    Some(last) => format!(">{last}ms"),
                    None => "all".to_string(),
                }
            };

            out.push((label, *c));
        }

        out
    }

    /// Upper-bound estimate of the `pct` quantile (0.0..=1.0), in ms.
    ///
    /// Lands on the upper edge of the bucket holding the quantile. When that is
    /// the overflow slot the answer is one past the largest edge.
    pub fn percentile(&self, pct: f64) -> u64 {
        let total = self.total();
        if total == 0 {
            return 0;
        }

        let rank = (total as f64 * pct).ceil().max(1.0) as u64;
        let mut seen = 0;
        let slot = self
            .counts
            .iter()
            .position(|count| {
                seen += count;
                seen >= rank
            })
            .unwrap_or(self.buckets.len());

        match self.buckets.get(slot) {
            Some(upper) => *upper,
            None => self.buckets.last().map_or(0, |last| last + 1),
        }
    }
}
