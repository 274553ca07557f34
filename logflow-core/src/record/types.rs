/// Status at and above which a record counts as an error.
///
/// Fixed, independent of the filter threshold.
pub const ERROR_STATUS: u16 = 400;

/// One access-log line after parsing.
///
/// Records are created once by [`parse_line`](super::parse_line) and never
/// mutated; stages move or clone them along.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Record {
    /// Free-form, e.g. "2024-01-15 10:30:00"
    pub timestamp: String,
    pub ip: String,
    pub method: String,
    pub url: String,
    pub status: u16,
    pub response_time_ms: u64,
}

impl Record {
    pub fn is_error(&self) -> bool {
        self.status >= ERROR_STATUS
    }
}
