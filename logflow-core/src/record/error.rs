use std::num::ParseIntError;
use thiserror::Error;

/// A data line that could not be turned into a [`Record`](super::Record).
///
/// Malformed lines are skipped; the reader logs them and keeps going.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MalformedRecord {
    #[error("line {line}: expected {expected} fields, found {found}")]
    FieldCount {
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: invalid status code '{value}': {source}")]
    StatusCode {
        line: u64,
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("line {line}: invalid response time '{value}': {source}")]
    ResponseTime {
        line: u64,
        value: String,
        #[source]
        source: ParseIntError,
    },
}

impl MalformedRecord {
    /// 1-based line number in the input file (the header is line 1).
    pub fn line(&self) -> u64 {
        match self {
            Self::FieldCount { line, .. }
            | Self::StatusCode { line, .. }
            | Self::ResponseTime { line, .. } => *line,
        }
    }
}
