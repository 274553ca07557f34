pub mod fixtures;
pub mod tracing;

pub use fixtures::{CsvFile, fixture_path};
pub use self::tracing::{CapturedEvent, EventCapture, capture_events};
