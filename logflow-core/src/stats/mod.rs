//! Statistics folded from a record sequence.
//!
//! Every field is a commutative fold (counts, sums, histogram buckets), so the
//! result does not depend on the order records arrive in. The worker pool
//! reorders records freely and that is fine here; an order-sensitive stage
//! added later would need its own guarantees.

mod histogram;
mod statistics;

pub use histogram::Histogram;
pub use statistics::*;
