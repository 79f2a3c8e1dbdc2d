//! Per-time-key aggregation across simulation runs
//!
//! [`Aggregator`] folds `(time-key, value)` pairs into one running
//! statistics record per key and produces reports ordered by key.

mod aggregator;

pub use aggregator::Aggregator;
