//! Statistical summaries for streaming data
//!
//! This module provides the per-time-point accumulator computed in a single
//! pass with constant memory, and the critical values used to turn its
//! standard error into a confidence interval.
//!
//! # Example
//!
//! ```
//! use colsummary::statistics::{CriticalValue, TimePointStats};
//!
//! let mut stats = TimePointStats::new(0, 1.0);
//!
//! for value in [2.0, 3.0, 4.0, 5.0] {
//!     stats.fold(value);
//! }
//!
//! println!("Mean: {}", stats.mean());
//! println!("Stddev: {}", stats.stddev());
//! println!("95% CI: {}", stats.confidence_interval(CriticalValue::for_runs(5).unwrap()));
//! ```

mod critical;
mod moments;

pub use critical::{student_t_95, CriticalValue, DEFAULT_CRITICAL_VALUE};
pub use moments::TimePointStats;
