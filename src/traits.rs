//! Core traits for streaming accumulators
//!
//! Every per-key record implements [`Accumulator`]: values are folded in one at
//! a time and two accumulators over disjoint parts of a stream can be merged.

use core::fmt::Debug;

/// Error during accumulator merge operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeError {
    /// Records describe different time-keys
    KeyMismatch { expected: i64, found: i64 },
}

impl core::fmt::Display for MergeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            MergeError::KeyMismatch { expected, found } => {
                write!(f, "key mismatch: expected {}, found {}", expected, found)
            }
        }
    }
}

impl std::error::Error for MergeError {}

/// Two-sided interval around a point estimate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ErrorBounds {
    /// Lower bound of the estimate
    pub lower: f64,
    /// Point estimate
    pub estimate: f64,
    /// Upper bound of the estimate
    pub upper: f64,
}

impl ErrorBounds {
    /// Create new error bounds
    pub fn new(lower: f64, estimate: f64, upper: f64) -> Self {
        Self {
            lower,
            estimate,
            upper,
        }
    }

    /// Symmetric bounds `estimate ± half_width`
    pub fn symmetric(estimate: f64, half_width: f64) -> Self {
        Self::new(estimate - half_width, estimate, estimate + half_width)
    }

    /// Check if a value falls within bounds
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }

    /// Width of the interval
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    /// Half of the width, i.e. the reported confidence interval
    pub fn half_width(&self) -> f64 {
        self.width() / 2.0
    }
}

/// Core trait for single-pass accumulators
pub trait Accumulator: Clone + Debug {
    /// Fold one observation into the accumulator
    fn fold(&mut self, value: f64);

    /// Merge another accumulator into this one
    ///
    /// Returns an error if the accumulators are incompatible
    fn merge(&mut self, other: &Self) -> Result<(), MergeError>;

    /// Number of values folded in
    fn count(&self) -> u64;
}
