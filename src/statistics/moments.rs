//! Per-time-point running statistics (count, mean, variance, sum, min, max)
//!
//! Computes streaming statistics using Welford's numerically stable online algorithm.
//! Supports merging for combining summaries of separately processed inputs.

use crate::statistics::CriticalValue;
use crate::traits::{Accumulator, ErrorBounds, MergeError};

/// Running statistics for one time-key using Welford's algorithm
///
/// A record only exists once its key has been observed, so `count >= 1`
/// always holds. Each [`fold`](TimePointStats::fold) is O(1) and never
/// revisits earlier observations.
///
/// # Example
///
/// ```
/// use colsummary::statistics::TimePointStats;
///
/// let mut stats = TimePointStats::new(10, 2.0);
///
/// for value in [4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0] {
///     stats.fold(value);
/// }
///
/// assert_eq!(stats.key(), 10);
/// assert_eq!(stats.count(), 8);
/// assert!((stats.mean() - 5.0).abs() < 0.001);
/// assert!((stats.variance() - 4.0).abs() < 0.001);
/// assert!((stats.stddev() - 2.0).abs() < 0.001);
/// assert_eq!(stats.min(), 2.0);
/// assert_eq!(stats.max(), 9.0);
/// assert_eq!(stats.sum(), 40.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct TimePointStats {
    /// Time-key this record summarizes
    key: i64,
    /// Number of values seen
    count: u64,
    /// Running mean
    mean: f64,
    /// Sum of squared differences from mean (M2 in Welford's algorithm)
    m2: f64,
    /// Running total, kept separately from `mean * count` for exact reporting
    sum: f64,
    /// Minimum value
    min: f64,
    /// Maximum value
    max: f64,
}

impl TimePointStats {
    /// Create a record from the first observation of `key`
    pub fn new(key: i64, value: f64) -> Self {
        Self {
            key,
            count: 1,
            mean: value,
            m2: 0.0,
            sum: value,
            min: value,
            max: value,
        }
    }

    /// Fold a value into the statistics
    ///
    /// Uses Welford's online algorithm for numerical stability.
    /// NaN values are ignored to prevent poisoning the statistics.
    pub fn fold(&mut self, value: f64) {
        if value.is_nan() {
            return;
        }

        // Welford's algorithm; the second delta uses the updated mean.
        let delta = value - self.mean;
        self.count += 1;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (value - self.mean);
        self.sum += value;

        if value < self.min {
            self.min = value;
        }
        if value > self.max {
            self.max = value;
        }
    }

    /// Time-key of this record
    pub fn key(&self) -> i64 {
        self.key
    }

    /// Number of values folded in
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Running mean
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Sum of squared deviations from the mean
    pub fn m2(&self) -> f64 {
        self.m2
    }

    /// Get the population variance (`m2 / count`)
    pub fn variance(&self) -> f64 {
        self.m2 / self.count as f64
    }

    /// Get the sample variance
    ///
    /// Unbiased estimator with Bessel's correction; zero for a single value.
    pub fn sample_variance(&self) -> f64 {
        if self.count < 2 {
            0.0
        } else {
            self.m2 / (self.count - 1) as f64
        }
    }

    /// Get the population standard deviation
    pub fn stddev(&self) -> f64 {
        self.variance().sqrt()
    }

    /// Standard deviation of the mean, `stddev / sqrt(count)`
    pub fn standard_error(&self) -> f64 {
        self.stddev() / (self.count as f64).sqrt()
    }

    /// Half-width of the confidence interval around the mean
    pub fn confidence_interval(&self, critical: CriticalValue) -> f64 {
        critical.value() * self.standard_error()
    }

    /// Interval `mean ± confidence_interval`
    pub fn bounds(&self, critical: CriticalValue) -> ErrorBounds {
        ErrorBounds::symmetric(self.mean, self.confidence_interval(critical))
    }

    /// Get the minimum value
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Get the maximum value
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Get the sum of all values
    pub fn sum(&self) -> f64 {
        self.sum
    }

    /// Merge with another record of the same key using the parallel algorithm
    ///
    /// Uses Chan et al.'s parallel algorithm for combining statistics.
    pub fn merge_stats(&mut self, other: &Self) -> Result<(), MergeError> {
        if self.key != other.key {
            return Err(MergeError::KeyMismatch {
                expected: self.key,
                found: other.key,
            });
        }

        let combined_count = self.count + other.count;
        let delta = other.mean - self.mean;

        let combined_mean = self.mean + delta * (other.count as f64 / combined_count as f64);
        let combined_m2 = self.m2
            + other.m2
            + delta * delta * (self.count as f64 * other.count as f64 / combined_count as f64);

        self.count = combined_count;
        self.mean = combined_mean;
        self.m2 = combined_m2;
        self.sum += other.sum;
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
        Ok(())
    }
}

impl Accumulator for TimePointStats {
    fn fold(&mut self, value: f64) {
        TimePointStats::fold(self, value);
    }

    fn merge(&mut self, other: &Self) -> Result<(), MergeError> {
        self.merge_stats(other)
    }

    fn count(&self) -> u64 {
        self.count
    }
}
