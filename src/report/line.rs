//! Read-only view of one time-key's statistics

use serde::{Deserialize, Serialize};

use crate::statistics::{CriticalValue, TimePointStats};

/// One row of the summary report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportLine {
    /// Time-key
    #[serde(rename = "day")]
    pub key: i64,
    pub count: u64,
    pub mean: f64,
    /// Population standard deviation
    pub sd: f64,
    pub min: f64,
    pub max: f64,
    pub sum: f64,
    /// Confidence interval half-width, `z * sd / sqrt(count)`
    pub ci: f64,
}

impl ReportLine {
    pub fn from_stats(stats: &TimePointStats, critical: CriticalValue) -> Self {
        Self {
            key: stats.key(),
            count: stats.count(),
            mean: stats.mean(),
            sd: stats.stddev(),
            min: stats.min(),
            max: stats.max(),
            sum: stats.sum(),
            ci: stats.confidence_interval(critical),
        }
    }
}
