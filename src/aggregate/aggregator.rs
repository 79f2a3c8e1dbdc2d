//! Ordered per-time-key accumulation

use std::collections::btree_map::{BTreeMap, Entry};

use crate::parse::Record;
use crate::report::ReportLine;
use crate::statistics::{CriticalValue, TimePointStats};
use crate::traits::{Accumulator, MergeError};

/// Running statistics for every time-key seen in a stream
///
/// Keys are held in a [`BTreeMap`], so reports come out in ascending key
/// order without a separate sort. Each key owns exactly one
/// [`TimePointStats`], created on first observation and updated in place.
///
/// # Example
///
/// ```
/// use colsummary::aggregate::Aggregator;
///
/// let mut agg = Aggregator::new();
/// agg.fold(5, 2.0);
/// agg.fold(0, 1.0);
/// agg.fold(5, 4.0);
///
/// let report = agg.report(0);
/// assert_eq!(report.len(), 2);
/// assert_eq!(report[0].key, 0);
/// assert_eq!(report[1].key, 5);
/// assert_eq!(report[1].mean, 3.0);
///
/// // Keys below the threshold are left out
/// assert_eq!(agg.report(1).len(), 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Aggregator {
    records: BTreeMap<i64, TimePointStats>,
    critical: CriticalValue,
}

impl Aggregator {
    /// Create an empty aggregator using the default critical value
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty aggregator reporting intervals with `critical`
    pub fn with_critical(critical: CriticalValue) -> Self {
        Self {
            records: BTreeMap::new(),
            critical,
        }
    }

    /// Critical value applied in [`report`](Aggregator::report)
    pub fn critical(&self) -> CriticalValue {
        self.critical
    }

    /// Fold `value` into the record for `key`, creating it if needed
    ///
    /// NaN values are ignored, so no record is ever created from one.
    pub fn fold(&mut self, key: i64, value: f64) {
        if value.is_nan() {
            return;
        }

        match self.records.entry(key) {
            Entry::Vacant(entry) => {
                entry.insert(TimePointStats::new(key, value));
            }
            Entry::Occupied(mut entry) => entry.get_mut().fold(value),
        }
    }

    /// Fold a parsed record
    pub fn fold_record(&mut self, record: Record) {
        self.fold(record.key, record.value);
    }

    /// Statistics for a single key
    pub fn get(&self, key: i64) -> Option<&TimePointStats> {
        self.records.get(&key)
    }

    /// Records with `key >= min_key`, ascending by key
    pub fn records(&self, min_key: i64) -> impl Iterator<Item = &TimePointStats> + '_ {
        self.records.range(min_key..).map(|(_, stats)| stats)
    }

    /// Report lines for every key `>= min_key`, ascending by key
    pub fn report(&self, min_key: i64) -> Vec<ReportLine> {
        self.records(min_key)
            .map(|stats| ReportLine::from_stats(stats, self.critical))
            .collect()
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if no key has been observed
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Total number of values folded across all keys
    pub fn total_count(&self) -> u64 {
        self.records.values().map(|stats| stats.count()).sum()
    }

    /// Merge every record of `other` into this aggregator, key by key
    ///
    /// The result matches a single pass over both inputs within floating-point
    /// tolerance. This aggregator's critical value is kept.
    pub fn merge(&mut self, other: &Aggregator) -> Result<(), MergeError> {
        for (&key, stats) in &other.records {
            match self.records.entry(key) {
                Entry::Vacant(entry) => {
                    entry.insert(stats.clone());
                }
                Entry::Occupied(mut entry) => entry.get_mut().merge(stats)?,
            }
        }
        Ok(())
    }
}

impl Extend<Record> for Aggregator {
    fn extend<I: IntoIterator<Item = Record>>(&mut self, iter: I) {
        for record in iter {
            self.fold_record(record);
        }
    }
}

impl FromIterator<Record> for Aggregator {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        let mut agg = Aggregator::new();
        agg.extend(iter);
        agg
    }
}
