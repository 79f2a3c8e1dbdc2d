//! Single-pass summarization of a data file
//!
//! The driver reads the input sequentially, screens out short lines, parses
//! the rest and folds each record into one [`Aggregator`] before reading the
//! next line. Nothing is written until the whole input has been consumed.

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use tracing::{debug, info, instrument, warn};

use crate::aggregate::Aggregator;
use crate::error::{Error, Result};
use crate::parse::{is_candidate, parse_line, ParseError, MIN_LINE_LEN};
use crate::report::{render, RenderOptions};
use crate::statistics::CriticalValue;

/// What to do with a line that fails to parse
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MalformedPolicy {
    /// Drop the line and continue
    #[default]
    Skip,
    /// Abort the run on the first malformed line
    Strict,
}

/// Settings for one summarization run
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryConfig {
    /// Metric column to summarize; the time-key is column 0
    pub column: usize,
    /// Smallest time-key included in the report
    pub min_key: i64,
    /// Multiplier for the confidence interval
    pub critical: CriticalValue,
    /// Lines of this many bytes or fewer are skipped unparsed
    pub min_line_len: usize,
    pub policy: MalformedPolicy,
    pub render: RenderOptions,
}

impl SummaryConfig {
    pub fn new(column: usize) -> Self {
        Self {
            column,
            min_key: 0,
            critical: CriticalValue::default(),
            min_line_len: MIN_LINE_LEN,
            policy: MalformedPolicy::default(),
            render: RenderOptions::default(),
        }
    }

    /// Reject settings that cannot produce a meaningful report
    pub fn validate(&self) -> Result<()> {
        if self.column == 0 {
            return Err(Error::invalid_args(
                "column 0 is the time-key; metric columns start at 1",
            ));
        }
        if !self.critical.is_valid() {
            return Err(match self.critical {
                CriticalValue::Runs(runs) => {
                    Error::config(format!("at least 2 runs are required, got {}", runs))
                }
                CriticalValue::Fixed(z) => Error::config(format!(
                    "critical value must be finite and positive, got {}",
                    z
                )),
            });
        }
        Ok(())
    }
}

/// Line accounting for one pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassStats {
    pub lines_read: u64,
    /// Lines screened out by length
    pub lines_short: u64,
    /// Column-name lines, skipped under every policy
    pub lines_header: u64,
    /// Records the parser rejected
    pub lines_malformed: u64,
    pub records_folded: u64,
}

/// Result of a completed pass
#[derive(Debug, Clone)]
pub struct Summary {
    pub aggregator: Aggregator,
    pub stats: PassStats,
}

/// Fold every valid line of `reader` into a fresh aggregator
#[instrument(skip(reader, config), fields(column = config.column, policy = ?config.policy))]
pub fn summarize_reader<R: BufRead>(mut reader: R, config: &SummaryConfig) -> Result<Summary> {
    config.validate()?;

    let mut aggregator = Aggregator::with_critical(config.critical);
    let mut stats = PassStats::default();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        stats.lines_read += 1;

        let text = String::from_utf8_lossy(&buf);
        let line = text.trim_end_matches(|c: char| c == '\n' || c == '\r');
        if !is_candidate(line, config.min_line_len) {
            stats.lines_short += 1;
            continue;
        }

        match parse_line(line, config.column) {
            Ok(record) => {
                aggregator.fold_record(record);
                stats.records_folded += 1;
            }
            Err(ParseError::Header { token }) => {
                debug!(line_number = stats.lines_read, %token, "Skipping header line");
                stats.lines_header += 1;
            }
            Err(source) => match config.policy {
                MalformedPolicy::Skip => {
                    debug!(
                        line_number = stats.lines_read,
                        reason = %source,
                        "Skipping malformed line"
                    );
                    stats.lines_malformed += 1;
                }
                MalformedPolicy::Strict => {
                    return Err(Error::MalformedRecord {
                        line_number: stats.lines_read,
                        source,
                    });
                }
            },
        }
    }

    info!(
        lines_read = stats.lines_read,
        records_folded = stats.records_folded,
        lines_short = stats.lines_short,
        lines_header = stats.lines_header,
        lines_malformed = stats.lines_malformed,
        keys = aggregator.len(),
        "Finished reading input"
    );
    if stats.lines_malformed > 0 {
        warn!(
            lines_malformed = stats.lines_malformed,
            "Skipped malformed lines; they are excluded from all statistics"
        );
    }

    Ok(Summary { aggregator, stats })
}

/// Open `path` and summarize it
///
/// The file handle lives only for the duration of the read loop.
pub fn summarize_file(path: &Path, config: &SummaryConfig) -> Result<Summary> {
    let file = File::open(path).map_err(|source| Error::FileOpen {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), "Reading data file");
    summarize_reader(BufReader::new(file), config)
}

/// Summarize `path` and write the report for keys `>= config.min_key` to `out`
///
/// Nothing is written when summarization fails.
pub fn run<W: Write>(path: &Path, config: &SummaryConfig, out: &mut W) -> Result<PassStats> {
    let summary = summarize_file(path, config)?;
    let lines = summary.aggregator.report(config.min_key);
    debug!(lines = lines.len(), min_key = config.min_key, "Rendering report");
    render(&lines, &config.render, out)?;
    Ok(summary.stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const DATA: &str = "\
day\tdiversity\ttmrca\tnetau\tserialInterval\tantigenicDiversity\tN\tS\tI\tR\tcases
0\t0.000\t0.000\t0.274\t0.000\t0.000\t10000\t9900\t100\t0\t0
5\t0.017\t0.014\t0.274\t0.002\t0.024\t9955\t6442\t3513\t0\t5098

0\t0.010\t0.000\t0.274\t0.000\t0.000\t9999\t9900\t99\t0\t0
5\t0.019\t0.016\t0.274\t0.002\t0.026\t9945\t6440\t3505\t0\t5090
";

    fn summarize(data: &str, config: &SummaryConfig) -> Result<Summary> {
        summarize_reader(Cursor::new(data.as_bytes()), config)
    }

    #[test]
    fn test_population_column() {
        let summary = summarize(DATA, &SummaryConfig::new(6)).unwrap();

        let day0 = summary.aggregator.get(0).unwrap();
        assert_eq!(day0.count(), 2);
        assert_eq!(day0.mean(), 9999.5);
        assert_eq!(day0.sum(), 19999.0);
        assert_eq!(day0.min(), 9999.0);
        assert_eq!(day0.max(), 10000.0);

        let day5 = summary.aggregator.get(5).unwrap();
        assert_eq!(day5.mean(), 9950.0);
    }

    #[test]
    fn test_pass_stats() {
        let summary = summarize(DATA, &SummaryConfig::new(6)).unwrap();

        assert_eq!(
            summary.stats,
            PassStats {
                lines_read: 6,
                lines_short: 1,
                lines_header: 1,
                lines_malformed: 0,
                records_folded: 4,
            }
        );
    }

    #[test]
    fn test_skip_policy_ignores_bad_lines() {
        let data = "0 1.0 2.0 3.0 4.0\n0 oops 2.0 3.0 4.0\n0 3.0 2.0 3.0 4.0\n";
        let summary = summarize(data, &SummaryConfig::new(1)).unwrap();

        let day0 = summary.aggregator.get(0).unwrap();
        assert_eq!(day0.count(), 2);
        assert_eq!(day0.mean(), 2.0);
        assert_eq!(summary.stats.lines_malformed, 1);
    }

    #[test]
    fn test_strict_policy_aborts() {
        let mut config = SummaryConfig::new(1);
        config.policy = MalformedPolicy::Strict;

        let data = "0 1.0 2.0 3.0 4.0\n0 oops 2.0 3.0 4.0\n";
        match summarize(data, &config) {
            Err(Error::MalformedRecord { line_number, .. }) => assert_eq!(line_number, 2),
            other => panic!("expected MalformedRecord, got {:?}", other),
        }
    }

    #[test]
    fn test_strict_policy_still_screens_short_lines() {
        let mut config = SummaryConfig::new(1);
        config.policy = MalformedPolicy::Strict;

        let data = "\n#hdr\n0 1.0 2.0 3.0 4.0\n";
        let summary = summarize(data, &config).unwrap();
        assert_eq!(summary.stats.lines_short, 2);
        assert_eq!(summary.aggregator.len(), 1);
    }

    #[test]
    fn test_column_beyond_row() {
        let summary = summarize(DATA, &SummaryConfig::new(11)).unwrap();
        assert!(summary.aggregator.is_empty());
        assert_eq!(summary.stats.lines_header, 1);
        assert_eq!(summary.stats.lines_malformed, 4);
    }

    #[test]
    fn test_strict_policy_skips_header_lines() {
        let mut config = SummaryConfig::new(6);
        config.policy = MalformedPolicy::Strict;

        let summary = summarize(DATA, &config).unwrap();
        assert_eq!(summary.stats.lines_header, 1);
        assert_eq!(summary.stats.lines_malformed, 0);
        assert_eq!(summary.aggregator.get(0).unwrap().count(), 2);
    }

    #[test]
    fn test_strict_policy_rejects_fractional_key() {
        let mut config = SummaryConfig::new(1);
        config.policy = MalformedPolicy::Strict;

        let data = "day value padding\n0.5 1.0 2.0 3.0 4.0\n";
        match summarize(data, &config) {
            Err(Error::MalformedRecord { line_number, source }) => {
                assert_eq!(line_number, 2);
                assert!(matches!(source, ParseError::InvalidKey { .. }));
            }
            other => panic!("expected MalformedRecord, got {:?}", other),
        }
    }

    #[test]
    fn test_crlf_and_min_line_len() {
        let mut config = SummaryConfig::new(1);
        config.min_line_len = 0;

        let summary = summarize("1 2.5\r\n1 3.5\r\n", &config).unwrap();
        let day1 = summary.aggregator.get(1).unwrap();
        assert_eq!(day1.count(), 2);
        assert_eq!(day1.mean(), 3.0);
    }

    #[test]
    fn test_time_column_is_invalid_argument() {
        let err = summarize(DATA, &SummaryConfig::new(0)).unwrap_err();
        assert!(matches!(err, Error::InvalidArguments(_)));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_invalid_critical_value() {
        let mut config = SummaryConfig::new(1);
        config.critical = CriticalValue::Fixed(-1.0);
        assert!(matches!(summarize(DATA, &config), Err(Error::Config(_))));

        config.critical = CriticalValue::Runs(1);
        assert!(matches!(summarize(DATA, &config), Err(Error::Config(_))));
    }

    #[test]
    fn test_missing_file() {
        let path = Path::new("/nonexistent/colsummary/data.txt");
        let mut out = Vec::new();

        let err = run(path, &SummaryConfig::new(1), &mut out).unwrap_err();
        assert!(matches!(err, Error::FileOpen { .. }));
        assert_eq!(err.exit_code(), 2);
        assert!(out.is_empty());
    }
}
