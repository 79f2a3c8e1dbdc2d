//! # Colsummary
//!
//! Streaming per-time-point statistics across concatenated simulation runs.
//!
//! Many independent runs of a stochastic simulation each write one line per
//! time point. Concatenated, the same time-key appears once per run.
//! Colsummary reads such a file in a single pass and reports, for every
//! time-key, the count, mean, standard deviation, min, max, sum and a
//! confidence interval of one chosen column.
//!
//! ## Features
//!
//! - **Single pass, O(keys) memory**: values are never stored
//! - **Numerically stable**: Welford's update for mean and variance
//! - **Ordered reports**: ascending by time-key, optionally from a minimum key
//! - **Mergeable**: summaries of separate files combine exactly like one pass
//!
//! ## Quick Start
//!
//! ```rust
//! use colsummary::prelude::*;
//! use std::io::Cursor;
//!
//! let data = "\
//! 0\t0.000\t0.000\t0.274\t0.000\t0.000\t10000
//! 0\t0.010\t0.000\t0.274\t0.000\t0.000\t9999
//! ";
//!
//! let summary = summarize_reader(Cursor::new(data), &SummaryConfig::new(6)).unwrap();
//! let report = summary.aggregator.report(0);
//!
//! assert_eq!(report[0].count, 2);
//! assert_eq!(report[0].mean, 9999.5);
//! assert_eq!(report[0].sum, 19999.0);
//! ```
//!
//! ## Combining summaries
//!
//! ```rust
//! use colsummary::aggregate::Aggregator;
//!
//! let mut first = Aggregator::new();
//! let mut second = Aggregator::new();
//!
//! first.fold(0, 1.0);
//! second.fold(0, 3.0);
//!
//! first.merge(&second).unwrap();
//! assert_eq!(first.get(0).unwrap().mean(), 2.0);
//! ```

pub mod aggregate;
pub mod driver;
pub mod error;
pub mod parse;
pub mod report;
pub mod statistics;
pub mod traits;

pub mod prelude {
    pub use crate::traits::*;

    pub use crate::aggregate::Aggregator;
    pub use crate::driver::{
        summarize_file, summarize_reader, MalformedPolicy, PassStats, Summary, SummaryConfig,
    };
    pub use crate::error::Error;
    pub use crate::report::{OutputFormat, RenderOptions, ReportLine};
    pub use crate::statistics::{CriticalValue, TimePointStats};
}

pub use aggregate::Aggregator;
pub use error::{Error, Result};
pub use statistics::TimePointStats;
