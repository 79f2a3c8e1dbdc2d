//! Report lines and their text renderings
//!
//! # Example
//!
//! ```
//! use colsummary::aggregate::Aggregator;
//! use colsummary::report::{render, OutputFormat, RenderOptions};
//!
//! let mut agg = Aggregator::new();
//! agg.fold(0, 10000.0);
//! agg.fold(0, 9999.0);
//!
//! let mut out = Vec::new();
//! render(&agg.report(0), &RenderOptions::default(), &mut out).unwrap();
//!
//! let text = String::from_utf8(out).unwrap();
//! assert!(text.starts_with("#day, count, mean, SD, min, max, sum, 95%ci\n"));
//! assert!(text.contains("0, 2, 9999.5, 0.5, 9999, 10000, 19999, "));
//! ```

mod line;
mod render;

pub use line::ReportLine;
pub use render::{render, render_csv, render_json, OutputFormat, RenderOptions, HEADER};
