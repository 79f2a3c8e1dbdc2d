//! Record parsing for whitespace-separated time-series lines
//!
//! Each data line starts with an integer time-key (column 0) followed by
//! metric columns in a fixed order. [`parse_line`] extracts the key and one metric; lines
//! too short to hold a record are screened out first with [`is_candidate`], and a
//! line whose first token is not a number is reported as [`ParseError::Header`].
//!
//! # Example
//!
//! ```
//! use colsummary::parse::{is_candidate, parse_line, MIN_LINE_LEN};
//!
//! let line = "5\t0.017\t0.014\t0.274\t0.002\t0.024\t9955\t6442";
//! assert!(is_candidate(line, MIN_LINE_LEN));
//!
//! let record = parse_line(line, 6).unwrap();
//! assert_eq!(record.key, 5);
//! assert_eq!(record.value, 9955.0);
//! ```

mod line;

pub use line::{is_candidate, parse_line, ParseError, Record, MIN_LINE_LEN};
