//! Single-line record parser

/// Lines of this many bytes or fewer are never parsed
pub const MIN_LINE_LEN: usize = 10;

/// One `(time-key, value)` observation extracted from a line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Record {
    pub key: i64,
    pub value: f64,
}

/// Why a line could not be turned into a [`Record`]
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    /// Line has no tokens at all
    #[error("line is empty")]
    Empty,

    /// Column 0 holds the time-key, not a metric
    #[error("column 0 is the time-key column")]
    TimeColumn,

    /// First token is not a number at all, as in a column-name line
    #[error("header line starting with '{token}'")]
    Header { token: String },

    /// First token is numeric but not an integer
    #[error("time-key '{token}' is not an integer")]
    InvalidKey { token: String },

    /// Fewer metric columns than requested
    #[error("column {column} requested but only {available} metric columns present")]
    MissingColumn { column: usize, available: usize },

    /// Target token is not a number
    #[error("column {column} value '{token}' is not a number")]
    InvalidValue { column: usize, token: String },

    /// Target token parsed to NaN or infinity
    #[error("column {column} value '{token}' is not finite")]
    NonFiniteValue { column: usize, token: String },
}

/// Cheap pre-filter for blank and header lines
#[inline]
pub fn is_candidate(line: &str, min_len: usize) -> bool {
    line.len() > min_len
}

/// Extract the time-key and the value of column `column`
///
/// Columns are counted across the whole line with the time-key as column 0,
/// so the first metric is column 1. Intervening columns are skipped without
/// being parsed.
pub fn parse_line(line: &str, column: usize) -> Result<Record, ParseError> {
    if column == 0 {
        return Err(ParseError::TimeColumn);
    }

    let mut tokens = line.split_whitespace();

    let key_token = tokens.next().ok_or(ParseError::Empty)?;
    let key = match key_token.parse::<i64>() {
        Ok(key) => key,
        Err(_) if key_token.parse::<f64>().is_ok() => {
            return Err(ParseError::InvalidKey {
                token: key_token.to_string(),
            })
        }
        Err(_) => {
            return Err(ParseError::Header {
                token: key_token.to_string(),
            })
        }
    };

    let mut position = 0;
    let value_token = loop {
        match tokens.next() {
            Some(token) => {
                position += 1;
                if position == column {
                    break token;
                }
            }
            None => {
                return Err(ParseError::MissingColumn {
                    column,
                    available: position,
                })
            }
        }
    };

    let value = value_token
        .parse::<f64>()
        .map_err(|_| ParseError::InvalidValue {
            column,
            token: value_token.to_string(),
        })?;
    if !value.is_finite() {
        return Err(ParseError::NonFiniteValue {
            column,
            token: value_token.to_string(),
        });
    }

    Ok(Record { key, value })
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROW: &str = "0\t0.000\t0.000\t0.274\t0.000\t0.000\t10000\t9900\t100\t0\t0";

    #[test]
    fn test_first_column() {
        let record = parse_line(ROW, 1).unwrap();
        assert_eq!(record, Record { key: 0, value: 0.0 });
    }

    #[test]
    fn test_skips_to_column() {
        assert_eq!(parse_line(ROW, 3).unwrap().value, 0.274);
        assert_eq!(parse_line(ROW, 6).unwrap().value, 10000.0);
        assert_eq!(parse_line(ROW, 7).unwrap().value, 9900.0);
        assert_eq!(parse_line(ROW, 10).unwrap().value, 0.0);
    }

    #[test]
    fn test_time_column_rejected() {
        assert_eq!(parse_line(ROW, 0), Err(ParseError::TimeColumn));
    }

    #[test]
    fn test_spaces_and_tabs() {
        let record = parse_line("  15   1.5\t 2.5  ", 2).unwrap();
        assert_eq!(record, Record { key: 15, value: 2.5 });
    }

    #[test]
    fn test_negative_key() {
        assert_eq!(parse_line("-5 3.0", 1).unwrap().key, -5);
    }

    #[test]
    fn test_scientific_notation() {
        assert_eq!(parse_line("10 1e3", 1).unwrap().value, 1000.0);
    }

    #[test]
    fn test_empty() {
        assert_eq!(parse_line("", 1), Err(ParseError::Empty));
        assert_eq!(parse_line(" \t ", 1), Err(ParseError::Empty));
    }

    #[test]
    fn test_header_line() {
        let header = "day\tdiversity\ttmrca\tnetau";
        assert_eq!(
            parse_line(header, 1),
            Err(ParseError::Header {
                token: "day".to_string()
            })
        );
        assert!(matches!(
            parse_line("#day count mean", 1),
            Err(ParseError::Header { .. })
        ));
    }

    #[test]
    fn test_fractional_key_rejected() {
        assert!(matches!(
            parse_line("0.5 1.0", 1),
            Err(ParseError::InvalidKey { .. })
        ));
        assert!(matches!(
            parse_line("1e3 1.0", 1),
            Err(ParseError::InvalidKey { .. })
        ));
    }

    #[test]
    fn test_column_out_of_range() {
        assert_eq!(
            parse_line(ROW, 11),
            Err(ParseError::MissingColumn {
                column: 11,
                available: 10
            })
        );
        assert_eq!(
            parse_line("7", 1),
            Err(ParseError::MissingColumn {
                column: 1,
                available: 0
            })
        );
    }

    #[test]
    fn test_non_numeric_value() {
        assert_eq!(
            parse_line("5 abc 1.0", 1),
            Err(ParseError::InvalidValue {
                column: 1,
                token: "abc".to_string()
            })
        );
        // Non-numeric tokens before the target column are not inspected
        assert_eq!(parse_line("5 abc 1.0", 2).unwrap().value, 1.0);
    }

    #[test]
    fn test_non_finite_value() {
        assert!(matches!(
            parse_line("5 NaN", 1),
            Err(ParseError::NonFiniteValue { .. })
        ));
        assert!(matches!(
            parse_line("5 inf", 1),
            Err(ParseError::NonFiniteValue { .. })
        ));
    }

    #[test]
    fn test_is_candidate() {
        assert!(!is_candidate("", MIN_LINE_LEN));
        assert!(!is_candidate("0\t1.0", MIN_LINE_LEN));
        assert!(!is_candidate("0123456789", MIN_LINE_LEN));
        assert!(is_candidate("01234567890", MIN_LINE_LEN));
        assert!(is_candidate(ROW, MIN_LINE_LEN));
        assert!(is_candidate("0 1", 0));
    }
}
