//! CSV and JSON renderings of a report

use std::fmt;
use std::io::Write;
use std::str::FromStr;

use super::ReportLine;
use crate::error::Result;

/// Header line of the CSV rendering
pub const HEADER: &str = "#day, count, mean, SD, min, max, sum, 95%ci";

const SEPARATOR: &str = ", ";

/// Report output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Header plus one comma-separated line per key
    #[default]
    Csv,
    /// A JSON array of report lines
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Csv => write!(f, "csv"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format '{}' (expected csv or json)", other)),
        }
    }
}

/// How a report is written
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderOptions {
    pub format: OutputFormat,
    /// Fixed number of decimals for floating-point CSV fields;
    /// shortest round-trip representation when unset
    pub precision: Option<usize>,
}

/// Write `lines` to `out` in the configured format
pub fn render<W: Write>(lines: &[ReportLine], options: &RenderOptions, out: &mut W) -> Result<()> {
    match options.format {
        OutputFormat::Csv => render_csv(lines, options.precision, out)?,
        OutputFormat::Json => render_json(lines, out)?,
    }
    out.flush()?;
    Ok(())
}

/// Header line, then `day, count, mean, SD, min, max, sum, 95%ci` per line
pub fn render_csv<W: Write>(
    lines: &[ReportLine],
    precision: Option<usize>,
    out: &mut W,
) -> std::io::Result<()> {
    writeln!(out, "{}", HEADER)?;
    for line in lines {
        let floats = [line.mean, line.sd, line.min, line.max, line.sum, line.ci]
            .map(|v| format_float(v, precision));
        writeln!(
            out,
            "{}{sep}{}{sep}{}",
            line.key,
            line.count,
            floats.join(SEPARATOR),
            sep = SEPARATOR
        )?;
    }
    Ok(())
}

/// Pretty-printed JSON array followed by a newline
pub fn render_json<W: Write>(lines: &[ReportLine], out: &mut W) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, lines)?;
    writeln!(out)?;
    Ok(())
}

fn format_float(value: f64, precision: Option<usize>) -> String {
    match precision {
        Some(p) => format!("{:.*}", p, value),
        None => value.to_string(),
    }
}
