//! Command-line interface argument parsing and definitions

use std::path::PathBuf;

use std::ffi::OsString;

use clap::parser::ValueSource;
use clap::{CommandFactory, FromArgMatches, Parser};
use colsummary::driver::{MalformedPolicy, SummaryConfig};
use colsummary::parse::MIN_LINE_LEN;
use colsummary::report::{OutputFormat, RenderOptions};
use colsummary::statistics::CriticalValue;
use colsummary::{Error, Result};

/// Summarize one column of concatenated simulation output per time-key
///
/// Reads a whitespace-separated file whose first column is an integer
/// time-key and prints count, mean, SD, min, max, sum and a confidence
/// interval for every time-key, in ascending order.
#[derive(Parser, Debug)]
#[command(name = "colsummary", version, about, long_about = None)]
pub struct Cli {
    /// Aggregate data file (outputs of independent runs, concatenated)
    #[arg(value_name = "DATA_FILE")]
    pub data_file: PathBuf,

    /// Column to summarize, counted from the time-key column (column 0)
    #[arg(value_name = "COLUMN")]
    pub column: usize,

    /// Smallest time-key to include in the report
    #[arg(value_name = "MIN_KEY", default_value_t = 0, allow_negative_numbers = true)]
    pub min_key: i64,

    /// Critical value for the confidence interval
    #[arg(long, env = "COLSUMMARY_Z")]
    pub z: Option<f64>,

    /// Number of independent runs; derives the 95% Student-t critical value
    #[arg(long, env = "COLSUMMARY_RUNS")]
    pub runs: Option<u32>,

    /// Fail on the first malformed line instead of skipping it
    #[arg(long)]
    pub strict: bool,

    /// Report format
    #[arg(short, long, default_value_t = OutputFormat::Csv)]
    pub format: OutputFormat,

    /// Fixed number of decimals for floating-point fields (CSV only)
    #[arg(long)]
    pub precision: Option<usize>,

    /// Lines of this many bytes or fewer are skipped without parsing
    #[arg(long, default_value_t = MIN_LINE_LEN)]
    pub min_line_len: usize,

    /// Enable verbose logging (can be used multiple times)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    #[arg(skip)]
    z_source: Option<ValueSource>,

    #[arg(skip)]
    runs_source: Option<ValueSource>,
}

impl Cli {
    /// Parse `args`, remembering whether `--z` and `--runs` came from the
    /// command line or from the environment
    pub fn try_parse_args<I, T>(args: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = Self::command().try_get_matches_from(args)?;
        let mut cli = Self::from_arg_matches(&matches)?;
        cli.z_source = matches.value_source("z");
        cli.runs_source = matches.value_source("runs");
        Ok(cli)
    }

    fn z_on_command_line(&self) -> bool {
        self.z_source == Some(ValueSource::CommandLine)
    }

    fn runs_on_command_line(&self) -> bool {
        self.runs_source == Some(ValueSource::CommandLine)
    }

    /// Pick the critical value; a flag overrides an environment variable
    fn critical(&self) -> Result<CriticalValue> {
        let from_runs = |runs: u32| {
            CriticalValue::for_runs(runs)
                .ok_or_else(|| Error::config(format!("--runs must be at least 2, got {}", runs)))
        };

        match (self.z, self.runs) {
            (Some(z), Some(runs)) => match (self.z_on_command_line(), self.runs_on_command_line()) {
                (true, true) => Err(Error::invalid_args(
                    "--z and --runs cannot be used together",
                )),
                (true, false) => Ok(CriticalValue::Fixed(z)),
                (false, true) => from_runs(runs),
                (false, false) => Err(Error::config(
                    "COLSUMMARY_Z and COLSUMMARY_RUNS are both set; unset one",
                )),
            },
            (Some(z), None) => Ok(CriticalValue::Fixed(z)),
            (None, Some(runs)) => from_runs(runs),
            (None, None) => Ok(CriticalValue::default()),
        }
    }

    /// Build the run configuration from the parsed arguments
    pub fn to_config(&self) -> Result<SummaryConfig> {
        let critical = self.critical()?;
        if self.precision.is_some() && self.format != OutputFormat::Csv {
            return Err(Error::invalid_args(format!(
                "--precision applies to CSV output only, not --format {}",
                self.format
            )));
        }

        let config = SummaryConfig {
            column: self.column,
            min_key: self.min_key,
            critical,
            min_line_len: self.min_line_len,
            policy: if self.strict {
                MalformedPolicy::Strict
            } else {
                MalformedPolicy::Skip
            },
            render: RenderOptions {
                format: self.format,
                precision: self.precision,
            },
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positional_arguments() {
        let cli = Cli::parse_from(["colsummary", "data.txt", "6"]);
        assert_eq!(cli.data_file, PathBuf::from("data.txt"));
        assert_eq!(cli.column, 6);
        assert_eq!(cli.min_key, 0);

        let cli = Cli::parse_from(["colsummary", "data.txt", "6", "100"]);
        assert_eq!(cli.min_key, 100);

        let cli = Cli::parse_from(["colsummary", "data.txt", "6", "-10"]);
        assert_eq!(cli.min_key, -10);
    }

    #[test]
    fn test_missing_arguments() {
        assert!(Cli::try_parse_from(["colsummary"]).is_err());
        assert!(Cli::try_parse_from(["colsummary", "data.txt"]).is_err());
        assert!(Cli::try_parse_from(["colsummary", "data.txt", "abc"]).is_err());
    }

    #[test]
    fn test_defaults_to_config() {
        let cli = Cli::parse_from(["colsummary", "data.txt", "6"]);
        let config = cli.to_config().unwrap();

        assert_eq!(config.column, 6);
        assert_eq!(config.critical, CriticalValue::default());
        assert_eq!(config.min_line_len, MIN_LINE_LEN);
        assert_eq!(config.policy, MalformedPolicy::Skip);
        assert_eq!(config.render, RenderOptions::default());
    }

    #[test]
    fn test_options_to_config() {
        let cli = Cli::parse_from([
            "colsummary",
            "data.txt",
            "3",
            "--runs",
            "11",
            "--strict",
            "--format",
            "json",
        ]);
        let config = cli.to_config().unwrap();

        assert_eq!(config.critical, CriticalValue::Runs(11));
        assert_eq!(config.policy, MalformedPolicy::Strict);
        assert_eq!(config.render.format, OutputFormat::Json);
        assert_eq!(config.render.precision, None);

        let cli = Cli::parse_from(["colsummary", "data.txt", "3", "--precision", "3"]);
        assert_eq!(cli.to_config().unwrap().render.precision, Some(3));
    }

    #[test]
    fn test_precision_rejected_for_json() {
        let cli = Cli::parse_from([
            "colsummary",
            "d.txt",
            "1",
            "--format",
            "json",
            "--precision",
            "2",
        ]);
        let err = cli.to_config().unwrap_err();
        assert!(matches!(err, Error::InvalidArguments(_)));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_z_and_runs_flags_conflict() {
        let cli =
            Cli::try_parse_args(["colsummary", "d.txt", "1", "--z", "2.0", "--runs", "5"]).unwrap();
        assert!(matches!(cli.to_config(), Err(Error::InvalidArguments(_))));
    }

    #[test]
    fn test_flag_overrides_environment() {
        let mut cli = Cli::try_parse_args(["colsummary", "d.txt", "1", "--runs", "5"]).unwrap();
        assert_eq!(cli.runs_source, Some(ValueSource::CommandLine));

        cli.z = Some(2.0);
        cli.z_source = Some(ValueSource::EnvVariable);
        assert_eq!(cli.to_config().unwrap().critical, CriticalValue::Runs(5));

        let mut cli = Cli::try_parse_args(["colsummary", "d.txt", "1", "--z", "3.0"]).unwrap();
        cli.runs = Some(5);
        cli.runs_source = Some(ValueSource::EnvVariable);
        assert_eq!(cli.to_config().unwrap().critical, CriticalValue::Fixed(3.0));

        cli.z_source = Some(ValueSource::EnvVariable);
        assert!(matches!(cli.to_config(), Err(Error::Config(_))));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let cli = Cli::parse_from(["colsummary", "d.txt", "1", "--runs", "1"]);
        assert!(matches!(cli.to_config(), Err(Error::Config(_))));

        let cli = Cli::parse_from(["colsummary", "d.txt", "1", "--z", "0"]);
        assert!(matches!(cli.to_config(), Err(Error::Config(_))));

        let cli = Cli::parse_from(["colsummary", "d.txt", "0"]);
        assert!(matches!(cli.to_config(), Err(Error::InvalidArguments(_))));
    }
}
