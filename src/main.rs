//! colsummary - per-time-key statistics for one column of simulation output

mod cli;
mod logging;

use std::io::{self, BufWriter};
use std::process;

use cli::Cli;
use colsummary::{driver, Error, Result};
use logging::LoggingConfig;

fn main() {
    let cli = match Cli::try_parse_args(std::env::args_os()) {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version are reported through the same path
            let _ = e.print();
            let code = if e.use_stderr() {
                Error::invalid_args(e.to_string()).exit_code()
            } else {
                0
            };
            process::exit(code);
        }
    };

    if let Err(e) = init_logging(&cli) {
        eprintln!("Failed to initialize logging: {:#}", e);
    }

    match run(&cli) {
        Ok(()) => process::exit(0),
        Err(e) => {
            tracing::debug!(error = ?e, "Run failed");
            eprintln!("Error: {}", e);
            if e.should_show_help() {
                eprintln!("\nFor more information, try '--help'");
            }
            process::exit(e.exit_code());
        }
    }
}

/// Summarize the data file and write the report to stdout
fn run(cli: &Cli) -> Result<()> {
    let config = cli.to_config()?;
    tracing::info!(
        path = %cli.data_file.display(),
        column = config.column,
        min_key = config.min_key,
        critical = config.critical.value(),
        "Summarizing"
    );

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let stats = driver::run(&cli.data_file, &config, &mut out)?;

    tracing::info!(
        records_folded = stats.records_folded,
        lines_header = stats.lines_header,
        lines_malformed = stats.lines_malformed,
        "Report written"
    );
    Ok(())
}

fn init_logging(cli: &Cli) -> anyhow::Result<()> {
    let mut config = if cli.quiet {
        LoggingConfig::quiet()
    } else {
        LoggingConfig::from_verbosity(cli.verbose)
    };
    if !cli.quiet {
        config.merge_with_env();
    }
    logging::init_logging(&config)
}
