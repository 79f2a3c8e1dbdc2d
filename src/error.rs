//! Error types for summarizing a data file
//!
//! Every failure the tool can hit maps to one [`Error`] variant with a
//! stable process exit code.

use std::io;
use std::path::PathBuf;

use crate::parse::ParseError;
use crate::traits::MergeError;

/// Result type alias for summary operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Input path missing or unreadable
    #[error("cannot open data file {}: {source}", path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A line failed to parse and the run is strict
    #[error("malformed record on line {line_number}: {source}")]
    MalformedRecord {
        line_number: u64,
        #[source]
        source: ParseError,
    },

    /// Missing or unusable command-line arguments
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    /// Read or write failure after the input was opened
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Inconsistent configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// JSON rendering failure
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Incompatible summaries
    #[error("merge error: {0}")]
    Merge(#[from] MergeError),
}

impl Error {
    /// Create an invalid arguments error
    pub fn invalid_args(message: impl Into<String>) -> Self {
        Self::InvalidArguments(message.into())
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Get the process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidArguments(_) => 1,
            Self::FileOpen { .. } => 2,
            Self::MalformedRecord { .. } => 3,
            Self::Io(_) => 4,
            Self::Config(_) => 5,
            Self::Json(_) => 6,
            Self::Merge(_) => 7,
        }
    }

    /// Check if this error should be followed by usage help
    pub fn should_show_help(&self) -> bool {
        matches!(self, Self::InvalidArguments(_) | Self::Config(_))
    }
}
