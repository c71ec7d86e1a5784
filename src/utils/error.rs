//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors that can occur while parsing a raw trace
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Trace format error at line {line}: {message}")]
    Format { line: usize, message: String },

    #[error("Settings header is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Transaction {transaction} at line {line}: {message}")]
    Correlation {
        line: usize,
        transaction: u64,
        message: String,
    },

    #[error("Failed to read trace: {0}")]
    Io(#[from] std::io::Error),
}

impl ParseError {
    pub(crate) fn format(line: usize, message: impl Into<String>) -> Self {
        Self::Format {
            line,
            message: message.into(),
        }
    }
}

/// Errors that can occur while deriving metrics from parsed data
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Rate index {index} for node '{node}' is outside [0, {total_ticks}]")]
    Range {
        index: i128,
        total_ticks: u64,
        node: String,
    },

    #[error("Distribution requested on an empty sample set")]
    EmptyInput,

    #[error("Percentile must be in (0, 1], got {0}")]
    InvalidPercentile(f64),

    #[error("Invalid latency bounds: min {min} is greater than max {max}")]
    InvalidBounds { min: u64, max: u64 },

    #[error("Invalid node pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("Missing or invalid stat: {0}")]
    MissingStat(String),
}

/// Errors that can occur while saving or loading a parsed artifact
#[derive(Error, Debug)]
pub enum ArtifactError {
    #[error("Unsupported artifact version {found} (expected {expected})")]
    Version { found: u32, expected: u32 },

    #[error("Not a ratesim artifact: {0}")]
    UnknownFormat(String),

    #[error("Invalid artifact path: {0}")]
    InvalidPath(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Artifact serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
