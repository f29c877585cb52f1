//! Error types for report handling.

use thiserror::Error;

/// Errors that can occur while reading or writing tables and reports.
#[derive(Error, Debug)]
pub enum ReportError {
    /// I/O error reading or writing a file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed input text.
    #[error("parse error at line {line}: {message}")]
    Parse {
        /// Line number (1-indexed).
        line: usize,
        /// Error message.
        message: String,
    },

    /// Values have zero or undefined spread, so they cannot be scaled.
    #[error("cannot normalize: standard deviation is {0}")]
    DegenerateScale(f64),
}

impl ReportError {
    /// Create a parse error.
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }
}

/// Result type for report operations.
pub type Result<T> = std::result::Result<T, ReportError>;
