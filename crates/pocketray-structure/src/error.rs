//! Error types for structure I/O.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading or rewriting structure files.
#[derive(Error, Debug)]
pub enum StructureError {
    /// I/O error reading or writing a file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A record could not be parsed.
    #[error("parse error at line {line}: {message}")]
    Parse {
        /// Line number (1-indexed).
        line: usize,
        /// Error message.
        message: String,
    },

    /// A sampling-point file holds no ATOM/HETATM records.
    #[error("no sampling points found in {}", .0.display())]
    NoPoints(PathBuf),

    /// No heme iron to center on.
    #[error("no FE atom found in residues HEM*")]
    MissingAnchor,

    /// Records could not be turned into rays or spheres.
    #[error(transparent)]
    Raytrace(#[from] pocketray_raytrace::RaytraceError),
}

impl StructureError {
    /// Create a parse error.
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }
}

/// Result type for structure I/O.
pub type Result<T> = std::result::Result<T, StructureError>;
