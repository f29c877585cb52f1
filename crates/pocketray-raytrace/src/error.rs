//! Error types for ray casting.

use thiserror::Error;

/// Errors that can occur while preparing or running a cast.
#[derive(Error, Debug)]
pub enum RaytraceError {
    /// A sampling direction has zero (or non-finite) length.
    #[error("sampling direction has zero length: ({0}, {1}, {2})")]
    ZeroDirection(f64, f64, f64),

    /// A sphere has a negative or non-finite radius.
    #[error("invalid sphere radius {radius} for {atom} {residue}")]
    InvalidRadius {
        /// Offending radius.
        radius: f64,
        /// Atom name of the sphere.
        atom: String,
        /// Residue name of the sphere.
        residue: String,
    },

    /// Cast settings are out of range.
    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    /// Settings file could not be parsed.
    #[error("invalid settings file: {0}")]
    Config(#[from] toml::de::Error),
}

/// Result type for ray casting operations.
pub type Result<T> = std::result::Result<T, RaytraceError>;
