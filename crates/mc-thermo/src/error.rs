//! Equilibrium and coefficient-table errors.

use mc_core::McError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for thermo operations.
pub type ThermoResult<T> = Result<T, ThermoError>;

/// Errors that can occur while loading coefficients or building equilibrium data.
#[derive(Error, Debug)]
pub enum ThermoError {
    /// Chemical name absent from the coefficient source.
    #[error("Unknown chemical: {name}")]
    UnknownChemical { name: String },

    /// Invalid argument.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// Malformed line in a delimited coefficient table.
    #[error("Coefficient table line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Coefficient table could not be read.
    #[error("Failed to read coefficient table: {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Equilibrium curve is not ordered by vapor fraction.
    #[error("Equilibrium curve is not monotonic at index {index}")]
    NonMonotonicCurve { index: usize },

    /// Numeric failure from a root finder.
    #[error(transparent)]
    Numeric(#[from] McError),
}
