//! Error types for column design operations.

use mc_thermo::ThermoError;
use thiserror::Error;

/// Errors that can occur while specifying or stepping a column.
#[derive(Error, Debug)]
pub enum ColumnError {
    #[error("Invalid tower specification: {field} = {value} ({reason})")]
    InvalidSpec {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("Cannot parse {field} from '{input}'")]
    Parse { field: &'static str, input: String },

    #[error("Equilibrium error: {0}")]
    Thermo(#[from] ThermoError),
}

pub type ColumnResult<T> = Result<T, ColumnError>;
