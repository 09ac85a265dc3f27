//! Error types for the mc-app service layer.

use std::path::PathBuf;

/// Application error shared by the CLI and any other front end.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Failed to read case file: {path}")]
    CaseFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Case file error: {0}")]
    Case(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Equilibrium error: {0}")]
    Thermo(#[from] mc_thermo::ThermoError),

    #[error("Column error: {0}")]
    Column(#[from] mc_column::ColumnError),

    #[error("Serialization error: {0}")]
    Serialize(String),
}

/// Result type for mc-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialize(err.to_string())
    }
}
