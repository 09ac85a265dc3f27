use thiserror::Error;

pub type McResult<T> = Result<T, McError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum McError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("No valid root detected by bisection in [{lo}, {hi}]")]
    NoBracket { lo: f64, hi: f64 },
}
