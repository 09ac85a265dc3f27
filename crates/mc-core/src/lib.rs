//! mc-core: stable foundation for the McCabe-Thiele workspace.
//!
//! Contains:
//! - units (uom temperature type, kelvin and Celsius helpers, 760 mmHg)
//! - numeric (Real + finiteness check + table interpolation)
//! - newton / bisection (bounded scalar root finders with explicit outcomes)
//! - error (shared error types)

pub mod bisection;
pub mod error;
pub mod newton;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use bisection::{BisectionConfig, bisect};
pub use error::{McError, McResult};
pub use newton::{NewtonConfig, newton_solve};
pub use numeric::*;
pub use units::*;
