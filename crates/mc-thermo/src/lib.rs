//! mc-thermo: binary vapor-liquid equilibrium for McCabe-Thiele design.
//!
//! Provides:
//! - Antoine coefficients and coefficient tables (built-in catalog, delimited files)
//! - `EquilibriumModel` trait with an ideal Raoult's Law implementation
//! - `BinarySystem`: temperature bounds, x-y curve and bubble-temperature search
//!
//! # Example
//!
//! ```no_run
//! use mc_thermo::{AntoineTable, BinarySystem, ChemicalPair};
//!
//! let table = AntoineTable::builtin();
//! let system = BinarySystem::new(ChemicalPair::new("benzene", "toluene"), &table).unwrap();
//! let curve = system.curve();
//! println!("{} points, bounds {:?}", curve.len(), system.bounds());
//! ```

pub mod antoine;
pub mod catalog;
pub mod curve;
pub mod error;
pub mod model;

// Re-exports for ergonomics
pub use antoine::{AntoineCoefficients, AntoineEntry, AntoineTable, CoefficientSource};
pub use catalog::{ChemicalCatalogEntry, chemical_catalog, filter_chemical_catalog};
pub use curve::{
    BOUNDARY_MARGIN_K, BinarySystem, ChemicalPair, EquilibriumCurve, TemperatureBounds, TxyPoint,
    build_curve, temperature_boundaries, temperature_for_fraction,
};
pub use error::{ThermoError, ThermoResult};
pub use model::{Component, EquilibriumModel, RaoultModel};
