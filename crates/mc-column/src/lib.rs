//! mc-column: McCabe-Thiele column design on top of an equilibrium curve.
//!
//! Provides:
//! - `TowerSpec`: validated reflux ratio, compositions and Murphree efficiency
//! - `OperatingLine`: rectifying and stripping lines for a saturated-liquid feed
//! - `effective_curve`: efficiency-corrected equilibrium curve
//! - `count_stages`: the stepping procedure, with a drawable trace
//! - `sweep_reflux`: stage counts over a range of reflux ratios

pub mod efficiency;
pub mod error;
pub mod operating;
pub mod stepping;
pub mod sweep;
pub mod tower;

pub use efficiency::{EffectiveCurve, effective_curve};
pub use error::{ColumnError, ColumnResult};
pub use operating::{LineSegment, OperatingLine, Section};
pub use stepping::{MAX_PERMITTED_STEPS, StageCount, StageCountResult, StageStep, count_stages};
pub use sweep::{RefluxSweep, Spacing, SweepPoint, sweep_reflux};
pub use tower::{TowerSpec, parse_field};

/// Operating line, optional effective curve and stage count for one spec.
pub fn design(curve: &mc_thermo::EquilibriumCurve, spec: &TowerSpec) -> StageCountResult {
    let line = OperatingLine::from_spec(spec);
    let eff = effective_curve(spec, &line, curve);
    count_stages(curve, &line, eff.as_ref())
}
