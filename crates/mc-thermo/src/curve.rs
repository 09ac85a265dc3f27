//! Discretized equilibrium curves for a binary pair.
//!
//! A [`BinarySystem`] owns everything derived from one light/heavy pair: the
//! equilibrium model, the integer temperature bounds and the x-y curve over
//! them. Changing the pair means building a new system.

use crate::antoine::CoefficientSource;
use crate::error::{ThermoError, ThermoResult};
use crate::model::{Component, EquilibriumModel, RaoultModel};
use mc_core::{BisectionConfig, RootOutcome, bisect, first_decrease};
use serde::{Deserialize, Serialize};

/// Padding [K] applied around the pure-component boiling points.
pub const BOUNDARY_MARGIN_K: i32 = 2;

/// Light/heavy chemical names, light being the lower boiler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChemicalPair {
    pub light: String,
    pub heavy: String,
}

impl ChemicalPair {
    pub fn new(light: impl Into<String>, heavy: impl Into<String>) -> Self {
        Self {
            light: light.into(),
            heavy: heavy.into(),
        }
    }

    pub fn swapped(&self) -> Self {
        Self {
            light: self.heavy.clone(),
            heavy: self.light.clone(),
        }
    }
}

/// Integer temperature window [K] the curve is sampled over, `[low, high)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemperatureBounds {
    pub low: i32,
    pub high: i32,
}

impl TemperatureBounds {
    pub fn is_ordered(&self) -> bool {
        self.low < self.high
    }

    /// Number of integer sample temperatures in `[low, high)`.
    pub fn span(&self) -> usize {
        usize::try_from(self.high - self.low).unwrap_or(0)
    }
}

/// Equilibrium curve in ascending-x order (index 0 is the hottest sample).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquilibriumCurve {
    temperatures: Vec<f64>,
    x: Vec<f64>,
    y: Vec<f64>,
}

impl EquilibriumCurve {
    /// Curve from precomputed samples, e.g. tabulated experimental data.
    pub fn from_points(temperatures: Vec<f64>, x: Vec<f64>, y: Vec<f64>) -> ThermoResult<Self> {
        if x.len() != y.len() || temperatures.len() != x.len() {
            return Err(ThermoError::InvalidArg {
                what: "curve columns must have equal length",
            });
        }
        if x.len() < 2 {
            return Err(ThermoError::InvalidArg {
                what: "curve needs at least two points",
            });
        }
        let curve = Self { temperatures, x, y };
        curve.check_monotonic()?;
        Ok(curve)
    }

    /// Liquid mole fractions of the light component.
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    /// Vapor mole fractions of the light component.
    pub fn y(&self) -> &[f64] {
        &self.y
    }

    /// Sample temperature [K] of each point.
    pub fn temperatures(&self) -> &[f64] {
        &self.temperatures
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }

    /// Fails unless both `x` and `y` are non-decreasing.
    ///
    /// Stage stepping inverts y -> x by interpolation, which is only valid on
    /// a curve ordered this way.
    pub fn check_monotonic(&self) -> ThermoResult<()> {
        const SLACK: f64 = 1e-12;
        if let Some(index) = first_decrease(&self.x, SLACK).or(first_decrease(&self.y, SLACK)) {
            return Err(ThermoError::NonMonotonicCurve { index });
        }
        Ok(())
    }
}

/// One row of a temperature-composition diagram.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TxyPoint {
    pub t_k: f64,
    pub x: f64,
    pub y: f64,
}

/// `[floor(Tb(light)), ceil(Tb(heavy))]` for the model's current labels.
pub fn temperature_boundaries(model: &dyn EquilibriumModel) -> TemperatureBounds {
    TemperatureBounds {
        low: model.boiling_point(Component::Light).floor() as i32,
        high: model.boiling_point(Component::Heavy).ceil() as i32,
    }
}

/// Sample the model at each integer temperature in `[low, high)`.
pub fn build_curve(model: &dyn EquilibriumModel, bounds: TemperatureBounds) -> EquilibriumCurve {
    let n = bounds.span();
    let mut temperatures = Vec::with_capacity(n);
    let mut x = Vec::with_capacity(n);
    let mut y = Vec::with_capacity(n);

    for t in bounds.low..bounds.high {
        let t_k = f64::from(t);
        let xi = model.solve_equilibrium_fraction(t_k).value;
        temperatures.push(t_k);
        x.push(xi);
        y.push(model.vapor_fraction(xi, t_k));
    }

    temperatures.reverse();
    x.reverse();
    y.reverse();

    EquilibriumCurve { temperatures, x, y }
}

/// Bubble temperature [K] at which the equilibrium liquid fraction is `x_desired`.
///
/// Bisects over `bounds`; the search fails when the window holds no root.
pub fn temperature_for_fraction(
    model: &dyn EquilibriumModel,
    bounds: TemperatureBounds,
    x_desired: f64,
    config: &BisectionConfig,
) -> ThermoResult<RootOutcome> {
    let outcome = bisect(
        |t_k| model.solve_equilibrium_fraction(t_k).value - x_desired,
        f64::from(bounds.low),
        f64::from(bounds.high),
        config,
    )?;

    if !outcome.converged {
        tracing::warn!(
            x_desired,
            t_k = outcome.value,
            "bubble temperature search hit its iteration limit"
        );
    }
    Ok(outcome)
}

/// Equilibrium data for one chemical pair.
#[derive(Debug, Clone)]
pub struct BinarySystem {
    pair: ChemicalPair,
    model: RaoultModel,
    bounds: TemperatureBounds,
    curve: EquilibriumCurve,
}

impl BinarySystem {
    /// Look up both chemicals and derive bounds and curve.
    ///
    /// A pair supplied in the wrong boiling order is relabelled rather than
    /// rejected.
    pub fn new(pair: ChemicalPair, source: &dyn CoefficientSource) -> ThermoResult<Self> {
        if pair.light.trim() == pair.heavy.trim() {
            return Err(ThermoError::InvalidArg {
                what: "light and heavy chemicals must differ",
            });
        }
        let model = RaoultModel::new(source.require(&pair.light)?, source.require(&pair.heavy)?);
        Self::from_model(pair, model)
    }

    /// Build from an already-resolved model whose labels follow `pair`.
    pub fn from_model(pair: ChemicalPair, model: RaoultModel) -> ThermoResult<Self> {
        let placeholder = EquilibriumCurve {
            temperatures: Vec::new(),
            x: Vec::new(),
            y: Vec::new(),
        };
        let mut system = Self {
            bounds: temperature_boundaries(&model),
            pair,
            model,
            curve: placeholder,
        };
        system.correct_ordering();
        system.extend_boundaries();

        system.curve = build_curve(&system.model, system.bounds);
        system.curve.check_monotonic()?;

        tracing::debug!(
            light = %system.pair.light,
            heavy = %system.pair.heavy,
            low = system.bounds.low,
            high = system.bounds.high,
            points = system.curve.len(),
            "built equilibrium curve"
        );
        Ok(system)
    }

    /// Swap labels when the "light" chemical turns out to boil higher.
    ///
    /// Compares unrounded boiling points; close boilers can share a rounded
    /// bound in either order. The swapped bounds already carry the margin
    /// shift, on top of the unconditional [`Self::extend_boundaries`] that
    /// follows.
    fn correct_ordering(&mut self) {
        let reversed =
            self.model.boiling_point(Component::Light) > self.model.boiling_point(Component::Heavy);
        if reversed {
            tracing::debug!(
                light = %self.pair.light,
                heavy = %self.pair.heavy,
                "chemicals supplied in reverse boiling order; swapping"
            );
            self.pair = self.pair.swapped();
            self.model = self.model.swapped();
            self.bounds = TemperatureBounds {
                low: self.bounds.high - BOUNDARY_MARGIN_K,
                high: self.bounds.low + BOUNDARY_MARGIN_K,
            };
        }
    }

    fn extend_boundaries(&mut self) {
        self.bounds.low -= BOUNDARY_MARGIN_K;
        self.bounds.high += BOUNDARY_MARGIN_K;
    }

    pub fn pair(&self) -> &ChemicalPair {
        &self.pair
    }

    pub fn model(&self) -> &RaoultModel {
        &self.model
    }

    pub fn bounds(&self) -> TemperatureBounds {
        self.bounds
    }

    pub fn curve(&self) -> &EquilibriumCurve {
        &self.curve
    }

    pub fn boiling_point(&self, which: Component) -> f64 {
        self.model.boiling_point(which)
    }

    /// Bubble temperature [K] for liquid fraction `x_desired`, searched over the bounds.
    pub fn temperature_for_fraction(&self, x_desired: f64) -> ThermoResult<RootOutcome> {
        temperature_for_fraction(
            &self.model,
            self.bounds,
            x_desired,
            &BisectionConfig::default(),
        )
    }

    /// Temperature-composition rows in ascending temperature order.
    pub fn txy(&self) -> Vec<TxyPoint> {
        let c = &self.curve;
        (0..c.len())
            .rev()
            .map(|i| TxyPoint {
                t_k: c.temperatures[i],
                x: c.x[i],
                y: c.y[i],
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::antoine::AntoineTable;

    fn system(light: &str, heavy: &str) -> BinarySystem {
        BinarySystem::new(ChemicalPair::new(light, heavy), &AntoineTable::builtin()).unwrap()
    }

    #[test]
    fn bounds_bracket_both_boiling_points_with_margin() {
        let sys = system("benzene", "toluene");
        let b = sys.bounds();
        let tb_l = sys.boiling_point(Component::Light);
        let tb_h = sys.boiling_point(Component::Heavy);

        assert_eq!(b.low, tb_l.floor() as i32 - BOUNDARY_MARGIN_K);
        assert_eq!(b.high, tb_h.ceil() as i32 + BOUNDARY_MARGIN_K);
        assert_eq!(sys.curve().len(), b.span());
    }

    #[test]
    fn curve_runs_from_heavy_end_to_light_end() {
        let sys = system("benzene", "toluene");
        let c = sys.curve();
        assert!(c.x()[0] < 0.05);
        assert!(*c.x().last().unwrap() > 0.95);
        assert!(c.temperatures()[0] > *c.temperatures().last().unwrap());
    }

    #[test]
    fn reversed_pair_is_relabelled() {
        let sys = system("n-nonane", "ethanol");
        assert_eq!(sys.pair().light, "ethanol");
        assert_eq!(sys.pair().heavy, "n-nonane");
        assert!(sys.bounds().is_ordered());
        assert!(sys.curve().check_monotonic().is_ok());
    }

    #[test]
    fn reversed_close_boilers_are_relabelled() {
        // 1-propanol boils about 1.2 K below n-heptane; both round to 371 K.
        let forward = system("1-propanol", "n-heptane");
        let reversed = system("n-heptane", "1-propanol");

        assert_eq!(reversed.pair(), forward.pair());
        assert_eq!(forward.bounds(), TemperatureBounds { low: 368, high: 374 });
        assert_eq!(reversed.bounds(), TemperatureBounds { low: 367, high: 375 });
        assert!(reversed.curve().check_monotonic().is_ok());
    }

    #[test]
    fn swapped_bounds_shift_before_extension() {
        let sys = system("n-nonane", "ethanol");
        let tb_ethanol = sys.boiling_point(Component::Light);
        let tb_nonane = sys.boiling_point(Component::Heavy);

        assert_eq!(
            sys.bounds(),
            TemperatureBounds {
                low: tb_ethanol.ceil() as i32 - 2 * BOUNDARY_MARGIN_K,
                high: tb_nonane.floor() as i32 + 2 * BOUNDARY_MARGIN_K,
            }
        );
    }

    #[test]
    fn identical_chemicals_are_rejected() {
        let err = BinarySystem::new(ChemicalPair::new("water", "water"), &AntoineTable::builtin())
            .unwrap_err();
        assert!(matches!(err, ThermoError::InvalidArg { .. }));
    }

    #[test]
    fn unknown_chemical_is_reported() {
        let err = BinarySystem::new(ChemicalPair::new("water", "kryptonite"), &AntoineTable::builtin())
            .unwrap_err();
        assert!(matches!(err, ThermoError::UnknownChemical { ref name } if name == "kryptonite"));
    }

    #[test]
    fn bubble_temperature_inverts_the_solver() {
        let sys = system("benzene", "toluene");
        let t = sys.temperature_for_fraction(0.5).unwrap().value;
        let x = sys.model().solve_equilibrium_fraction(t).value;
        assert!((x - 0.5).abs() < 1e-4, "x({t}) = {x}");
        assert!(t > sys.boiling_point(Component::Light));
        assert!(t < sys.boiling_point(Component::Heavy));
    }

    #[test]
    fn bubble_temperature_outside_window_fails() {
        let sys = system("benzene", "toluene");
        let err = sys.temperature_for_fraction(5.0).unwrap_err();
        assert!(matches!(err, ThermoError::Numeric(mc_core::McError::NoBracket { .. })));
    }

    #[test]
    fn txy_is_ascending_in_temperature() {
        let sys = system("methanol", "water");
        let rows = sys.txy();
        assert_eq!(rows.len(), sys.curve().len());
        assert!(rows.windows(2).all(|w| w[0].t_k < w[1].t_k));
        assert!(rows.iter().all(|r| r.y >= r.x - 1e-12 || r.x > 1.0 || r.x < 0.0));
    }

    #[test]
    fn non_monotonic_curve_is_detected() {
        let curve = EquilibriumCurve {
            temperatures: vec![3.0, 2.0, 1.0],
            x: vec![0.0, 0.5, 1.0],
            y: vec![0.0, 0.9, 0.8],
        };
        let err = curve.check_monotonic().unwrap_err();
        assert!(matches!(err, ThermoError::NonMonotonicCurve { index: 2 }));
    }
}
