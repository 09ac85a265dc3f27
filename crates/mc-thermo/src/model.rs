//! Binary vapor-liquid equilibrium models.

use crate::antoine::AntoineCoefficients;
use mc_core::units::constants::ATMOSPHERE_MMHG;
use mc_core::{NewtonConfig, RootOutcome, newton_solve};
use serde::{Deserialize, Serialize};

/// Which member of the binary pair a query refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Component {
    Light,
    Heavy,
}

/// Trait for binary equilibrium models at fixed column pressure.
///
/// The curve builder and the bubble-temperature search only talk to this
/// trait, so an activity-coefficient model can replace [`RaoultModel`]
/// without touching them.
pub trait EquilibriumModel {
    /// Get the model name (for debugging/logging).
    fn name(&self) -> &str;

    /// Pure-component saturation pressure [mmHg] at `t_k`.
    fn saturation_pressure(&self, which: Component, t_k: f64) -> f64;

    /// Normal boiling point [K] of a pure component.
    fn boiling_point(&self, which: Component) -> f64;

    /// Liquid mole fraction of the light component in equilibrium at `t_k`.
    fn solve_equilibrium_fraction(&self, t_k: f64) -> RootOutcome;

    /// Vapor mole fraction of the light component over liquid `x` at `t_k`.
    fn vapor_fraction(&self, x: f64, t_k: f64) -> f64;
}

/// Ideal solution (Raoult's Law) with Antoine pure-component pressures.
#[derive(Debug, Clone, Copy)]
pub struct RaoultModel {
    light: AntoineCoefficients,
    heavy: AntoineCoefficients,
    pressure_mmhg: f64,
    newton: NewtonConfig,
}

impl RaoultModel {
    /// Model at one standard atmosphere.
    pub fn new(light: AntoineCoefficients, heavy: AntoineCoefficients) -> Self {
        Self {
            light,
            heavy,
            pressure_mmhg: ATMOSPHERE_MMHG,
            newton: NewtonConfig::default(),
        }
    }

    pub fn with_newton(mut self, newton: NewtonConfig) -> Self {
        self.newton = newton;
        self
    }

    /// Same model with the light and heavy labels exchanged.
    pub fn swapped(self) -> Self {
        Self {
            light: self.heavy,
            heavy: self.light,
            ..self
        }
    }

    pub fn coefficients(&self, which: Component) -> AntoineCoefficients {
        match which {
            Component::Light => self.light,
            Component::Heavy => self.heavy,
        }
    }

    pub fn pressure_mmhg(&self) -> f64 {
        self.pressure_mmhg
    }
}

impl EquilibriumModel for RaoultModel {
    fn name(&self) -> &str {
        "raoult"
    }

    fn saturation_pressure(&self, which: Component, t_k: f64) -> f64 {
        self.coefficients(which).saturation_pressure(t_k)
    }

    fn boiling_point(&self, which: Component) -> f64 {
        self.coefficients(which)
            .saturation_temperature(self.pressure_mmhg)
    }

    fn solve_equilibrium_fraction(&self, t_k: f64) -> RootOutcome {
        let light_psat = self.light.saturation_pressure(t_k);
        let heavy_psat = self.heavy.saturation_pressure(t_k);
        let p = self.pressure_mmhg;

        // Linear in x, so the derivative is constant.
        let outcome = newton_solve(
            0.5,
            |x| light_psat * x + heavy_psat * (1.0 - x) - p,
            |_| light_psat - heavy_psat,
            &self.newton,
        );

        if !outcome.converged {
            tracing::warn!(
                t_k,
                x = outcome.value,
                iterations = outcome.iterations,
                "equilibrium fraction did not converge; using last iterate"
            );
        }
        outcome
    }

    fn vapor_fraction(&self, x: f64, t_k: f64) -> f64 {
        x * self.light.saturation_pressure(t_k) / self.pressure_mmhg
    }
}
