//! Interactive design session.
//!
//! A [`DistillationSession`] owns the coefficient source, the current tower
//! spec and everything derived from them. Every accepted change rebuilds the
//! derived state in full; a rejected change leaves the session exactly as it
//! was.

use mc_column::{
    EffectiveCurve, OperatingLine, RefluxSweep, StageCountResult, SweepPoint, TowerSpec,
    count_stages, effective_curve, parse_field, sweep_reflux,
};
use mc_core::RootOutcome;
use mc_thermo::{
    AntoineTable, BinarySystem, ChemicalPair, CoefficientSource, EquilibriumCurve,
    TemperatureBounds, TxyPoint,
};

use crate::error::AppResult;

pub struct DistillationSession {
    source: Box<dyn CoefficientSource>,
    spec: TowerSpec,
    system: BinarySystem,
    line: OperatingLine,
    effective: Option<EffectiveCurve>,
    last_result: StageCountResult,
}

impl std::fmt::Debug for DistillationSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DistillationSession")
            .field("pair", self.system.pair())
            .field("spec", &self.spec)
            .field("stages", &self.last_result.steps)
            .finish()
    }
}

impl DistillationSession {
    pub fn new(
        source: Box<dyn CoefficientSource>,
        pair: ChemicalPair,
        spec: TowerSpec,
    ) -> AppResult<Self> {
        let system = BinarySystem::new(pair, source.as_ref())?;
        let line = OperatingLine::from_spec(&spec);
        let effective = effective_curve(&spec, &line, system.curve());
        let last_result = count_stages(system.curve(), &line, effective.as_ref());

        Ok(Self {
            source,
            spec,
            system,
            line,
            effective,
            last_result,
        })
    }

    /// Session backed by the built-in coefficient table.
    pub fn with_builtin(pair: ChemicalPair, spec: TowerSpec) -> AppResult<Self> {
        Self::new(Box::new(AntoineTable::builtin()), pair, spec)
    }

    // --- configuration -------------------------------------------------

    /// Replace both chemicals. Reversed boiling order is corrected silently.
    pub fn set_chemical_pair(
        &mut self,
        light: impl Into<String>,
        heavy: impl Into<String>,
    ) -> AppResult<()> {
        let system = BinarySystem::new(ChemicalPair::new(light, heavy), self.source.as_ref())?;
        self.system = system;
        self.rebuild();
        Ok(())
    }

    pub fn set_light(&mut self, light: impl Into<String>) -> AppResult<()> {
        let heavy = self.system.pair().heavy.clone();
        self.set_chemical_pair(light, heavy)
    }

    pub fn set_heavy(&mut self, heavy: impl Into<String>) -> AppResult<()> {
        let light = self.system.pair().light.clone();
        self.set_chemical_pair(light, heavy)
    }

    pub fn set_tower_spec(&mut self, spec: TowerSpec) {
        self.spec = spec;
        self.rebuild();
    }

    pub fn set_reflux_ratio(&mut self, value: f64) -> AppResult<()> {
        let spec = self.spec.with_reflux_ratio(value)?;
        self.set_tower_spec(spec);
        Ok(())
    }

    pub fn set_bottoms_fraction(&mut self, value: f64) -> AppResult<()> {
        let spec = self.spec.with_bottoms(value)?;
        self.set_tower_spec(spec);
        Ok(())
    }

    pub fn set_feed_fraction(&mut self, value: f64) -> AppResult<()> {
        let spec = self.spec.with_feed(value)?;
        self.set_tower_spec(spec);
        Ok(())
    }

    pub fn set_distillate_fraction(&mut self, value: f64) -> AppResult<()> {
        let spec = self.spec.with_distillate(value)?;
        self.set_tower_spec(spec);
        Ok(())
    }

    pub fn set_murphree_efficiency(&mut self, value: f64) -> AppResult<()> {
        let spec = self.spec.with_murphree(value)?;
        self.set_tower_spec(spec);
        Ok(())
    }

    pub fn set_reflux_ratio_str(&mut self, text: &str) -> AppResult<()> {
        self.set_reflux_ratio(parse_field("reflux_ratio", text)?)
    }

    pub fn set_bottoms_fraction_str(&mut self, text: &str) -> AppResult<()> {
        self.set_bottoms_fraction(parse_field("bottoms", text)?)
    }

    pub fn set_feed_fraction_str(&mut self, text: &str) -> AppResult<()> {
        self.set_feed_fraction(parse_field("feed", text)?)
    }

    pub fn set_distillate_fraction_str(&mut self, text: &str) -> AppResult<()> {
        self.set_distillate_fraction(parse_field("distillate", text)?)
    }

    pub fn set_murphree_efficiency_str(&mut self, text: &str) -> AppResult<()> {
        self.set_murphree_efficiency(parse_field("murphree", text)?)
    }

    fn rebuild(&mut self) {
        self.line = OperatingLine::from_spec(&self.spec);
        self.effective = effective_curve(&self.spec, &self.line, self.system.curve());
        self.last_result = count_stages(self.system.curve(), &self.line, self.effective.as_ref());

        tracing::debug!(
            light = %self.system.pair().light,
            heavy = %self.system.pair().heavy,
            reflux_ratio = self.spec.reflux_ratio(),
            stages = %self.last_result.steps,
            feed_step = self.last_result.feed_step,
            "session rebuilt"
        );
    }

    // --- queries -------------------------------------------------------

    pub fn tower_spec(&self) -> TowerSpec {
        self.spec
    }

    pub fn system(&self) -> &BinarySystem {
        &self.system
    }

    pub fn equilibrium_curve(&self) -> &EquilibriumCurve {
        self.system.curve()
    }

    pub fn operating_line(&self) -> &OperatingLine {
        &self.line
    }

    /// `None` while stages are ideal.
    pub fn effective_curve(&self) -> Option<&EffectiveCurve> {
        self.effective.as_ref()
    }

    /// Step stages afresh against the current configuration.
    pub fn count_stages(&self) -> StageCountResult {
        count_stages(self.system.curve(), &self.line, self.effective.as_ref())
    }

    /// Stage count computed by the last accepted configuration change.
    pub fn last_result(&self) -> &StageCountResult {
        &self.last_result
    }

    /// Current pair, after any boiling-order correction.
    pub fn current_chemicals(&self) -> &ChemicalPair {
        self.system.pair()
    }

    pub fn available_chemicals(&self) -> Vec<&str> {
        self.source.names()
    }

    pub fn temperature_bounds(&self) -> TemperatureBounds {
        self.system.bounds()
    }

    pub fn txy(&self) -> Vec<TxyPoint> {
        self.system.txy()
    }

    /// Bubble temperature [K] of a liquid with light fraction `x`.
    pub fn bubble_temperature(&self, x: f64) -> AppResult<RootOutcome> {
        Ok(self.system.temperature_for_fraction(x)?)
    }

    /// Stage counts over `sweep`, holding everything but the reflux ratio.
    pub fn sweep(&self, sweep: &RefluxSweep) -> Vec<SweepPoint> {
        sweep_reflux(self.system.curve(), &self.spec, &sweep.ratios())
    }
}
