//! McCabe-Thiele stage stepping.
//!
//! Starting at `(xD, xD)`, each stage moves horizontally to the equilibrium
//! curve and then vertically to the operating line, until the liquid
//! composition drops to the bottoms specification.

use crate::efficiency::EffectiveCurve;
use crate::operating::{OperatingLine, Section};
use mc_core::interp;
use mc_thermo::EquilibriumCurve;
use serde::Serialize;
use std::fmt;

/// Step ceiling. Reaching it means the staircase never got to `xB`.
pub const MAX_PERMITTED_STEPS: usize = 51;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "status", content = "stages")]
pub enum StageCount {
    Converged(usize),
    /// Pinched or infeasible design.
    NotConverged,
}

impl StageCount {
    pub fn stages(&self) -> Option<usize> {
        match self {
            Self::Converged(n) => Some(*n),
            Self::NotConverged => None,
        }
    }

    pub fn is_converged(&self) -> bool {
        matches!(self, Self::Converged(_))
    }
}

impl fmt::Display for StageCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Converged(n) => write!(f, "{n}"),
            Self::NotConverged => write!(f, "N/A"),
        }
    }
}

/// One staircase step: horizontal `from -> corner`, vertical `corner -> to`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StageStep {
    pub from: (f64, f64),
    pub corner: (f64, f64),
    pub to: (f64, f64),
    /// `None` once the step lands at or below the bottoms composition.
    pub section: Option<Section>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageCountResult {
    pub steps: StageCount,
    /// 1-based index of the first stripping-section step.
    pub feed_step: usize,
    pub trace: Vec<StageStep>,
}

/// Step off stages between `xD` and `xB`.
///
/// When `effective` is given, the horizontal move targets the efficiency-
/// corrected curve instead of the raw equilibrium curve. It must be sampled
/// on the same grid as `curve`.
///
/// A curve with fewer than two points cannot be inverted and yields
/// [`StageCount::NotConverged`] with an empty trace.
pub fn count_stages(
    curve: &EquilibriumCurve,
    line: &OperatingLine,
    effective: Option<&EffectiveCurve>,
) -> StageCountResult {
    if let Some(eff) = effective {
        debug_assert_eq!(eff.len(), curve.len(), "effective curve sampled on another grid");
    }
    if curve.len() < 2 {
        tracing::warn!(points = curve.len(), "equilibrium curve too short to step");
        return StageCountResult {
            steps: StageCount::NotConverged,
            feed_step: 1,
            trace: Vec::new(),
        };
    }

    let x_bottoms = line.bottoms();
    let mut curr_x = line.distillate();
    let mut curr_y = line.distillate();
    let mut steps = 0usize;
    let mut feed_step = None;
    let mut trace = Vec::new();

    while x_bottoms < curr_x && steps < MAX_PERMITTED_STEPS {
        steps += 1;

        // Clamped inversion; past the length check both tables are non-empty
        // with equal-length columns, so `interp` always yields a value.
        let Some(mut x_eq) = interp(curr_y, curve.y(), curve.x()) else {
            break;
        };
        if let Some(eff) = effective {
            if x_bottoms < x_eq {
                let Some(x_eff) = interp(curr_y, eff.y(), eff.x()) else {
                    break;
                };
                x_eq = x_eff;
            }
        }

        let (y_op, section) = if x_bottoms < x_eq {
            let (y, section) = line.evaluate(x_eq);
            (y, Some(section))
        } else {
            (x_eq, None)
        };

        if feed_step.is_none() && section == Some(Section::Stripping) {
            feed_step = Some(steps);
        }

        trace.push(StageStep {
            from: (curr_x, curr_y),
            corner: (x_eq, curr_y),
            to: (x_eq, y_op),
            section,
        });

        curr_x = x_eq;
        curr_y = y_op;
    }

    let steps = if steps == MAX_PERMITTED_STEPS {
        StageCount::NotConverged
    } else {
        StageCount::Converged(steps)
    };
    let feed_step = feed_step.unwrap_or(1);

    tracing::debug!(%steps, feed_step, "stage stepping finished");

    StageCountResult {
        steps,
        feed_step,
        trace,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::efficiency::effective_curve;
    use crate::tower::TowerSpec;
    use mc_thermo::TemperatureBounds;

    fn alpha_curve(alpha: f64) -> EquilibriumCurve {
        alpha_curve_on(alpha, 200)
    }

    fn alpha_curve_on(alpha: f64, intervals: usize) -> EquilibriumCurve {
        let x: Vec<f64> = (0..=intervals).map(|i| i as f64 / intervals as f64).collect();
        let y: Vec<f64> = x
            .iter()
            .map(|&x| alpha * x / (1.0 + (alpha - 1.0) * x))
            .collect();
        let t: Vec<f64> = (0..x.len()).map(|i| 400.0 - i as f64 * 0.1).collect();
        EquilibriumCurve::from_points(t, x, y).unwrap()
    }

    #[test]
    fn easy_separation_converges_with_feed_inside_column() {
        let curve = alpha_curve(5.0);
        let spec = TowerSpec::ideal(3.0, 0.05, 0.5, 0.95).unwrap();
        let line = OperatingLine::from_spec(&spec);
        let result = count_stages(&curve, &line, None);

        let n = result.steps.stages().unwrap();
        assert!(n >= 3 && n < 15, "n = {n}");
        assert!(result.feed_step > 1 && result.feed_step <= n);
        assert_eq!(result.trace.len(), n);
    }

    #[test]
    fn trace_is_a_connected_staircase() {
        let curve = alpha_curve(4.0);
        let spec = TowerSpec::ideal(2.0, 0.05, 0.4, 0.9).unwrap();
        let line = OperatingLine::from_spec(&spec);
        let result = count_stages(&curve, &line, None);

        let first = result.trace[0];
        assert_eq!(first.from, (0.9, 0.9));
        for pair in result.trace.windows(2) {
            assert_eq!(pair[0].to, pair[1].from);
        }
        for step in &result.trace {
            assert_eq!(step.from.1, step.corner.1);
            assert_eq!(step.corner.0, step.to.0);
        }
        let last = result.trace.last().unwrap();
        assert!(last.to.0 <= 0.05);
        assert_eq!(last.section, None);
    }

    #[test]
    fn pinched_design_reports_not_converged() {
        // Rectifying line crosses the curve above the feed.
        let curve = alpha_curve(1.5);
        let spec = TowerSpec::ideal(0.1, 0.1, 0.4, 0.95).unwrap();
        let line = OperatingLine::from_spec(&spec);
        let result = count_stages(&curve, &line, None);

        assert_eq!(result.steps, StageCount::NotConverged);
        assert_eq!(result.trace.len(), MAX_PERMITTED_STEPS);
        assert_eq!(result.steps.to_string(), "N/A");
        assert_eq!(result.feed_step, 1);
    }

    #[test]
    fn lower_efficiency_needs_more_stages() {
        let curve = alpha_curve(3.0);
        let ideal = TowerSpec::ideal(3.0, 0.05, 0.5, 0.95).unwrap();
        let real = ideal.with_murphree(0.6).unwrap();
        let line = OperatingLine::from_spec(&ideal);

        let n_ideal = count_stages(&curve, &line, None).steps.stages().unwrap();
        let eff = effective_curve(&real, &line, &curve).unwrap();
        let n_real = count_stages(&curve, &line, Some(&eff)).steps.stages().unwrap();
        assert!(n_real > n_ideal, "{n_real} <= {n_ideal}");
    }

    #[test]
    fn empty_curve_is_not_converged() {
        let water = mc_thermo::AntoineCoefficients::new(18.3036, 3816.44, -46.13);
        let model = mc_thermo::RaoultModel::new(water, water);
        let curve = mc_thermo::build_curve(&model, TemperatureBounds { low: 350, high: 350 });
        assert!(curve.is_empty());

        let spec = TowerSpec::ideal(3.0, 0.05, 0.5, 0.95).unwrap();
        let line = OperatingLine::from_spec(&spec);
        let result = count_stages(&curve, &line, None);

        assert_eq!(result.steps, StageCount::NotConverged);
        assert_eq!(result.feed_step, 1);
        assert!(result.trace.is_empty());
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "another grid")]
    fn effective_curve_on_another_grid_panics() {
        let spec = TowerSpec::new(3.0, 0.05, 0.5, 0.95, 0.7).unwrap();
        let line = OperatingLine::from_spec(&spec);
        let coarse = effective_curve(&spec, &line, &alpha_curve_on(3.0, 50)).unwrap();
        count_stages(&alpha_curve(3.0), &line, Some(&coarse));
    }

    #[test]
    fn display_converged_count() {
        assert_eq!(StageCount::Converged(7).to_string(), "7");
        assert!(StageCount::Converged(7).is_converged());
        assert_eq!(StageCount::NotConverged.stages(), None);
    }
}
