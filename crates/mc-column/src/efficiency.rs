//! Murphree stage efficiency applied to the equilibrium curve.

use crate::operating::OperatingLine;
use crate::tower::TowerSpec;
use mc_thermo::EquilibriumCurve;
use serde::Serialize;

/// Equilibrium curve pulled toward the operating line by the stage efficiency.
///
/// Shares the x grid of the curve it was derived from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EffectiveCurve {
    x: Vec<f64>,
    y: Vec<f64>,
}

impl EffectiveCurve {
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn y(&self) -> &[f64] {
        &self.y
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
}

/// Build the effective curve, or `None` when stages are ideal.
///
/// Each point becomes `murphree * (y - y_op) + y_op`, never below the
/// diagonal.
pub fn effective_curve(
    spec: &TowerSpec,
    line: &OperatingLine,
    curve: &EquilibriumCurve,
) -> Option<EffectiveCurve> {
    if spec.is_ideal() {
        return None;
    }
    let murphree = spec.murphree();

    let y = curve
        .points()
        .map(|(x, y)| {
            let y_op = line.value_for_efficiency(x);
            (murphree * (y - y_op) + y_op).max(x)
        })
        .collect();

    Some(EffectiveCurve {
        x: curve.x().to_vec(),
        y,
    })
}
