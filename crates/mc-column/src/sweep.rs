//! Reflux-ratio sweeps.
//!
//! Each point rebuilds the operating line (and effective curve, if any) for a
//! new reflux ratio and steps stages against a shared equilibrium curve. The
//! points are independent, so they are evaluated in parallel.

use crate::error::{ColumnError, ColumnResult};
use crate::stepping::StageCountResult;
use crate::tower::TowerSpec;
use mc_thermo::EquilibriumCurve;
use rayon::prelude::*;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Spacing {
    Linear,
    Logarithmic,
}

impl fmt::Display for Spacing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linear => write!(f, "linear"),
            Self::Logarithmic => write!(f, "logarithmic"),
        }
    }
}

/// Range of reflux ratios to evaluate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RefluxSweep {
    pub start: f64,
    pub end: f64,
    pub points: usize,
    pub spacing: Spacing,
}

impl RefluxSweep {
    pub fn new(start: f64, end: f64, points: usize, spacing: Spacing) -> ColumnResult<Self> {
        for (field, value) in [("sweep start", start), ("sweep end", end)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ColumnError::InvalidSpec {
                    field,
                    value,
                    reason: "must be positive and finite",
                });
            }
        }
        if points < 2 {
            return Err(ColumnError::InvalidSpec {
                field: "sweep points",
                value: points as f64,
                reason: "need at least 2 points",
            });
        }
        Ok(Self {
            start,
            end,
            points,
            spacing,
        })
    }

    /// Reflux ratios from `start` to `end` inclusive.
    pub fn ratios(&self) -> Vec<f64> {
        let n = self.points;
        let last = (n - 1) as f64;
        let mut values: Vec<f64> = match self.spacing {
            Spacing::Linear => {
                let delta = (self.end - self.start) / last;
                (0..n).map(|i| self.start + i as f64 * delta).collect()
            }
            Spacing::Logarithmic => {
                let (lo, hi) = (self.start.ln(), self.end.ln());
                let delta = (hi - lo) / last;
                (0..n).map(|i| (lo + i as f64 * delta).exp()).collect()
            }
        };
        // Exact endpoint
        values[n - 1] = self.end;
        values
    }
}

impl fmt::Display for RefluxSweep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "R from {} to {} ({} points, {})",
            self.start, self.end, self.points, self.spacing
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepPoint {
    pub reflux_ratio: f64,
    pub result: StageCountResult,
}

/// Stage counts for `base` at each reflux ratio in `ratios`.
///
/// Ratios the tower spec rejects are skipped. Output keeps input order.
pub fn sweep_reflux(
    curve: &EquilibriumCurve,
    base: &TowerSpec,
    ratios: &[f64],
) -> Vec<SweepPoint> {
    ratios
        .par_iter()
        .filter_map(|&r| match base.with_reflux_ratio(r) {
            Ok(spec) => Some(SweepPoint {
                reflux_ratio: r,
                result: crate::design(curve, &spec),
            }),
            Err(e) => {
                tracing::warn!(reflux_ratio = r, error = %e, "skipping sweep point");
                None
            }
        })
        .collect()
}
