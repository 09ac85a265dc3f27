//! Three-point bisection over a fixed bracket.
//!
//! The bracket is held as `[lo, mid, hi]`. Each pass evaluates the residual at
//! all three points, keeps the half whose endpoints change sign (left half
//! first) and re-centres the midpoint inside it.

use crate::error::{McError, McResult};
use crate::numeric::{Real, RootOutcome};

/// Bisection configuration.
#[derive(Clone, Copy, Debug)]
pub struct BisectionConfig {
    /// Maximum iterations
    pub max_iterations: usize,
    /// Convergence threshold on |f(lo) - f(hi)| of the evaluated bracket
    pub residual_tol: Real,
}

impl Default for BisectionConfig {
    fn default() -> Self {
        Self {
            max_iterations: 30,
            residual_tol: 1e-8,
        }
    }
}

/// Narrow `[lo, hi]` around a sign change of `f` and return the final midpoint.
///
/// Fails with [`McError::NoBracket`] when neither half of the current bracket
/// shows a sign change, which means the caller's interval holds no root.
pub fn bisect<F>(f: F, lo: Real, hi: Real, config: &BisectionConfig) -> McResult<RootOutcome>
where
    F: Fn(Real) -> Real,
{
    if !lo.is_finite() || !hi.is_finite() {
        return Err(McError::InvalidArg {
            what: "bisection bracket must be finite",
        });
    }

    let mut bracket = [lo, 0.5 * (lo + hi), hi];

    for iter in 1..=config.max_iterations {
        let fv = bracket.map(&f);

        bracket = if fv[0] * fv[1] < 0.0 {
            [bracket[0], 0.5 * (bracket[0] + bracket[1]), bracket[1]]
        } else if fv[1] * fv[2] < 0.0 {
            [bracket[1], 0.5 * (bracket[1] + bracket[2]), bracket[2]]
        } else {
            return Err(McError::NoBracket {
                lo: bracket[0],
                hi: bracket[2],
            });
        };

        if (fv[2] - fv[0]).abs() < config.residual_tol {
            return Ok(RootOutcome {
                value: bracket[1],
                iterations: iter,
                converged: true,
            });
        }
    }

    Ok(RootOutcome {
        value: bracket[1],
        iterations: config.max_iterations,
        converged: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_root_of_decreasing_function() {
        let config = BisectionConfig {
            max_iterations: 80,
            residual_tol: 1e-10,
        };
        let result = bisect(|t| 400.0 - t, 350.0, 420.0, &config).unwrap();

        assert!(result.converged);
        assert!((result.value - 400.0).abs() < 1e-6);
    }

    #[test]
    fn default_budget_stops_at_thirty() {
        let result = bisect(|t| 100.0 * (2.0 - t), 0.0, 3.0, &BisectionConfig::default()).unwrap();

        assert!(!result.converged);
        assert_eq!(result.iterations, 30);
        assert!((result.value - 2.0).abs() < 1e-6);
    }

    #[test]
    fn missing_sign_change_is_an_error() {
        let err = bisect(|t| t * t + 1.0, -1.0, 1.0, &BisectionConfig::default()).unwrap_err();
        assert!(matches!(err, McError::NoBracket { .. }));
    }

    #[test]
    fn non_finite_bracket_is_rejected() {
        let err = bisect(|t| t, Real::NAN, 1.0, &BisectionConfig::default()).unwrap_err();
        assert!(matches!(err, McError::InvalidArg { .. }));
    }
}
