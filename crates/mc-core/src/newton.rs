//! Scalar Newton iteration with a bounded iteration budget.

use crate::numeric::{Real, RootOutcome};

/// Newton solver configuration.
#[derive(Clone, Copy, Debug)]
pub struct NewtonConfig {
    /// Maximum iterations
    pub max_iterations: usize,
    /// Convergence threshold on the step size |x_{k+1} - x_k|
    pub step_tol: Real,
}

impl Default for NewtonConfig {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            step_tol: 1e-8,
        }
    }
}

/// Solve `residual(x) = 0` starting from `x0`.
///
/// Iterates until the step falls below `config.step_tol` or the budget runs
/// out. A zero or non-finite derivative stops the loop early with whatever
/// iterate was reached; the outcome is then flagged as not converged.
pub fn newton_solve<F, D>(x0: Real, residual: F, derivative: D, config: &NewtonConfig) -> RootOutcome
where
    F: Fn(Real) -> Real,
    D: Fn(Real) -> Real,
{
    let mut x = x0;

    for iter in 1..=config.max_iterations {
        let f_p = derivative(x);
        if f_p == 0.0 || !f_p.is_finite() {
            return RootOutcome {
                value: x,
                iterations: iter - 1,
                converged: false,
            };
        }

        let x_new = x - residual(x) / f_p;
        let step = (x_new - x).abs();
        x = x_new;

        if step < config.step_tol {
            return RootOutcome {
                value: x,
                iterations: iter,
                converged: true,
            };
        }
    }

    RootOutcome {
        value: x,
        iterations: config.max_iterations,
        converged: false,
    }
}
