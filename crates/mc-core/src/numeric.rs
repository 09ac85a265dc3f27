use crate::McError;

/// Floating point type used throughout system
pub type Real = f64;

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, McError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(McError::NonFinite { what, value: v })
    }
}

/// Outcome of a bounded iterative root search.
///
/// Exhausting the iteration budget is not an error: `value` then holds the
/// last iterate and `converged` is false, so callers decide how much to trust it.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RootOutcome {
    pub value: Real,
    pub iterations: usize,
    pub converged: bool,
}

/// Piecewise-linear interpolation of `fp(xp)` at `x`.
///
/// `xp` must be non-decreasing. Queries outside the table clamp to the first or
/// last value. Empty or mismatched tables yield `None`.
pub fn interp(x: Real, xp: &[Real], fp: &[Real]) -> Option<Real> {
    if xp.is_empty() || xp.len() != fp.len() {
        return None;
    }
    let last = xp.len() - 1;
    if x <= xp[0] {
        return Some(fp[0]);
    }
    if x >= xp[last] {
        return Some(fp[last]);
    }

    // First index whose abscissa exceeds x; guaranteed in 1..=last here.
    let hi = xp.partition_point(|&v| v <= x);
    let lo = hi - 1;
    let span = xp[hi] - xp[lo];
    if span == 0.0 {
        return Some(fp[hi]);
    }
    let t = (x - xp[lo]) / span;
    Some(fp[lo] + t * (fp[hi] - fp[lo]))
}

/// Index of the first element that breaks a non-decreasing run, if any.
pub fn first_decrease(values: &[Real], slack: Real) -> Option<usize> {
    values
        .windows(2)
        .position(|w| w[1] < w[0] - slack)
        .map(|i| i + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(Real::NAN, "test").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("Non-finite"));
        assert_eq!(ensure_finite(2.5, "test"), Ok(2.5));
        assert!(ensure_finite(Real::INFINITY, "test").is_err());
    }

    #[test]
    fn interp_inside_and_clamped() {
        let xp = [0.0, 0.5, 1.0];
        let fp = [0.0, 0.8, 1.0];
        assert!((interp(0.25, &xp, &fp).unwrap() - 0.4).abs() < 1e-12);
        assert!((interp(0.75, &xp, &fp).unwrap() - 0.9).abs() < 1e-12);
        assert_eq!(interp(-1.0, &xp, &fp), Some(0.0));
        assert_eq!(interp(2.0, &xp, &fp), Some(1.0));
        assert_eq!(interp(0.5, &xp, &fp), Some(0.8));
    }

    #[test]
    fn interp_rejects_bad_tables() {
        assert_eq!(interp(0.5, &[], &[]), None);
        assert_eq!(interp(0.5, &[0.0, 1.0], &[0.0]), None);
    }

    #[test]
    fn first_decrease_finds_break() {
        assert_eq!(first_decrease(&[0.0, 0.1, 0.2], 0.0), None);
        assert_eq!(first_decrease(&[0.0, 0.3, 0.2, 0.4], 0.0), Some(2));
        assert_eq!(first_decrease(&[0.0, 0.3, 0.3 - 1e-15], 1e-12), None);
    }
}
