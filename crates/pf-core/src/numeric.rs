use crate::PfError;

/// Floating point type used throughout system
pub type Real = f64;

/// One tolerance for everything
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, PfError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(PfError::NonFinite { what, value: v })
    }
}

/// Evenly spread `n` values strictly inside `(lo, hi)`.
///
/// Slot `i` gets `lo + (hi - lo) * (i + 1) / (n + 1)`, so neither end point is
/// ever produced.
pub fn interior_spread(lo: Real, hi: Real, n: usize) -> Vec<Real> {
    let step = (hi - lo) / (n as Real + 1.0);
    (0..n).map(|i| lo + step * (i as Real + 1.0)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearly_equal_basic() {
        let tol = Tolerances {
            abs: 1e-12,
            rel: 1e-9,
        };
        assert!(nearly_equal(1.0, 1.0 + 1e-12, tol));
        assert!(nearly_equal(0.0, 1e-13, tol));
        assert!(!nearly_equal(1.0, 1.0 + 1e-6, tol));
    }

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(Real::NAN, "test").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("Non-finite"));
    }

    #[test]
    fn interior_spread_stays_inside() {
        let v = interior_spread(0.0, 10.0, 4);
        assert_eq!(v, vec![2.0, 4.0, 6.0, 8.0]);
        assert!(interior_spread(1.0, 2.0, 0).is_empty());
        assert_eq!(interior_spread(1e5, 10e5, 1), vec![5.5e5]);
    }
}
