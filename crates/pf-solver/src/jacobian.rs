//! Finite difference Jacobian computation.

use crate::error::SolverResult;
use nalgebra::{DMatrix, DVector};

/// Compute Jacobian using forward finite differences.
///
/// `f_x` must be `f(x)`. For each column j, perturbs x[j] by
/// `epsilon * max(|x[j]|, 1)` and computes (f(x+e) - f(x))/dx.
pub fn finite_difference_jacobian<F>(
    x: &DVector<f64>,
    f_x: &DVector<f64>,
    mut f: F,
    epsilon: f64,
) -> SolverResult<DMatrix<f64>>
where
    F: FnMut(&DVector<f64>) -> SolverResult<DVector<f64>>,
{
    let n = x.len();
    let m = f_x.len();
    let mut jac = DMatrix::zeros(m, n);

    let mut x_perturbed = x.clone();
    for j in 0..n {
        let dx = epsilon * x[j].abs().max(1.0);
        x_perturbed[j] = x[j] + dx;

        let f_perturbed = f(&x_perturbed)?;
        jac.set_column(j, &((f_perturbed - f_x) / dx));

        x_perturbed[j] = x[j];
    }

    Ok(jac)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jacobian_linear() {
        // f(x) = 2*x, J = 2
        let f = |x: &DVector<f64>| -> SolverResult<DVector<f64>> {
            Ok(DVector::from_element(1, 2.0 * x[0]))
        };

        let x = DVector::from_element(1, 3.0);
        let fx = DVector::from_element(1, 6.0);
        let jac = finite_difference_jacobian(&x, &fx, f, 1e-7).unwrap();

        assert!((jac[(0, 0)] - 2.0).abs() < 1e-5);
    }

    #[test]
    fn jacobian_rectangular_mixed() {
        // f(x, y) = (x*y, x + 3y, y^2), J = [[y, x], [1, 3], [0, 2y]]
        let f = |v: &DVector<f64>| -> SolverResult<DVector<f64>> {
            Ok(DVector::from_vec(vec![v[0] * v[1], v[0] + 3.0 * v[1], v[1] * v[1]]))
        };

        let x = DVector::from_vec(vec![2.0, 5.0]);
        let fx = f(&x).unwrap();
        let jac = finite_difference_jacobian(&x, &fx, f, 1e-7).unwrap();

        let expected = [[5.0, 2.0], [1.0, 3.0], [0.0, 10.0]];
        for (i, row) in expected.iter().enumerate() {
            for (j, want) in row.iter().enumerate() {
                assert!((jac[(i, j)] - want).abs() < 1e-4, "J[{i},{j}]");
            }
        }
    }

    #[test]
    fn evaluation_errors_propagate() {
        let mut calls = 0;
        let f = |_: &DVector<f64>| -> SolverResult<DVector<f64>> {
            calls += 1;
            Err(crate::error::SolverError::Numeric {
                what: "boom".into(),
            })
        };
        let x = DVector::from_element(2, 1.0);
        let fx = DVector::from_element(2, 0.0);
        assert!(finite_difference_jacobian(&x, &fx, f, 1e-7).is_err());
        assert_eq!(calls, 1);
    }
}
