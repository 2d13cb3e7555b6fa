//! Dogleg trust-region root finder with a finite-difference Jacobian.

use crate::error::{SolverError, SolverResult};
use crate::jacobian::finite_difference_jacobian;
use crate::schema::GuessStrategy;
use nalgebra::{DMatrix, DVector};
use tracing::{debug, trace, warn};

/// Solver configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolverConfig {
    /// Iteration budget; rejected trial steps count too.
    pub max_iterations: usize,
    /// Absolute tolerance for residual norm
    pub abs_tol: f64,
    /// Relative tolerance for residual norm, against the starting norm
    pub rel_tol: f64,
    /// Initial trust radius is this times `max(‖x0‖, 1)`.
    pub initial_radius_factor: f64,
    pub max_radius: f64,
    /// The search stops once the trust radius falls below this.
    pub min_radius: f64,
    /// Minimum ratio of actual to predicted reduction for a step to be taken.
    pub accept_ratio: f64,
    /// Relative perturbation for the finite-difference Jacobian.
    pub jacobian_epsilon: f64,
    pub guess: GuessStrategy,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            abs_tol: 1e-6,
            rel_tol: 1e-12,
            initial_radius_factor: 100.0,
            max_radius: 1e12,
            min_radius: 1e-14,
            accept_ratio: 1e-4,
            jacobian_epsilon: 1e-7,
            guess: GuessStrategy::default(),
        }
    }
}

/// Trust-region iteration result.
#[derive(Debug, Clone)]
pub struct TrustRegionResult {
    /// Best point found
    pub x: DVector<f64>,
    /// Residual norm at `x`
    pub residual_norm: f64,
    /// Number of iterations
    pub iterations: usize,
    /// Converged flag
    pub converged: bool,
}

/// Drive `residual_fn` toward zero from `x0`.
///
/// Each iteration builds a forward-difference Jacobian at the current point
/// and takes Powell's dogleg step inside the trust region. A trial point
/// whose residual fails to evaluate, or evaluates to a non-finite value,
/// is rejected like any other poor step. A failure at `x0` or during a
/// Jacobian evaluation propagates.
///
/// Running out of iterations, or a collapse of the trust region, returns
/// `converged: false` with the best point found.
pub fn dogleg_solve<F>(
    x0: DVector<f64>,
    mut residual_fn: F,
    config: &SolverConfig,
) -> SolverResult<TrustRegionResult>
where
    F: FnMut(&DVector<f64>) -> SolverResult<DVector<f64>>,
{
    let mut x = x0;
    let mut r = residual_fn(&x)?;
    let mut r_norm = r.norm();
    if !r_norm.is_finite() {
        return Err(SolverError::Numeric {
            what: "residual is not finite at the starting point".to_string(),
        });
    }
    let r0_norm = r_norm;
    let mut radius = config.initial_radius_factor * x.norm().max(1.0);
    let mut iterations = 0;

    for iter in 0..config.max_iterations {
        if r_norm <= config.abs_tol || r_norm <= config.rel_tol * r0_norm {
            return Ok(TrustRegionResult {
                x,
                residual_norm: r_norm,
                iterations: iter,
                converged: true,
            });
        }
        iterations = iter + 1;

        let jac = finite_difference_jacobian(&x, &r, &mut residual_fn, config.jacobian_epsilon)?;
        let step = dogleg_step(&jac, &r, radius)?;
        let step_norm = step.norm();

        // Reduction of ½‖r‖² predicted by the linear model
        let predicted = 0.5 * (r.norm_squared() - (&r + &jac * &step).norm_squared());

        let x_trial = &x + &step;
        let trial = match residual_fn(&x_trial) {
            Ok(r_trial) if r_trial.iter().all(|v| v.is_finite()) => Some(r_trial),
            Ok(_) => {
                trace!(iter, radius, "trial residual not finite");
                None
            }
            Err(e) => {
                trace!(iter, radius, error = %e, "trial residual failed");
                None
            }
        };

        let Some(r_trial) = trial else {
            radius = 0.25 * step_norm.min(radius);
            if radius < config.min_radius {
                break;
            }
            continue;
        };

        let trial_norm = r_trial.norm();
        let actual = 0.5 * (r.norm_squared() - r_trial.norm_squared());
        let ratio = if predicted > 0.0 { actual / predicted } else { -1.0 };

        debug!(
            iter,
            residual = r_norm,
            trial = trial_norm,
            radius,
            ratio,
            "dogleg iteration"
        );

        if ratio < 0.25 {
            radius = 0.25 * step_norm.min(radius);
        } else if ratio > 0.75 && step_norm >= 0.99 * radius {
            radius = (2.0 * radius).min(config.max_radius);
        }

        if ratio > config.accept_ratio {
            x = x_trial;
            r = r_trial;
            r_norm = trial_norm;
        } else {
            trace!(iter, ratio, "step rejected");
        }

        if radius < config.min_radius {
            break;
        }
    }

    let converged = r_norm <= config.abs_tol || r_norm <= config.rel_tol * r0_norm;
    if !converged {
        warn!(
            residual = r_norm,
            radius,
            iterations,
            "dogleg stopped without converging"
        );
    }
    Ok(TrustRegionResult {
        x,
        residual_norm: r_norm,
        iterations,
        converged,
    })
}

/// Powell's dogleg step for the linear model `r + J·p` within `radius`.
fn dogleg_step(jac: &DMatrix<f64>, r: &DVector<f64>, radius: f64) -> SolverResult<DVector<f64>> {
    let newton = newton_step(jac, r)?;
    if newton.norm() <= radius {
        return Ok(newton);
    }

    // Steepest descent direction of ½‖r + J·p‖²
    let grad = jac.transpose() * r;
    let grad_norm = grad.norm();
    let j_grad_norm = (jac * &grad).norm();
    if grad_norm == 0.0 || j_grad_norm == 0.0 {
        let scale = radius / newton.norm();
        return Ok(newton * scale);
    }

    let cauchy = &grad * (-(grad_norm * grad_norm) / (j_grad_norm * j_grad_norm));
    let cauchy_norm = cauchy.norm();
    if cauchy_norm >= radius {
        return Ok(&grad * (-radius / grad_norm));
    }

    // Walk from the Cauchy point toward the Newton point until ‖p‖ = radius
    let d = &newton - &cauchy;
    let a = d.norm_squared();
    let b = 2.0 * cauchy.dot(&d);
    let c = cauchy_norm * cauchy_norm - radius * radius;
    let tau = (-b + (b * b - 4.0 * a * c).max(0.0).sqrt()) / (2.0 * a);
    Ok(cauchy + d * tau)
}

/// Solve `J·p = −r`, falling back to a least-squares solve when `J` is
/// singular or badly conditioned.
fn newton_step(jac: &DMatrix<f64>, r: &DVector<f64>) -> SolverResult<DVector<f64>> {
    let rhs = -r;
    if jac.is_square() {
        if let Some(p) = jac.clone().lu().solve(&rhs) {
            if p.iter().all(|v| v.is_finite()) {
                return Ok(p);
            }
        }
    }

    let p = jac
        .clone()
        .svd(true, true)
        .solve(&rhs, 1e-12)
        .map_err(|e| SolverError::Numeric {
            what: format!("Jacobian solve failed: {e}"),
        })?;
    if p.iter().all(|v| v.is_finite()) {
        Ok(p)
    } else {
        Err(SolverError::Numeric {
            what: "Jacobian solve produced non-finite step".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_quadratic() {
        // Solve x^2 - 4 = 0, x > 0
        let residual = |x: &DVector<f64>| -> SolverResult<DVector<f64>> {
            Ok(DVector::from_element(1, x[0] * x[0] - 4.0))
        };

        let x0 = DVector::from_element(1, 3.0);
        let result = dogleg_solve(x0, residual, &SolverConfig::default()).unwrap();

        assert!(result.converged);
        assert!((result.x[0] - 2.0).abs() < 1e-6);
    }

    #[test]
    fn rosenbrock_system() {
        // r = (10(y - x²), 1 - x), root at (1, 1)
        let residual = |v: &DVector<f64>| -> SolverResult<DVector<f64>> {
            Ok(DVector::from_vec(vec![
                10.0 * (v[1] - v[0] * v[0]),
                1.0 - v[0],
            ]))
        };

        let x0 = DVector::from_vec(vec![-1.2, 1.0]);
        let result = dogleg_solve(x0, residual, &SolverConfig::default()).unwrap();

        assert!(result.converged, "residual = {}", result.residual_norm);
        assert!((result.x[0] - 1.0).abs() < 1e-5);
        assert!((result.x[1] - 1.0).abs() < 1e-5);
    }

    #[test]
    fn failing_trial_points_shrink_the_region() {
        // sqrt is undefined below zero; a full Newton step from 0.2 lands there.
        let residual = |x: &DVector<f64>| -> SolverResult<DVector<f64>> {
            if x[0] < 0.0 {
                return Err(SolverError::Numeric {
                    what: "negative".into(),
                });
            }
            Ok(DVector::from_element(1, x[0].sqrt() - 0.1))
        };

        let x0 = DVector::from_element(1, 4.0);
        let result = dogleg_solve(x0, residual, &SolverConfig::default()).unwrap();

        assert!(result.converged);
        assert!((result.x[0] - 0.01).abs() < 1e-5);
    }

    #[test]
    fn starting_point_failure_propagates() {
        let residual = |_: &DVector<f64>| -> SolverResult<DVector<f64>> {
            Err(SolverError::Numeric {
                what: "bad start".into(),
            })
        };
        let x0 = DVector::from_element(1, 1.0);
        assert!(dogleg_solve(x0, residual, &SolverConfig::default()).is_err());
    }

    #[test]
    fn exhausted_budget_reports_not_converged() {
        // x² + 1 has no real root
        let residual = |x: &DVector<f64>| -> SolverResult<DVector<f64>> {
            Ok(DVector::from_element(1, x[0] * x[0] + 1.0))
        };
        let config = SolverConfig {
            max_iterations: 10,
            ..SolverConfig::default()
        };
        let result = dogleg_solve(DVector::from_element(1, 2.0), residual, &config).unwrap();
        assert!(!result.converged);
        assert!(result.residual_norm >= 1.0);
    }

    #[test]
    fn empty_system_converges_immediately() {
        let residual = |_: &DVector<f64>| -> SolverResult<DVector<f64>> { Ok(DVector::zeros(0)) };
        let result =
            dogleg_solve(DVector::zeros(0), residual, &SolverConfig::default()).unwrap();
        assert!(result.converged);
        assert_eq!(result.iterations, 0);
    }

    #[test]
    fn singular_jacobian_uses_least_squares() {
        let jac = DMatrix::from_row_slice(2, 2, &[1.0, 1.0, 1.0, 1.0]);
        let r = DVector::from_vec(vec![2.0, 2.0]);
        let p = newton_step(&jac, &r).unwrap();
        assert!((p[0] + 1.0).abs() < 1e-9);
        assert!((p[1] + 1.0).abs() < 1e-9);
    }
}
