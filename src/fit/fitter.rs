//! Low-level fitting routines for a single dataset.
//!
//! Given sample points `(x_i, y_i)` and a target degree `d`, we minimize
//!
//! ```text
//! Σ (y_i - Σ_{k=0}^{d} a_k x_i^k)^2
//! ```
//!
//! via the normal equations (method of moments):
//!
//! ```text
//! A[i][j] = Σ x^(i+j)      b[i] = Σ y·x^i
//! ```
//!
//! Numerical notes:
//! - Powers of `x` are accumulated with a single running product per point,
//!   up to `x^(2d)`. Repeated exponentiation would be slower and compound
//!   rounding error across the high moments.
//! - Scores in the hundred-thousands raised to the 14th power make the moment
//!   matrix severely ill-conditioned. That is inherent to the formulation;
//!   the solver's partial pivoting is the sole mitigation.

use nalgebra::{DMatrix, DVector};

use crate::domain::SamplePoint;
use crate::error::AppError;
use crate::math::solve_linear_system;

/// Build the normal-equations system for a degree-`degree` fit.
///
/// Returns the `(degree+1)×(degree+1)` moment matrix and the matching
/// right-hand side, ready for [`solve_linear_system`].
pub fn normal_equations(points: &[SamplePoint], degree: usize) -> (DMatrix<f64>, DVector<f64>) {
    let n_terms = degree + 1;
    let max_power = degree * 2;

    let mut sum_x = vec![0.0; max_power + 1];
    let mut sum_xy = vec![0.0; n_terms];

    for p in points {
        let mut x_pow = 1.0;
        for i in 0..=max_power {
            sum_x[i] += x_pow;
            if i <= degree {
                sum_xy[i] += x_pow * p.percent;
            }
            x_pow *= p.score;
        }
    }

    let a = DMatrix::from_fn(n_terms, n_terms, |i, j| sum_x[i + j]);
    let b = DVector::from_vec(sum_xy);
    (a, b)
}

/// Fit a polynomial of (at most) `degree` to the sample points.
///
/// The degree is clamped to `points.len() - 1`: a fit cannot carry more free
/// parameters than independent equations. Returns coefficients in ascending
/// power order.
///
/// # Errors
/// - exit code 3 if no points were supplied
/// - exit code 4 if the normal equations are singular for this input
pub fn fit_polynomial(points: &[SamplePoint], degree: usize) -> Result<Vec<f64>, AppError> {
    if points.is_empty() {
        return Err(AppError::insufficient_data("No sample points to fit."));
    }

    let degree = degree.min(points.len() - 1);
    let (a, b) = normal_equations(points, degree);

    let coeffs = solve_linear_system(a, b).map_err(|e| {
        AppError::numeric(format!(
            "Polynomial fit of degree {degree} over {} points failed: {e}",
            points.len()
        ))
    })?;

    Ok(coeffs.iter().copied().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::evaluate;

    fn points_from(xs: &[f64], f: impl Fn(f64) -> f64) -> Vec<SamplePoint> {
        xs.iter()
            .map(|&x| SamplePoint {
                score: x,
                percent: f(x),
            })
            .collect()
    }

    fn sum_squared_residuals(points: &[SamplePoint], coeffs: &[f64]) -> f64 {
        points
            .iter()
            .map(|p| {
                let r = p.percent - evaluate(coeffs, p.score);
                r * r
            })
            .sum()
    }

    fn avg_abs_residual(points: &[SamplePoint], coeffs: &[f64]) -> f64 {
        let total: f64 = points
            .iter()
            .map(|p| (p.percent - evaluate(coeffs, p.score)).abs())
            .sum();
        total / points.len() as f64
    }

    #[test]
    fn recovers_exact_quadratic_from_three_points() {
        // y = 1 + 2x + 3x^2 through exactly degree+1 points is interpolating.
        let points = points_from(&[1.0, 2.0, 3.0], |x| 1.0 + 2.0 * x + 3.0 * x * x);

        let coeffs = fit_polynomial(&points, 2).unwrap();
        assert_eq!(coeffs.len(), 3);
        for (got, want) in coeffs.iter().zip([1.0, 2.0, 3.0]) {
            assert!((got - want).abs() / want < 1e-6, "got {got}, want {want}");
        }
    }

    #[test]
    fn recovers_exact_cubic_with_extra_points() {
        // More points than parameters: least squares still reproduces a noise-free cubic.
        let points = points_from(&[-2.0, -1.0, 0.0, 1.0, 2.0, 3.0], |x| {
            0.5 - 1.5 * x + 0.25 * x * x + 2.0 * x * x * x
        });

        let coeffs = fit_polynomial(&points, 3).unwrap();
        assert_eq!(coeffs.len(), 4);
        for (got, want) in coeffs.iter().zip([0.5, -1.5, 0.25, 2.0]) {
            assert!((got - want).abs() < 1e-6, "got {got}, want {want}");
        }
    }

    #[test]
    fn degree_is_clamped_to_point_count() {
        let points = points_from(&[1.0, 2.0, 3.0], |x| x);

        // Requesting degree 7 with 3 points must produce a degree-2 fit.
        let coeffs = fit_polynomial(&points, 7).unwrap();
        assert_eq!(coeffs.len(), 3);
    }

    #[test]
    fn empty_input_is_rejected() {
        let err = fit_polynomial(&[], 3).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn duplicate_scores_surface_as_singular() {
        // One distinct x value cannot determine a quadratic; the moment matrix
        // is rank 1 and the solver must report it.
        let points = vec![
            SamplePoint {
                score: 2.0,
                percent: 10.0,
            };
            3
        ];

        let err = fit_polynomial(&points, 2).unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn fit_minimizes_squared_residuals() {
        // Noisy line: the fitted coefficients must beat every small perturbation.
        let points = vec![
            SamplePoint { score: 0.0, percent: 1.1 },
            SamplePoint { score: 1.0, percent: 2.9 },
            SamplePoint { score: 2.0, percent: 5.2 },
            SamplePoint { score: 3.0, percent: 6.8 },
        ];

        let coeffs = fit_polynomial(&points, 1).unwrap();
        let best = sum_squared_residuals(&points, &coeffs);

        for i in 0..coeffs.len() {
            for delta in [-1e-3, 1e-3] {
                let mut perturbed = coeffs.clone();
                perturbed[i] += delta;
                let sse = sum_squared_residuals(&points, &perturbed);
                assert!(
                    best <= sse + 1e-9,
                    "perturbing coefficient {i} by {delta} improved SSE: {best} vs {sse}"
                );
            }
        }
    }

    #[test]
    fn higher_degree_does_not_worsen_average_residual() {
        let points = points_from(&[0.0, 1.0, 2.0, 3.0, 4.0, 5.0], |x| {
            100.0 / (1.0 + x) + 0.3 * x
        });

        let mut prev = f64::INFINITY;
        for degree in 1..points.len() {
            let coeffs = fit_polynomial(&points, degree).unwrap();
            let avg = avg_abs_residual(&points, &coeffs);
            assert!(
                avg <= prev + 1e-6,
                "degree {degree} worsened avg residual: {avg} > {prev}"
            );
            prev = avg;
        }
    }

    #[test]
    fn normal_equations_have_expected_moments() {
        let points = points_from(&[1.0, 2.0], |_| 1.0);
        let (a, b) = normal_equations(&points, 1);

        // Σx^0 = 2, Σx^1 = 3, Σx^2 = 5; Σy = 2, Σyx = 3.
        assert_eq!(a[(0, 0)], 2.0);
        assert_eq!(a[(0, 1)], 3.0);
        assert_eq!(a[(1, 0)], 3.0);
        assert_eq!(a[(1, 1)], 5.0);
        assert_eq!(b[0], 2.0);
        assert_eq!(b[1], 3.0);
    }

    #[test]
    fn round_trip_evaluation_matches_interpolated_points() {
        // Interpolating fit: the model passes through every input point.
        let points = points_from(&[10.0, 20.0, 30.0, 40.0], |x| 50.0 - 0.8 * x);

        let coeffs = fit_polynomial(&points, 3).unwrap();
        for p in &points {
            let predicted = evaluate(&coeffs, p.score);
            assert!(
                (predicted - p.percent).abs() < 1e-6,
                "prediction {predicted} drifted from {}",
                p.percent
            );
        }
    }
}
