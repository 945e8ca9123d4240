//! Dense linear system solver.
//!
//! The fitter reduces every polynomial regression to a small square system:
//!
//! ```text
//! A · x = b
//! ```
//!
//! where `A` is the (degree+1)×(degree+1) moment matrix and `b` the matching
//! moment vector. We solve it by Gaussian elimination with partial pivoting.
//!
//! Implementation choices:
//! - Partial pivoting: before eliminating column `i` we swap in the row with
//!   the largest-magnitude entry in that column. Sums of powers of large
//!   scores span many orders of magnitude, and naturally-ordered rows would
//!   otherwise divide by tiny pivots.
//! - The solve is destructive: it takes ownership of `a` and `b` and reduces
//!   them in place. Callers always build fresh buffers per fit, so nothing
//!   observable is mutated.
//! - A zero (or non-finite) pivot after pivoting means the system is singular
//!   for this input. That is surfaced as [`SolveError::Singular`] rather than
//!   letting NaNs propagate into coefficients.

use nalgebra::{DMatrix, DVector};

/// Failure of a single solve call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveError {
    /// The pivot in `column` was zero or non-finite after row selection; the
    /// system has no unique solution.
    Singular { column: usize },
}

impl std::fmt::Display for SolveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolveError::Singular { column } => {
                write!(f, "singular linear system (zero pivot in column {column})")
            }
        }
    }
}

impl std::error::Error for SolveError {}

/// Solve `a · x = b` by Gaussian elimination with partial pivoting.
///
/// Consumes both buffers and reduces them in place.
///
/// # Panics
/// Panics if `a` is not square or `b` does not match its dimension. Mismatched
/// sizes are a caller bug, not a runtime condition.
pub fn solve_linear_system(
    mut a: DMatrix<f64>,
    mut b: DVector<f64>,
) -> Result<DVector<f64>, SolveError> {
    let n = a.nrows();
    assert_eq!(a.ncols(), n, "coefficient matrix must be square");
    assert_eq!(b.len(), n, "right-hand side must match matrix dimension");

    // Forward elimination.
    for i in 0..n {
        // Select the largest-magnitude pivot in column i.
        let mut max_row = i;
        for k in (i + 1)..n {
            if a[(k, i)].abs() > a[(max_row, i)].abs() {
                max_row = k;
            }
        }
        if max_row != i {
            a.swap_rows(i, max_row);
            b.swap_rows(i, max_row);
        }

        let pivot = a[(i, i)];
        if pivot == 0.0 || !pivot.is_finite() {
            return Err(SolveError::Singular { column: i });
        }

        for k in (i + 1)..n {
            let factor = a[(k, i)] / pivot;
            for j in i..n {
                a[(k, j)] -= factor * a[(i, j)];
            }
            b[k] -= factor * b[i];
        }
    }

    // Back substitution.
    let mut x = DVector::zeros(n);
    for i in (0..n).rev() {
        let mut acc = b[i];
        for j in (i + 1)..n {
            acc -= a[(i, j)] * x[j];
        }
        x[i] = acc / a[(i, i)];
        if !x[i].is_finite() {
            return Err(SolveError::Singular { column: i });
        }
    }

    Ok(x)
}
