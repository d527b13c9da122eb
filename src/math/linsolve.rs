//! Dense linear system solver for normal equations.
//!
//! The polynomial fitters build small square systems (3x3 for quadratic, 4x4 for
//! cubic) of the form:
//!
//! ```text
//! A · X = B
//! ```
//!
//! and solve them here with nalgebra's LU decomposition (Gaussian elimination with
//! partial pivoting). The routine works for any `n`, but it is not meant as a
//! general linear-algebra library.
//!
//! Singularity is judged per column: a pivot of `U` is treated as zero when it
//! is tiny next to the matching diagonal entry of `A` (the column maximum if that
//! entry is zero). Power sums grow with the exponent, so one threshold for the
//! whole matrix would reject healthy systems.

use nalgebra::{DMatrix, DVector};

use crate::error::FitError;

/// Pivot tolerance, relative to the diagonal entry of the pivot's column.
const PIVOT_EPS: f64 = 1e-12;

/// Solve `A · X = B` for `X`.
///
/// Returns [`FitError::SingularMatrix`] if a pivot falls below tolerance, and
/// [`FitError::DimensionMismatch`] if `A` is not square or `B` has the wrong length.
/// The inputs are not modified.
pub fn solve_linear_system(a: &DMatrix<f64>, b: &DVector<f64>) -> Result<DVector<f64>, FitError> {
    let n = a.nrows();
    if a.ncols() != n || b.len() != n {
        return Err(FitError::DimensionMismatch {
            rows: a.nrows(),
            cols: a.ncols(),
            rhs: b.len(),
        });
    }

    let lu = a.clone().lu();
    let u = lu.u();
    for col in 0..n {
        let diag = a[(col, col)].abs();
        let reference = if diag > 0.0 { diag } else { a.column(col).amax() };
        // `!(x > tol)` also catches NaN pivots and all-zero columns.
        if !(u[(col, col)].abs() > PIVOT_EPS * reference) {
            return Err(FitError::SingularMatrix { n });
        }
    }

    match lu.solve(b) {
        Some(x) if x.iter().all(|v| v.is_finite()) => Ok(x),
        _ => Err(FitError::SingularMatrix { n }),
    }
}
