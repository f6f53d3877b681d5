//! # Dense Linear Solver
//!
//! Gauss-Jordan elimination with partial pivoting on `nalgebra` dense
//! storage. System sizes here are 2·(nElem+1) at most.

use log::debug;
use nalgebra::{DMatrix, DVector};

use crate::errors::{CalcError, CalcResult};

/// Best pivot magnitude below which the system is treated as singular
pub const SINGULAR_PIVOT_TOLERANCE: f64 = 1e-14;

/// Solve `a · x = b` by Gauss-Jordan elimination with partial pivoting.
///
/// Works on a private copy; `a` and `b` are left untouched. Fails with
/// [`CalcError::SingularSystem`] when the best available pivot in a column is
/// below [`SINGULAR_PIVOT_TOLERANCE`] (NaN pivots fail the same way), so a
/// singular system never yields NaN or infinite displacements.
///
/// # Example
/// ```rust
/// use beam_core::solver::solve_dense;
/// use nalgebra::{DMatrix, DVector};
///
/// let a = DMatrix::from_row_slice(2, 2, &[2.0, 1.0, 1.0, 3.0]);
/// let x = solve_dense(&a, &DVector::from_vec(vec![3.0, 5.0])).unwrap();
/// assert!((x[0] - 0.8).abs() < 1e-12);
/// assert!((x[1] - 1.4).abs() < 1e-12);
/// ```
pub fn solve_dense(a: &DMatrix<f64>, b: &DVector<f64>) -> CalcResult<DVector<f64>> {
    let n = a.nrows();
    debug_assert!(a.is_square() && b.len() == n, "system must be square and match the rhs");

    let mut m = a.clone();
    let mut rhs = b.clone();

    for k in 0..n {
        let (pivot_row, best) = (k..n)
            .map(|i| (i, m[(i, k)].abs()))
            .fold((k, f64::NEG_INFINITY), |acc, cur| if cur.1 > acc.1 { cur } else { acc });

        // Negated comparison also catches NaN
        if !(best >= SINGULAR_PIVOT_TOLERANCE) {
            debug!("Singular system: column {} best pivot {:e}", k, best);
            return Err(CalcError::singular_system(k, best.max(0.0)));
        }

        m.swap_rows(k, pivot_row);
        rhs.swap_rows(k, pivot_row);

        let pivot = m[(k, k)];
        for j in k..n {
            m[(k, j)] /= pivot;
        }
        rhs[k] /= pivot;

        for i in 0..n {
            if i == k {
                continue;
            }
            let factor = m[(i, k)];
            if factor.abs() < SINGULAR_PIVOT_TOLERANCE {
                continue;
            }
            for j in k..n {
                let delta = factor * m[(k, j)];
                m[(i, j)] -= delta;
            }
            rhs[i] -= factor * rhs[k];
        }
    }

    debug!("Solved dense system of size {}", n);
    Ok(rhs)
}
