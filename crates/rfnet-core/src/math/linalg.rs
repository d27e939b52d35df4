//! Linear algebra operations
//!
//! This module is the single seam to the dense linear-algebra backend.
//! nalgebra does the factorizations; callers only ever see ndarray.
//!
//! All ndarray<->nalgebra conversions are contained here.

use nalgebra::{DMatrix, SymmetricEigen};
use ndarray::Array2;
use num_complex::Complex64;
use thiserror::Error;

use crate::constants::{EIGEN_MAX_ITER, NEAR_ZERO};

/// Numerical failures reported by the backend
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LinalgError {
    #[error("matrix is not square ({rows}x{cols})")]
    NotSquare { rows: usize, cols: usize },

    #[error("matrix is singular")]
    Singular,

    #[error("eigensolver did not converge after {0} iterations")]
    NoConvergence(usize),

    #[error("matrix contains NaN or infinite entries")]
    NonFinite,
}

// ============================================================================
// Conversion helpers (internal)
// ============================================================================

/// Convert ndarray Array2<Complex64> to nalgebra DMatrix<Complex<f64>>
#[inline]
fn to_na_complex(a: &Array2<Complex64>) -> DMatrix<nalgebra::Complex<f64>> {
    let (m, n) = a.dim();
    DMatrix::from_fn(m, n, |i, j| {
        nalgebra::Complex::new(a[[i, j]].re, a[[i, j]].im)
    })
}

/// Convert nalgebra DMatrix<Complex<f64>> to ndarray Array2<Complex64>
#[inline]
fn from_na_complex(m: &DMatrix<nalgebra::Complex<f64>>) -> Array2<Complex64> {
    Array2::from_shape_fn((m.nrows(), m.ncols()), |(i, j)| {
        Complex64::new(m[(i, j)].re, m[(i, j)].im)
    })
}

fn check_square(a: &Array2<Complex64>) -> Result<usize, LinalgError> {
    let (rows, cols) = a.dim();
    if rows != cols {
        return Err(LinalgError::NotSquare { rows, cols });
    }
    Ok(rows)
}

fn check_finite(a: &Array2<Complex64>) -> Result<(), LinalgError> {
    if a.iter().all(|z| z.is_finite()) {
        Ok(())
    } else {
        Err(LinalgError::NonFinite)
    }
}

// ============================================================================
// Matrix inversion
// ============================================================================

/// Invert a complex matrix through an LU factorization.
///
/// A pivot with magnitude below [`NEAR_ZERO`] is reported as
/// [`LinalgError::Singular`]. An empty matrix inverts to itself.
pub fn inv_complex(a: &Array2<Complex64>) -> Result<Array2<Complex64>, LinalgError> {
    let n = check_square(a)?;
    if n == 0 {
        return Ok(a.clone());
    }
    check_finite(a)?;

    let lu = to_na_complex(a).lu();
    if lu.u().diagonal().iter().any(|p| p.norm() < NEAR_ZERO) {
        return Err(LinalgError::Singular);
    }

    lu.try_inverse()
        .map(|inv| from_na_complex(&inv))
        .ok_or(LinalgError::Singular)
}

// ============================================================================
// Eigenvalue decomposition
// ============================================================================

/// Eigenvalues of a Hermitian matrix, in the order the solver returns them.
///
/// Only the lower triangle is read. Non-finite input is rejected rather than
/// handed to the solver.
pub fn hermitian_eigenvalues(a: &Array2<Complex64>) -> Result<Vec<f64>, LinalgError> {
    let n = check_square(a)?;
    if n == 0 {
        return Ok(Vec::new());
    }
    check_finite(a)?;

    SymmetricEigen::try_new(to_na_complex(a), f64::EPSILON, EIGEN_MAX_ITER)
        .map(|eig| eig.eigenvalues.iter().copied().collect())
        .ok_or(LinalgError::NoConvergence(EIGEN_MAX_ITER))
}
