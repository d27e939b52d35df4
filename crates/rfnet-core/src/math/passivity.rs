//! Passivity figure of merit for one S-parameter matrix
//!
//! `P = I - S^H S` is Hermitian, so its eigenvalues are real. The smallest
//! one is non-negative exactly when the network cannot deliver more power
//! than it absorbs at that frequency.

use ndarray::Array2;
use num_complex::Complex64;

use crate::math::linalg::{hermitian_eigenvalues, LinalgError};
use crate::math::matrix_ops::{gemm, identity, Op};

/// `I - S^H S`
pub fn passivity_matrix(s: &Array2<Complex64>) -> Result<Array2<Complex64>, LinalgError> {
    let (rows, cols) = s.dim();
    if rows != cols {
        return Err(LinalgError::NotSquare { rows, cols });
    }
    let mut p = identity(rows);
    gemm(
        Complex64::new(-1.0, 0.0),
        &s.view(),
        Op::ConjTranspose,
        &s.view(),
        Op::None,
        Complex64::new(1.0, 0.0),
        &mut p.view_mut(),
    );
    Ok(p)
}

/// Smallest eigenvalue of `I - S^H S`.
///
/// Non-finite entries in `S` are an error rather than being skipped. The input
/// is not modified. An empty matrix has no eigenvalues and reports `+inf`.
pub fn passivity(s: &Array2<Complex64>) -> Result<f64, LinalgError> {
    let p = passivity_matrix(s)?;
    let eigs = hermitian_eigenvalues(&p)?;
    Ok(eigs.into_iter().fold(f64::INFINITY, f64::min))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::arr2;

    fn c(re: f64, im: f64) -> Complex64 {
        Complex64::new(re, im)
    }

    #[test]
    fn test_non_passive_two_port() {
        let s = arr2(&[[c(-7.0, 8.2), c(-1.7, -2.9)], [c(-2.0, -4.0), c(-5.0, 5.2)]]);
        let before = s.clone();
        let p = passivity(&s).unwrap();
        assert_relative_eq!(p, -141.89139788916364, epsilon = 1e-6);
        assert_eq!(s, before);
    }

    #[test]
    fn test_matched_load_is_passive() {
        let s = Array2::<Complex64>::zeros((3, 3));
        assert_relative_eq!(passivity(&s).unwrap(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_lossless_thru() {
        // Ideal thru: S^H S = I, so the figure sits at zero
        let s = arr2(&[[c(0.0, 0.0), c(1.0, 0.0)], [c(1.0, 0.0), c(0.0, 0.0)]]);
        assert_relative_eq!(passivity(&s).unwrap(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_nan_is_an_error() {
        let s = arr2(&[[c(f64::NAN, 0.0), c(0.0, 0.0)], [c(0.0, 0.0), c(0.5, 0.0)]]);
        assert_eq!(passivity(&s), Err(LinalgError::NonFinite));
    }

    #[test]
    fn test_passivity_matrix_is_hermitian() {
        let s = arr2(&[[c(0.1, 0.2), c(0.3, -0.1)], [c(-0.2, 0.4), c(0.05, 0.0)]]);
        let p = passivity_matrix(&s).unwrap();
        assert_relative_eq!((p[[0, 1]] - p[[1, 0]].conj()).norm(), 0.0, epsilon = 1e-15);
        assert_relative_eq!(p[[0, 0]].im, 0.0, epsilon = 1e-15);
    }
}
