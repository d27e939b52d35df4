//! Shared helpers for the integration tests

#![allow(dead_code)]

use approx::assert_relative_eq;
use ndarray::Array2;
use num_complex::Complex64;

pub const TEST_DATA_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../tests/data");

pub fn data_path(name: &str) -> String {
    format!("{}/{}", TEST_DATA_DIR, name)
}

pub fn c(re: f64, im: f64) -> Complex64 {
    Complex64::new(re, im)
}

/// Compare real and imaginary parts within `tol`, absolute or relative
pub fn assert_complex_eq(actual: Complex64, expected: Complex64, tol: f64) {
    assert_relative_eq!(actual.re, expected.re, epsilon = tol, max_relative = tol);
    assert_relative_eq!(actual.im, expected.im, epsilon = tol, max_relative = tol);
}

/// Element-wise [`assert_complex_eq`] over two matrices of the same shape
pub fn assert_matrix_eq(actual: &Array2<Complex64>, expected: &Array2<Complex64>, tol: f64) {
    assert_eq!(actual.dim(), expected.dim());
    for (a, e) in actual.iter().zip(expected.iter()) {
        assert_complex_eq(*a, *e, tol);
    }
}

/// [`assert_matrix_eq`] over two sweeps of matrices
pub fn assert_sweep_eq(actual: &[Array2<Complex64>], expected: &[Array2<Complex64>], tol: f64) {
    assert_eq!(actual.len(), expected.len());
    for (a, e) in actual.iter().zip(expected) {
        assert_matrix_eq(a, e, tol);
    }
}
