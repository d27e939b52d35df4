//! Matrix operation helpers
//!
//! Allocation honoring [`MatrixLayout`], diagonal impedance matrices,
//! multiply-accumulate and block access used by the transform functions.

use ndarray::{s, Array2, ArrayView2, ArrayViewMut2, ShapeBuilder};
use num_complex::Complex64;

use crate::config::MatrixLayout;

/// Operand modifier for [`gemm`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    None,
    ConjTranspose,
}

/// Zero matrix of the given shape in the requested storage order
pub fn zeros(rows: usize, cols: usize, layout: MatrixLayout) -> Array2<Complex64> {
    match layout {
        MatrixLayout::RowMajor => Array2::zeros((rows, cols)),
        MatrixLayout::ColumnMajor => Array2::zeros((rows, cols).f()),
    }
}

/// Copy `m` into the requested storage order if it is not already there
pub fn to_layout(m: Array2<Complex64>, layout: MatrixLayout) -> Array2<Complex64> {
    let matches = match layout {
        MatrixLayout::RowMajor => m.is_standard_layout(),
        MatrixLayout::ColumnMajor => m.t().is_standard_layout(),
    };
    if matches {
        return m;
    }
    let (rows, cols) = m.dim();
    let mut out = zeros(rows, cols, layout);
    out.assign(&m);
    out
}

/// Create a diagonal matrix from a slice of values
#[inline]
pub fn diag_matrix(values: &[Complex64]) -> Array2<Complex64> {
    let n = values.len();
    let mut m = Array2::<Complex64>::zeros((n, n));
    for (i, v) in values.iter().enumerate() {
        m[[i, i]] = *v;
    }
    m
}

/// Diagonal of element-wise `sqrt(z0)`
#[inline]
pub fn sqrt_z0_matrix(z0: &[Complex64]) -> Array2<Complex64> {
    let vals: Vec<Complex64> = z0.iter().map(|z| z.sqrt()).collect();
    diag_matrix(&vals)
}

/// Diagonal of element-wise `sqrt(1 / z0)`
#[inline]
pub fn sqrt_y0_matrix(z0: &[Complex64]) -> Array2<Complex64> {
    let vals: Vec<Complex64> = z0.iter().map(|z| z.inv().sqrt()).collect();
    diag_matrix(&vals)
}

/// Identity matrix of given size
#[inline]
pub fn identity(n: usize) -> Array2<Complex64> {
    Array2::<Complex64>::eye(n)
}

/// Conjugate transpose
#[inline]
pub fn conj_transpose(a: &ArrayView2<Complex64>) -> Array2<Complex64> {
    a.t().mapv(|z| z.conj())
}

/// `c = alpha * op_a(a) * op_b(b) + beta * c`
pub fn gemm(
    alpha: Complex64,
    a: &ArrayView2<Complex64>,
    op_a: Op,
    b: &ArrayView2<Complex64>,
    op_b: Op,
    beta: Complex64,
    c: &mut ArrayViewMut2<Complex64>,
) {
    match (op_a, op_b) {
        (Op::None, Op::None) => ndarray::linalg::general_mat_mul(alpha, a, b, beta, c),
        (Op::ConjTranspose, Op::None) => {
            ndarray::linalg::general_mat_mul(alpha, &conj_transpose(a), b, beta, c)
        }
        (Op::None, Op::ConjTranspose) => {
            ndarray::linalg::general_mat_mul(alpha, a, &conj_transpose(b), beta, c)
        }
        (Op::ConjTranspose, Op::ConjTranspose) => ndarray::linalg::general_mat_mul(
            alpha,
            &conj_transpose(a),
            &conj_transpose(b),
            beta,
            c,
        ),
    }
}

/// Product of a chain of matrices, left to right
pub fn mul_chain(factors: &[&Array2<Complex64>]) -> Array2<Complex64> {
    let mut iter = factors.iter();
    let first = match iter.next() {
        Some(m) => (*m).clone(),
        None => return Array2::zeros((0, 0)),
    };
    iter.fold(first, |acc, m| acc.dot(*m))
}

/// Quadrant `(bi, bj)` of a matrix split into four `h x h` blocks
#[inline]
pub fn block(m: &Array2<Complex64>, bi: usize, bj: usize) -> ArrayView2<'_, Complex64> {
    let h = m.nrows() / 2;
    m.slice(s![bi * h..(bi + 1) * h, bj * h..(bj + 1) * h])
}

/// Mutable quadrant `(bi, bj)` of a matrix split into four `h x h` blocks
#[inline]
pub fn block_mut(m: &mut Array2<Complex64>, bi: usize, bj: usize) -> ArrayViewMut2<'_, Complex64> {
    let h = m.nrows() / 2;
    m.slice_mut(s![bi * h..(bi + 1) * h, bj * h..(bj + 1) * h])
}
