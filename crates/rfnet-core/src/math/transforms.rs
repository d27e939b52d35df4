//! Network parameter transformation functions
//!
//! Conversions between S, Y, Z, H, A (ABCD) and T parameters of a single
//! port matrix at one frequency point.
//!
//! Every function takes the matrix and the per-port reference impedances and
//! returns a new matrix; the input is never modified. Port-count restrictions
//! are checked before any arithmetic:
//!
//! - A and H exist only for 2-ports.
//! - T is built from N/2 x N/2 blocks and needs an even port count.
//!
//! Pairs without a closed form go through S (for example `a2t` is `s2t(a2s)`).

use ndarray::{arr2, Array2};
use num_complex::Complex64;
use std::fmt;
use thiserror::Error;

use crate::constants::NEAR_ZERO;
use crate::math::linalg::{inv_complex, LinalgError};
use crate::math::matrix_ops::{
    block, block_mut, gemm, identity, mul_chain, sqrt_y0_matrix, sqrt_z0_matrix, Op,
};

/// Network parameter representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ParameterType {
    /// Scattering
    #[default]
    S,
    /// Admittance
    Y,
    /// Impedance
    Z,
    /// Hybrid (2-port only)
    H,
    /// Chain / ABCD (2-port only)
    A,
    /// Transmission (even port count)
    T,
}

impl ParameterType {
    pub const ALL: [ParameterType; 6] = [
        ParameterType::S,
        ParameterType::Y,
        ParameterType::Z,
        ParameterType::H,
        ParameterType::A,
        ParameterType::T,
    ];

    /// Parse from a single letter (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "s" => Some(ParameterType::S),
            "y" => Some(ParameterType::Y),
            "z" => Some(ParameterType::Z),
            "h" => Some(ParameterType::H),
            "a" => Some(ParameterType::A),
            "t" => Some(ParameterType::T),
            _ => None,
        }
    }

    /// A and H are only defined for 2-ports
    #[inline]
    pub fn is_two_port_only(self) -> bool {
        matches!(self, ParameterType::A | ParameterType::H)
    }
}

impl fmt::Display for ParameterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ParameterType::S => "S",
            ParameterType::Y => "Y",
            ParameterType::Z => "Z",
            ParameterType::H => "H",
            ParameterType::A => "A",
            ParameterType::T => "T",
        };
        f.write_str(s)
    }
}

/// Errors raised by parameter conversions
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConversionError {
    #[error("parameter matrix is not square ({rows}x{cols})")]
    NotSquare { rows: usize, cols: usize },

    #[error("{param} parameters are only defined for 2-ports, got {nports} ports")]
    TwoPortOnly { param: ParameterType, nports: usize },

    #[error("T parameters need an even port count, got {0} ports")]
    OddPortCount(usize),

    #[error("expected {expected} reference impedances, got {got}")]
    ImpedanceMismatch { expected: usize, got: usize },

    #[error(transparent)]
    Linalg(#[from] LinalgError),
}

type Matrix = Array2<Complex64>;
type ConvResult = Result<Matrix, ConversionError>;

const ONE: Complex64 = Complex64::new(1.0, 0.0);
const TWO: Complex64 = Complex64::new(2.0, 0.0);

// ============================================================================
// Precondition checks
// ============================================================================

fn nports(m: &Matrix) -> Result<usize, ConversionError> {
    let (rows, cols) = m.dim();
    if rows != cols {
        return Err(ConversionError::NotSquare { rows, cols });
    }
    Ok(rows)
}

fn check_z0(n: usize, z0: &[Complex64]) -> Result<(), ConversionError> {
    if z0.len() != n {
        return Err(ConversionError::ImpedanceMismatch {
            expected: n,
            got: z0.len(),
        });
    }
    Ok(())
}

fn two_port(m: &Matrix, param: ParameterType) -> Result<(), ConversionError> {
    let n = nports(m)?;
    if n != 2 {
        return Err(ConversionError::TwoPortOnly { param, nports: n });
    }
    Ok(())
}

fn even_ports(m: &Matrix) -> Result<usize, ConversionError> {
    let n = nports(m)?;
    if n % 2 != 0 {
        return Err(ConversionError::OddPortCount(n));
    }
    Ok(n)
}

/// Check that both representations exist for `nports` ports
pub fn check_port_count(
    nports: usize,
    from: ParameterType,
    to: ParameterType,
) -> Result<(), ConversionError> {
    for param in [from, to] {
        if param.is_two_port_only() && nports != 2 {
            return Err(ConversionError::TwoPortOnly { param, nports });
        }
        if param == ParameterType::T && nports % 2 != 0 {
            return Err(ConversionError::OddPortCount(nports));
        }
    }
    Ok(())
}

/// Reject a scalar denominator that would blow up a closed form
#[inline]
fn den(x: Complex64) -> Result<Complex64, ConversionError> {
    if x.norm() < NEAR_ZERO {
        return Err(LinalgError::Singular.into());
    }
    Ok(x)
}

/// `(z01, z02, sqrt(re(z01) * re(z02)))` for the 2-port closed forms.
///
/// The root is complex so a negative resistance product stays finite.
fn two_port_z0(z0: &[Complex64]) -> Result<(Complex64, Complex64, Complex64), ConversionError> {
    check_z0(2, z0)?;
    let (z01, z02) = (z0[0], z0[1]);
    Ok((z01, z02, Complex64::new(z01.re * z02.re, 0.0).sqrt()))
}

#[inline]
fn entries(m: &Matrix) -> (Complex64, Complex64, Complex64, Complex64) {
    (m[[0, 0]], m[[0, 1]], m[[1, 0]], m[[1, 1]])
}

// ============================================================================
// Renormalization (any port count)
// ============================================================================

/// S to Z: `Z = sqrt(Z0) (I - S)^-1 (I + S) sqrt(Z0)`
pub fn s2z(s: &Matrix, z0: &[Complex64]) -> ConvResult {
    let n = nports(s)?;
    check_z0(n, z0)?;
    let sz = sqrt_z0_matrix(z0);
    let eye = identity(n);
    let inv = inv_complex(&(&eye - s))?;
    Ok(mul_chain(&[&sz, &inv, &(&eye + s), &sz]))
}

/// S to Y: `Y = sqrt(Y0) (I + S)^-1 (I - S) sqrt(Y0)`
pub fn s2y(s: &Matrix, z0: &[Complex64]) -> ConvResult {
    let n = nports(s)?;
    check_z0(n, z0)?;
    let sy = sqrt_y0_matrix(z0);
    let eye = identity(n);
    let inv = inv_complex(&(&eye + s))?;
    Ok(mul_chain(&[&sy, &inv, &(&eye - s), &sy]))
}

/// Z to S: `S = (Zn - I) (Zn + I)^-1` with `Zn = sqrt(Y0) Z sqrt(Y0)`
pub fn z2s(z: &Matrix, z0: &[Complex64]) -> ConvResult {
    let n = nports(z)?;
    check_z0(n, z0)?;
    let sy = sqrt_y0_matrix(z0);
    let eye = identity(n);
    let zn = mul_chain(&[&sy, z, &sy]);
    let inv = inv_complex(&(&zn + &eye))?;
    Ok((&zn - &eye).dot(&inv))
}

/// Y to S: `S = (I - Yn) (I + Yn)^-1` with `Yn = sqrt(Z0) Y sqrt(Z0)`
pub fn y2s(y: &Matrix, z0: &[Complex64]) -> ConvResult {
    let n = nports(y)?;
    check_z0(n, z0)?;
    let sz = sqrt_z0_matrix(z0);
    let eye = identity(n);
    let yn = mul_chain(&[&sz, y, &sz]);
    let inv = inv_complex(&(&eye + &yn))?;
    Ok((&eye - &yn).dot(&inv))
}

/// Y to Z: matrix inverse
pub fn y2z(y: &Matrix, _z0: &[Complex64]) -> ConvResult {
    nports(y)?;
    Ok(inv_complex(y)?)
}

/// Z to Y: matrix inverse
pub fn z2y(z: &Matrix, _z0: &[Complex64]) -> ConvResult {
    nports(z)?;
    Ok(inv_complex(z)?)
}

// ============================================================================
// Block T parameters (even port count)
// ============================================================================

/// S to T over N/2 x N/2 blocks, with `M = S21^-1`:
///
/// ```text
/// T11 = S12 - S11 M S22    T12 = S11 M
/// T21 = -M S22             T22 = M
/// ```
pub fn s2t(s: &Matrix, _z0: &[Complex64]) -> ConvResult {
    let n = even_ports(s)?;
    let minv = inv_complex(&block(s, 1, 0).to_owned())?;
    let s11_minv = block(s, 0, 0).dot(&minv);

    let mut t = Matrix::zeros((n, n));
    block_mut(&mut t, 0, 0).assign(&block(s, 0, 1));
    gemm(
        -ONE,
        &s11_minv.view(),
        Op::None,
        &block(s, 1, 1),
        Op::None,
        ONE,
        &mut block_mut(&mut t, 0, 0),
    );
    gemm(
        -ONE,
        &minv.view(),
        Op::None,
        &block(s, 1, 1),
        Op::None,
        Complex64::new(0.0, 0.0),
        &mut block_mut(&mut t, 1, 0),
    );
    block_mut(&mut t, 0, 1).assign(&s11_minv);
    block_mut(&mut t, 1, 1).assign(&minv);
    Ok(t)
}

/// T to S, inverting the lower-right block, with `M = T22^-1`:
///
/// ```text
/// S11 = T12 M    S12 = T11 - T12 M T21
/// S21 = M        S22 = -M T21
/// ```
pub fn t2s(t: &Matrix, _z0: &[Complex64]) -> ConvResult {
    let n = even_ports(t)?;
    let minv = inv_complex(&block(t, 1, 1).to_owned())?;
    let t12_minv = block(t, 0, 1).dot(&minv);

    let mut s = Matrix::zeros((n, n));
    block_mut(&mut s, 0, 1).assign(&block(t, 0, 0));
    gemm(
        -ONE,
        &t12_minv.view(),
        Op::None,
        &block(t, 1, 0),
        Op::None,
        ONE,
        &mut block_mut(&mut s, 0, 1),
    );
    gemm(
        -ONE,
        &minv.view(),
        Op::None,
        &block(t, 1, 0),
        Op::None,
        Complex64::new(0.0, 0.0),
        &mut block_mut(&mut s, 1, 1),
    );
    block_mut(&mut s, 0, 0).assign(&t12_minv);
    block_mut(&mut s, 1, 0).assign(&minv);
    Ok(s)
}

// ============================================================================
// 2-port closed forms
// ============================================================================

/// S to A (ABCD) for a 2-port with complex reference impedances
pub fn s2a(s: &Matrix, z0: &[Complex64]) -> ConvResult {
    two_port(s, ParameterType::A)?;
    let (z01, z02, r) = two_port_z0(z0)?;
    let (s11, s12, s21, s22) = entries(s);
    let d = den(TWO * s21 * r)?;
    let p = s12 * s21;

    let a = ((z01.conj() + s11 * z01) * (ONE - s22) + p * z01) / d;
    let b = ((z01.conj() + s11 * z01) * (z02.conj() + s22 * z02) - p * z01 * z02) / d;
    let c = ((ONE - s11) * (ONE - s22) - p) / d;
    let dd = ((ONE - s11) * (z02.conj() + s22 * z02) + p * z02) / d;
    Ok(arr2(&[[a, b], [c, dd]]))
}

/// A (ABCD) to S for a 2-port with complex reference impedances
pub fn a2s(m: &Matrix, z0: &[Complex64]) -> ConvResult {
    two_port(m, ParameterType::A)?;
    let (z01, z02, r) = two_port_z0(z0)?;
    let (a, b, c, d) = entries(m);
    let dn = den(a * z02 + b + c * z01 * z02 + d * z01)?;

    let s11 = (a * z02 + b - c * z01.conj() * z02 - d * z01.conj()) / dn;
    let s12 = TWO * (a * d - b * c) * r / dn;
    let s21 = TWO * r / dn;
    let s22 = (-a * z02.conj() + b - c * z01 * z02.conj() + d * z01) / dn;
    Ok(arr2(&[[s11, s12], [s21, s22]]))
}

/// H to S for a 2-port with complex reference impedances
pub fn h2s(h: &Matrix, z0: &[Complex64]) -> ConvResult {
    two_port(h, ParameterType::H)?;
    let (z01, z02, r) = two_port_z0(z0)?;
    let (h11, h12, h21, h22) = entries(h);
    let p = h12 * h21;
    let dn = den((z01 + h11) * (ONE + h22 * z02) - p * z02)?;

    let s11 = ((h11 - z01.conj()) * (ONE + h22 * z02) - p * z02) / dn;
    let s12 = TWO * h12 * r / dn;
    let s21 = -TWO * h21 * r / dn;
    let s22 = ((z01 + h11) * (ONE - h22 * z02.conj()) + p * z02.conj()) / dn;
    Ok(arr2(&[[s11, s12], [s21, s22]]))
}

/// S to H, through Z
pub fn s2h(s: &Matrix, z0: &[Complex64]) -> ConvResult {
    two_port(s, ParameterType::H)?;
    z2h(&s2z(s, z0)?, z0)
}

/// A to H: `[B/D, det(A)/D; -1/D, C/D]`
pub fn a2h(m: &Matrix, _z0: &[Complex64]) -> ConvResult {
    two_port(m, ParameterType::A)?;
    let (a, b, c, d) = entries(m);
    let d = den(d)?;
    Ok(arr2(&[[b / d, (a * d - b * c) / d], [-ONE / d, c / d]]))
}

/// H to A: `[-det(H)/h21, -h11/h21; -h22/h21, -1/h21]`
pub fn h2a(h: &Matrix, _z0: &[Complex64]) -> ConvResult {
    two_port(h, ParameterType::H)?;
    let (h11, h12, h21, h22) = entries(h);
    let h21 = den(h21)?;
    let det = h11 * h22 - h12 * h21;
    Ok(arr2(&[
        [-det / h21, -h11 / h21],
        [-h22 / h21, -ONE / h21],
    ]))
}

/// A to Y: `[D/B, -det(A)/B; -1/B, A/B]`
pub fn a2y(m: &Matrix, _z0: &[Complex64]) -> ConvResult {
    two_port(m, ParameterType::A)?;
    let (a, b, c, d) = entries(m);
    let b = den(b)?;
    let det = a * d - b * c;
    Ok(arr2(&[[d / b, -det / b], [-ONE / b, a / b]]))
}

/// A to Z: `[A/C, det(A)/C; 1/C, D/C]`
pub fn a2z(m: &Matrix, _z0: &[Complex64]) -> ConvResult {
    two_port(m, ParameterType::A)?;
    let (a, b, c, d) = entries(m);
    let c = den(c)?;
    let det = a * d - b * c;
    Ok(arr2(&[[a / c, det / c], [ONE / c, d / c]]))
}

/// H to Y: `[1/h11, -h12/h11; h21/h11, det(H)/h11]`
pub fn h2y(h: &Matrix, _z0: &[Complex64]) -> ConvResult {
    two_port(h, ParameterType::H)?;
    let (h11, h12, h21, h22) = entries(h);
    let h11 = den(h11)?;
    let det = h11 * h22 - h12 * h21;
    Ok(arr2(&[[ONE / h11, -h12 / h11], [h21 / h11, det / h11]]))
}

/// H to Z: `[det(H)/h22, h12/h22; -h21/h22, 1/h22]`
pub fn h2z(h: &Matrix, _z0: &[Complex64]) -> ConvResult {
    two_port(h, ParameterType::H)?;
    let (h11, h12, h21, h22) = entries(h);
    let h22 = den(h22)?;
    let det = h11 * h22 - h12 * h21;
    Ok(arr2(&[[det / h22, h12 / h22], [-h21 / h22, ONE / h22]]))
}

/// Y to A: `[-y22/y21, -1/y21; -det(Y)/y21, -y11/y21]`
pub fn y2a(y: &Matrix, _z0: &[Complex64]) -> ConvResult {
    two_port(y, ParameterType::A)?;
    let (y11, y12, y21, y22) = entries(y);
    let y21 = den(y21)?;
    let det = y11 * y22 - y12 * y21;
    Ok(arr2(&[
        [-y22 / y21, -ONE / y21],
        [-det / y21, -y11 / y21],
    ]))
}

/// Y to H: `[1/y11, -y12/y11; y21/y11, det(Y)/y11]`
pub fn y2h(y: &Matrix, _z0: &[Complex64]) -> ConvResult {
    two_port(y, ParameterType::H)?;
    let (y11, y12, y21, y22) = entries(y);
    let y11 = den(y11)?;
    let det = y11 * y22 - y12 * y21;
    Ok(arr2(&[[ONE / y11, -y12 / y11], [y21 / y11, det / y11]]))
}

/// Z to A: `[z11/z21, det(Z)/z21; 1/z21, z22/z21]`
pub fn z2a(z: &Matrix, _z0: &[Complex64]) -> ConvResult {
    two_port(z, ParameterType::A)?;
    let (z11, z12, z21, z22) = entries(z);
    let z21 = den(z21)?;
    let det = z11 * z22 - z12 * z21;
    Ok(arr2(&[[z11 / z21, det / z21], [ONE / z21, z22 / z21]]))
}

/// Z to H: `[det(Z)/z22, z12/z22; -z21/z22, 1/z22]`
pub fn z2h(z: &Matrix, _z0: &[Complex64]) -> ConvResult {
    two_port(z, ParameterType::H)?;
    let (z11, z12, z21, z22) = entries(z);
    let z22 = den(z22)?;
    let det = z11 * z22 - z12 * z21;
    Ok(arr2(&[[det / z22, z12 / z22], [-z21 / z22, ONE / z22]]))
}

// ============================================================================
// Composite paths through S
// ============================================================================

pub fn a2t(m: &Matrix, z0: &[Complex64]) -> ConvResult {
    two_port(m, ParameterType::A)?;
    s2t(&a2s(m, z0)?, z0)
}

pub fn h2t(h: &Matrix, z0: &[Complex64]) -> ConvResult {
    two_port(h, ParameterType::H)?;
    s2t(&h2s(h, z0)?, z0)
}

pub fn y2t(y: &Matrix, z0: &[Complex64]) -> ConvResult {
    even_ports(y)?;
    s2t(&y2s(y, z0)?, z0)
}

pub fn z2t(z: &Matrix, z0: &[Complex64]) -> ConvResult {
    even_ports(z)?;
    s2t(&z2s(z, z0)?, z0)
}

pub fn t2a(t: &Matrix, z0: &[Complex64]) -> ConvResult {
    two_port(t, ParameterType::A)?;
    s2a(&t2s(t, z0)?, z0)
}

pub fn t2h(t: &Matrix, z0: &[Complex64]) -> ConvResult {
    two_port(t, ParameterType::H)?;
    s2h(&t2s(t, z0)?, z0)
}

pub fn t2y(t: &Matrix, z0: &[Complex64]) -> ConvResult {
    even_ports(t)?;
    s2y(&t2s(t, z0)?, z0)
}

pub fn t2z(t: &Matrix, z0: &[Complex64]) -> ConvResult {
    even_ports(t)?;
    s2z(&t2s(t, z0)?, z0)
}

/// Convert one port matrix from `from` to `to`.
///
/// `from == to` returns a copy of the input.
pub fn convert(
    m: &Matrix,
    from: ParameterType,
    to: ParameterType,
    z0: &[Complex64],
) -> ConvResult {
    use ParameterType::*;

    if from == to {
        nports(m)?;
        return Ok(m.clone());
    }
    check_port_count(nports(m)?, from, to)?;

    match (from, to) {
        (S, Y) => s2y(m, z0),
        (S, Z) => s2z(m, z0),
        (S, H) => s2h(m, z0),
        (S, A) => s2a(m, z0),
        (S, T) => s2t(m, z0),
        (Y, S) => y2s(m, z0),
        (Y, Z) => y2z(m, z0),
        (Y, H) => y2h(m, z0),
        (Y, A) => y2a(m, z0),
        (Y, T) => y2t(m, z0),
        (Z, S) => z2s(m, z0),
        (Z, Y) => z2y(m, z0),
        (Z, H) => z2h(m, z0),
        (Z, A) => z2a(m, z0),
        (Z, T) => z2t(m, z0),
        (H, S) => h2s(m, z0),
        (H, Y) => h2y(m, z0),
        (H, Z) => h2z(m, z0),
        (H, A) => h2a(m, z0),
        (H, T) => h2t(m, z0),
        (A, S) => a2s(m, z0),
        (A, Y) => a2y(m, z0),
        (A, Z) => a2z(m, z0),
        (A, H) => a2h(m, z0),
        (A, T) => a2t(m, z0),
        (T, S) => t2s(m, z0),
        (T, Y) => t2y(m, z0),
        (T, Z) => t2z(m, z0),
        (T, H) => t2h(m, z0),
        (T, A) => t2a(m, z0),
        (S, S) | (Y, Y) | (Z, Z) | (H, H) | (A, A) | (T, T) => Ok(m.clone()),
    }
}
