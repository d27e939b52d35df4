//! Numerical constants for network parameter calculations
//!
//! Provides standardized tolerance values and defaults used throughout the
//! library.

/// Tolerance for detecting near-zero values in division and singularity checks.
/// Pivots of an LU factorization smaller than this mark a matrix as singular.
pub const NEAR_ZERO: f64 = 1e-15;

/// Default tolerance for property checks (passivity).
/// This is the tolerance used when None is passed to property check functions.
pub const PROPERTY_TOL: f64 = 1e-12;

/// Tolerance used when comparing a conversion round trip against its input.
pub const ROUNDTRIP_TOL: f64 = 1e-9;

/// Reference impedance assumed when a Touchstone option line omits `R`.
pub const DEFAULT_Z0: f64 = 50.0;

/// Iteration cap handed to the Hermitian eigensolver.
pub const EIGEN_MAX_ITER: usize = 1000;
