//! Derived network properties
//!
//! Per-frequency passivity figure of merit.

use ndarray::Array2;
use num_complex::Complex64;
use std::borrow::Cow;

use super::core::{Network, NetworkError};
use super::params::map_points;
use crate::math::passivity::passivity;
use crate::math::transforms::ParameterType;

impl Network {
    /// Smallest eigenvalue of `I - S^H S` at each frequency point.
    ///
    /// Non-S networks are converted to S first. Negative values mark points
    /// where the network is active.
    pub fn passivity(&self) -> Result<Vec<f64>, NetworkError> {
        let s: Cow<'_, [Array2<Complex64>]> = match self.param() {
            ParameterType::S => Cow::Borrowed(self.data()),
            _ => Cow::Owned(self.s()?),
        };
        let out = map_points(&s, self.config().use_parallel(), passivity)?;
        Ok(out)
    }

    /// True when every point's passivity figure is at least `-tol`.
    ///
    /// `tol` defaults to the configured tolerance when None.
    pub fn is_passive(&self, tol: Option<f64>) -> Result<bool, NetworkError> {
        let tol = tol.unwrap_or(self.config().tolerance);
        Ok(self.passivity()?.iter().all(|&p| p >= -tol))
    }
}
