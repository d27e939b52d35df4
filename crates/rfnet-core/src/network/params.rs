//! Network parameter representations (S, Y, Z, H, A, T)
//!
//! Materializes the network's matrices in any representation. The stored
//! matrices are never modified: every call builds a fresh list.

use ndarray::Array2;
use num_complex::Complex64;
use tracing::trace;

use super::core::{Network, NetworkError};
use crate::math::matrix_ops::to_layout;
use crate::math::transforms::{
    check_port_count, convert, s2z, t2s, z2s, s2t, ConversionError, ParameterType,
};

/// Apply `op` to every frequency point, on the rayon pool when enabled.
///
/// Each point is independent; results come back in sweep order.
pub(crate) fn map_points<T, E, F>(
    data: &[Array2<Complex64>],
    parallel: bool,
    op: F,
) -> Result<Vec<T>, E>
where
    T: Send,
    E: Send,
    F: Fn(&Array2<Complex64>) -> Result<T, E> + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        if parallel {
            use rayon::prelude::*;
            return data.par_iter().map(&op).collect();
        }
    }
    #[cfg(not(feature = "parallel"))]
    let _ = parallel;

    data.iter().map(op).collect()
}

impl Network {
    /// Matrices converted to `kind`, one per frequency point.
    ///
    /// Port-count restrictions are checked once up front, so an A/H request on
    /// a non-2-port or a T request on an odd port count fails before any
    /// arithmetic, even for an empty sweep.
    pub fn to_param(&self, kind: ParameterType) -> Result<Vec<Array2<Complex64>>, NetworkError> {
        let from = self.param();
        check_port_count(self.nports(), from, kind)?;
        trace!(%from, to = %kind, points = self.nfreq(), "converting network");

        let z0 = self.z0();
        let layout = self.config().layout;
        let out = map_points(self.data(), self.config().use_parallel(), |m| {
            convert(m, from, kind, z0).map(|r| to_layout(r, layout))
        })?;
        Ok(out)
    }

    /// Get S-parameters
    pub fn s(&self) -> Result<Vec<Array2<Complex64>>, NetworkError> {
        self.to_param(ParameterType::S)
    }

    /// Get Y-parameters (admittance)
    pub fn y(&self) -> Result<Vec<Array2<Complex64>>, NetworkError> {
        self.to_param(ParameterType::Y)
    }

    /// Get Z-parameters (impedance)
    pub fn z(&self) -> Result<Vec<Array2<Complex64>>, NetworkError> {
        self.to_param(ParameterType::Z)
    }

    /// Get H-parameters (hybrid), 2-ports only
    pub fn h(&self) -> Result<Vec<Array2<Complex64>>, NetworkError> {
        self.to_param(ParameterType::H)
    }

    /// Get ABCD parameters (chain/cascade parameters), 2-ports only
    ///
    /// ABCD matrix organization: [[A, B], [C, D]]
    pub fn a(&self) -> Result<Vec<Array2<Complex64>>, NetworkError> {
        self.to_param(ParameterType::A)
    }

    /// Get T-parameters (scattering transfer), even port counts only
    pub fn t(&self) -> Result<Vec<Array2<Complex64>>, NetworkError> {
        self.to_param(ParameterType::T)
    }

    /// A copy of this network whose native representation is `kind`
    pub fn convert_to(&self, kind: ParameterType) -> Result<Network, NetworkError> {
        let data = self.to_param(kind)?;
        self.rebuild(data, self.z0().to_vec(), kind)
    }

    /// A copy of this network referenced to new port impedances.
    ///
    /// S and T matrices are re-derived through Z. Y, Z, H and A do not depend
    /// on the reference impedance and are carried over unchanged.
    pub fn renormalize(&self, z0_new: &[Complex64]) -> Result<Network, NetworkError> {
        let n = self.nports();
        if z0_new.len() != n {
            return Err(ConversionError::ImpedanceMismatch {
                expected: n,
                got: z0_new.len(),
            }
            .into());
        }

        let z0_old = self.z0();
        let parallel = self.config().use_parallel();
        let data = match self.param() {
            ParameterType::S => map_points(self.data(), parallel, |s| {
                z2s(&s2z(s, z0_old)?, z0_new)
            })?,
            ParameterType::T => map_points(self.data(), parallel, |t| {
                let z = s2z(&t2s(t, z0_old)?, z0_old)?;
                s2t(&z2s(&z, z0_new)?, z0_new)
            })?,
            _ => self.data().to_vec(),
        };
        self.rebuild(data, z0_new.to_vec(), self.param())
    }

    fn rebuild(
        &self,
        data: Vec<Array2<Complex64>>,
        z0: Vec<Complex64>,
        param: ParameterType,
    ) -> Result<Network, NetworkError> {
        let mut out = Network::new(self.frequency().clone(), data, z0, param)?
            .with_config(*self.config());
        out.name = self.name.clone();
        out.comments = self.comments.clone();
        out.port_names = self.port_names.clone();
        if let Some(noise) = self.noise() {
            out = out.with_noise(noise.clone());
        }
        Ok(out)
    }
}
