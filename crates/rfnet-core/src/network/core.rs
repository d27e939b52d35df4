//! Core Network struct and constructors
//!
//! Contains the fundamental Network data structure and factory methods.

use ndarray::Array2;
use num_complex::Complex64;
use std::path::Path;
use thiserror::Error;

use super::noise::NoiseNetwork;
use crate::config::Config;
use crate::frequency::Frequency;
use crate::math::linalg::LinalgError;
use crate::math::transforms::{check_port_count, ConversionError, ParameterType};
use crate::touchstone::{Touchstone, TouchstoneError};

/// Errors raised while building or operating on a [`Network`]
#[derive(Error, Debug)]
pub enum NetworkError {
    #[error("network must have at least one port")]
    NoPorts,

    #[error("{what}: expected {expected}, got {got}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        got: usize,
    },

    #[error(transparent)]
    Conversion(#[from] ConversionError),

    #[error(transparent)]
    Linalg(#[from] LinalgError),

    #[error(transparent)]
    Touchstone(#[from] TouchstoneError),
}

/// An N-port electrical network
///
/// Holds one port matrix per frequency point in its native parameter type.
/// Conversions never touch the stored matrices; they return new ones.
#[derive(Debug, Clone)]
pub struct Network {
    /// Network name
    pub name: Option<String>,
    /// Comments
    pub comments: Vec<String>,
    /// Port names, "1".."N" by default
    pub port_names: Vec<String>,
    frequency: Frequency,
    data: Vec<Array2<Complex64>>,
    z0: Vec<Complex64>,
    param: ParameterType,
    nports: usize,
    noise: Option<NoiseNetwork>,
    config: Config,
}

impl Network {
    /// Create a new Network.
    ///
    /// The port count is taken from `z0`. Every matrix must be
    /// `nports x nports`, there must be one matrix per frequency point, and
    /// `param` must be defined for the port count.
    pub fn new(
        frequency: Frequency,
        data: Vec<Array2<Complex64>>,
        z0: Vec<Complex64>,
        param: ParameterType,
    ) -> Result<Self, NetworkError> {
        let nports = z0.len();
        if nports == 0 {
            return Err(NetworkError::NoPorts);
        }
        if data.len() != frequency.npoints() {
            return Err(NetworkError::DimensionMismatch {
                what: "port matrices per frequency point",
                expected: frequency.npoints(),
                got: data.len(),
            });
        }
        for m in &data {
            let (rows, cols) = m.dim();
            if rows != nports || cols != nports {
                return Err(NetworkError::DimensionMismatch {
                    what: "port matrix order",
                    expected: nports,
                    got: if rows != nports { rows } else { cols },
                });
            }
        }
        check_port_count(nports, param, param)?;

        Ok(Self {
            name: None,
            comments: Vec::new(),
            port_names: (1..=nports).map(|i| i.to_string()).collect(),
            frequency,
            data,
            z0,
            param,
            nports,
            noise: None,
            config: Config::default(),
        })
    }

    /// Replace the configuration
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Set the name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Attach a noise sub-network
    pub fn with_noise(mut self, noise: NoiseNetwork) -> Self {
        self.noise = Some(noise);
        self
    }

    /// Create from a Touchstone file with the default [`Config`]
    pub fn from_touchstone<P: AsRef<Path>>(path: P) -> Result<Self, NetworkError> {
        Self::from_touchstone_with_config(path, Config::default())
    }

    /// Create from a Touchstone file; the name is the file stem
    pub fn from_touchstone_with_config<P: AsRef<Path>>(
        path: P,
        config: Config,
    ) -> Result<Self, NetworkError> {
        let path = path.as_ref();
        let ts = Touchstone::from_file_with_config(path, &config)?;
        let mut ntwk = Self::from_touchstone_data(ts, config)?;
        ntwk.name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .map(str::to_string);
        Ok(ntwk)
    }

    /// Create from Touchstone content string
    ///
    /// # Arguments
    /// * `content` - Touchstone file content as string
    /// * `nports` - Number of ports (normally derived from the file extension)
    pub fn from_touchstone_content(content: &str, nports: usize) -> Result<Self, NetworkError> {
        let ts = Touchstone::from_content(content, nports)?;
        Self::from_touchstone_data(ts, Config::default())
    }

    /// Build from parsed Touchstone data.
    ///
    /// Matrices keep the parameter type declared by the file; the scalar
    /// reference impedance is broadcast to every port.
    pub fn from_touchstone_data(ts: Touchstone, config: Config) -> Result<Self, NetworkError> {
        let z0 = vec![Complex64::new(ts.z0, 0.0); ts.nports];
        let mut ntwk = Self::new(ts.frequency, ts.data, z0, ts.param_type)?.with_config(config);
        ntwk.comments = ts.comments;
        ntwk.noise = ts.noise;
        Ok(ntwk)
    }

    /// Get the number of ports
    #[inline]
    pub fn nports(&self) -> usize {
        self.nports
    }

    /// Get the number of frequency points
    #[inline]
    pub fn nfreq(&self) -> usize {
        self.data.len()
    }

    /// Native parameter type of the stored matrices
    #[inline]
    pub fn param(&self) -> ParameterType {
        self.param
    }

    /// Get reference impedance (per port)
    #[inline]
    pub fn z0(&self) -> &[Complex64] {
        &self.z0
    }

    /// Get frequency object
    #[inline]
    pub fn frequency(&self) -> &Frequency {
        &self.frequency
    }

    /// Get frequency vector in Hz
    #[inline]
    pub fn f(&self) -> &[f64] {
        self.frequency.f()
    }

    /// Stored matrices in the native parameter type
    #[inline]
    pub fn data(&self) -> &[Array2<Complex64>] {
        &self.data
    }

    #[inline]
    pub fn noise(&self) -> Option<&NoiseNetwork> {
        self.noise.as_ref()
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Comments joined with newlines
    pub fn comment_text(&self) -> String {
        self.comments.join("\n")
    }
}
