//! Library configuration
//!
//! A [`Config`] is passed explicitly to the parser and to [`crate::Network`]
//! constructors. There is no process-wide state.

use crate::constants::PROPERTY_TOL;

/// Storage order for snapshot matrices allocated by the library
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatrixLayout {
    #[default]
    RowMajor,
    ColumnMajor,
}

/// Options shared by parsing and network operations
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    /// Storage order of allocated snapshots
    pub layout: MatrixLayout,
    /// Default tolerance for property checks
    pub tolerance: f64,
    /// Spread per-frequency work over the rayon pool (needs the `parallel` feature)
    pub parallel: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            layout: MatrixLayout::RowMajor,
            tolerance: PROPERTY_TOL,
            parallel: true,
        }
    }
}

impl Config {
    pub fn with_layout(mut self, layout: MatrixLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Whether per-frequency loops should run on the worker pool
    #[inline]
    pub fn use_parallel(&self) -> bool {
        cfg!(feature = "parallel") && self.parallel
    }
}
