//! rfnet-core: multi-port RF network parameters
//!
//! Frequency-domain models of linear N-port networks with conversions among
//! S, Y, Z, H, A (ABCD) and T parameters, plus a Touchstone v1 reader.
//!
//! ## Modules
//!
//! - `config` - Explicit configuration (matrix layout, tolerance, parallelism)
//! - `frequency` - Frequency sweep representation
//! - `math` - Scalar encodings, linear algebra seam, parameter transforms, passivity
//! - `touchstone` - Touchstone file parsing
//! - `network` - N-port network representation
//!
//! ## Example
//!
//! ```
//! use rfnet_core::{Network, ParameterType};
//!
//! let content = "# GHz S RI R 50\n1.0 0.1 0.0 0.8 0.0 0.8 0.0 0.1 0.0\n";
//! let ntwk = Network::from_touchstone_content(content, 2).unwrap();
//! let z = ntwk.to_param(ParameterType::Z).unwrap();
//! assert_eq!(z.len(), 1);
//! ```

pub mod config;
pub mod constants;
pub mod frequency;
pub mod math;
pub mod network;
pub mod touchstone;

pub use config::{Config, MatrixLayout};
pub use frequency::Frequency;
pub use math::transforms::ParameterType;
pub use network::{Network, NetworkError};
