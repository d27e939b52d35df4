//! Network module - N-port electrical network representation
//!
//! Provides the core Network struct and conversions between its parameter
//! representations.

mod core;
mod derived;
mod noise;
mod params;

pub use self::core::{Network, NetworkError};
pub use self::noise::{gamma_to_z, NoiseNetwork};
