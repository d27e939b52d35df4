//! Mathematical functions module
//!
//! Scalar encodings, the linear-algebra seam, and the parameter transforms.

pub mod conversions;
pub mod linalg;
pub mod matrix_ops;
pub mod passivity;
pub mod transforms;

pub use conversions::*;
pub use linalg::LinalgError;
pub use passivity::passivity;
pub use transforms::*;
