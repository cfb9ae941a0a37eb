mod affine;
mod decompose;
pub mod error;
mod params;
mod style;

pub use affine::{AffineMatrix, DEG_TO_RAD};
pub use decompose::{DecomposedTransform, DECOMPOSE_SKEW_EPSILON};
pub use error::{MatrixError, Result};
pub use params::TransformParams;
pub use style::StyleTarget;
