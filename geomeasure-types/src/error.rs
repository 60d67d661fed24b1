//! Error types used by the crate.

use thiserror::Error;

/// Failure of a coordinate transformation.
///
/// Transforms never panic on bad input. A point outside of the valid domain of the transform,
/// or a transform that cannot be constructed for a reference system, is reported with this
/// error and it is up to the caller to decide how to degrade.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransformError {
    /// The point lies outside of the area where the transform is defined.
    #[error("point ({x}, {y}) is outside of the transform domain")]
    OutOfDomain {
        /// X coordinate of the input point.
        x: f64,
        /// Y coordinate of the input point.
        y: f64,
    },
    /// There is no transform between the given reference systems.
    #[error("transform is not supported: {0}")]
    Unsupported(String),
    /// The operator backing the transform failed.
    #[error("transform operator failed: {0}")]
    Operator(String),
}
