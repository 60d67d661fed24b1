//! Error types used by the crate.

use geomeasure_types::error::TransformError;
use thiserror::Error;

/// Geomeasure error type.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MeasureError {
    /// The ellipsoid name is not known to the registry.
    #[error("unknown ellipsoid: {0}")]
    UnknownEllipsoid(String),
    /// A point could not be transformed between the source reference system and geographic
    /// coordinates.
    #[error("coordinate transform failed: {0}")]
    Transform(#[from] TransformError),
}
