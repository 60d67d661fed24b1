//! Traits for points in 2d cartesian coordinates.

mod cartesian_point;

pub use cartesian_point::{CartesianPoint2d, CartesianPoint2dFloat, NewCartesianPoint2d};
pub use nalgebra::Vector2;
