use std::fmt::Debug;

use crate::error::TransformError;
use crate::point::Point;

/// Direction of a [`Transform`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TransformDirection {
    /// From the source reference system into geographic coordinates.
    Forward,
    /// From geographic coordinates back into the source reference system.
    Reverse,
}

/// Conversion of points between a source reference system and geographic coordinates.
///
/// Geographic coordinates are always longitude (`x`) and latitude (`y`) in degrees. The `z` and
/// `m` values of the input point are carried over to the output unchanged.
pub trait Transform: Debug {
    /// Transforms a single point.
    fn transform(&self, point: &Point, direction: TransformDirection)
        -> Result<Point, TransformError>;

    /// Transforms coordinates in place. On error the values are left untouched.
    fn transform_in_place(
        &self,
        x: &mut f64,
        y: &mut f64,
        z: &mut f64,
        direction: TransformDirection,
    ) -> Result<(), TransformError> {
        let transformed = self.transform(&Point::new(*x, *y).with_z(*z), direction)?;
        *x = transformed.x();
        *y = transformed.y();
        *z = transformed.z().unwrap_or(*z);

        Ok(())
    }
}
