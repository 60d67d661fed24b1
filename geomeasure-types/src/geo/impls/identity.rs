use crate::error::TransformError;
use crate::geo::traits::transform::{Transform, TransformDirection};
use crate::point::Point;

/// Transform for reference systems that are already geographic. Returns points unchanged.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct IdentityTransform;

impl Transform for IdentityTransform {
    fn transform(
        &self,
        point: &Point,
        _direction: TransformDirection,
    ) -> Result<Point, TransformError> {
        Ok(*point)
    }
}
