use nalgebra::{Scalar, Vector2};
use num_traits::{Bounded, Float, FromPrimitive, Num};

/// A point in 2d cartesian coordinate space.
pub trait CartesianPoint2d {
    /// Numeric type of the coordinates.
    type Num: Num + Copy + PartialOrd + Bounded + Scalar + FromPrimitive;

    /// X coordinate.
    fn x(&self) -> Self::Num;
    /// Y coordinate.
    fn y(&self) -> Self::Num;

    /// Returns true if both coordinates are exactly equal.
    fn equal(&self, other: &Self) -> bool
    where
        Self: Sized,
    {
        self.x() == other.x() && self.y() == other.y()
    }

    /// Vector from `other` to `self`.
    fn sub(&self, other: &impl CartesianPoint2d<Num = Self::Num>) -> Vector2<Self::Num> {
        Vector2::new(self.x() - other.x(), self.y() - other.y())
    }

    /// Squared euclidean distance between two points.
    fn distance_sq(&self, other: &impl CartesianPoint2d<Num = Self::Num>) -> Self::Num {
        let v = self.sub(other);
        v.x * v.x + v.y * v.y
    }
}

/// Point that can be constructed from its coordinates.
pub trait NewCartesianPoint2d<Num = f64>: CartesianPoint2d<Num = Num> {
    /// Creates a new point.
    fn new(x: Num, y: Num) -> Self;
}

/// Methods available for points with floating point coordinates.
pub trait CartesianPoint2dFloat<N: Float = f64>: CartesianPoint2d<Num = N> {
    /// Euclidean distance between two points.
    fn distance(&self, other: &impl CartesianPoint2d<Num = N>) -> N {
        self.distance_sq(other).sqrt()
    }
}

impl<N: Float, T: CartesianPoint2d<Num = N>> CartesianPoint2dFloat<N> for T {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Point;

    #[test]
    fn distance() {
        let a = Point::new(1.0, 1.0);
        let b = Point::new(4.0, 5.0);
        assert_eq!(a.distance_sq(&b), 25.0);
        assert_eq!(a.distance(&b), 5.0);
        assert_eq!(b.distance(&a), 5.0);
        assert!(a.equal(&Point::new(1.0, 1.0)));
    }
}
