use crate::cartesian::{CartesianPoint2d, CartesianPoint2dFloat};

/// A straight line segment between two points.
#[derive(Debug, PartialEq)]
pub struct Segment<'a, Point>(pub &'a Point, pub &'a Point);

impl<P> Segment<'_, P> {
    /// Start point of the segment.
    pub fn start(&self) -> &P {
        self.0
    }

    /// End point of the segment.
    pub fn end(&self) -> &P {
        self.1
    }
}

impl<P: CartesianPoint2d<Num = f64>> Segment<'_, P> {
    /// Euclidean length of the segment.
    pub fn length(&self) -> f64 {
        self.0.distance(self.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Point;

    #[test]
    fn length() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(Segment(&a, &b).length(), 5.0);
        assert_eq!(Segment(&a, &a).length(), 0.0);
    }
}
