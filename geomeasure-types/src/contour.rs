//! Contour is a sequence of points.
//!
//! Contours can be:
//! * **open** - the first and the last points of the contour are not connected. A route or a
//!   measured path is an open contour.
//! * **closed** - the first and the last points of the contour are connected. The boundary of a
//!   surface is a closed contour (a ring).
//!
//! Closed contours should not duplicate the first point at the end. The closing segment is
//! produced by [`Contour::iter_points_closing`] and [`Contour::iter_segments`] instead. Rings that
//! do repeat the closing point are still measured correctly: the repeated point only adds a
//! zero-length segment.

use crate::segment::Segment;

/// Sequence of points. See module level documentation for details.
pub trait Contour {
    /// Type of the points the contour is consisted of.
    type Point;

    /// Whether the contour is closed.
    fn is_closed(&self) -> bool;

    /// Iterate over the points of the contour.
    fn iter_points(&self) -> impl Iterator<Item = &'_ Self::Point>;

    /// Same as [`Contour::iter_points`] but for closed contours repeats the first point again at
    /// the end of the iterator.
    fn iter_points_closing(&self) -> impl Iterator<Item = &Self::Point> {
        ContourPointsIterator::new(self.iter_points(), self.is_closed())
    }

    /// Iterates over segments of the contour. For closed contours this includes the segment
    /// between the last and the first points of the contour.
    fn iter_segments(&self) -> impl Iterator<Item = Segment<'_, Self::Point>> {
        ContourSegmentIterator::new(ContourPointsIterator::new(
            self.iter_points(),
            self.is_closed(),
        ))
    }
}

/// A closed contour. See module documentation for details.
pub trait ClosedContour {
    /// Type of the points the contour is consisted of.
    type Point;

    /// Iterate over the points of the contour.
    fn iter_points(&self) -> impl Iterator<Item = &'_ Self::Point>;
}

impl<P, T: ClosedContour<Point = P>> Contour for T {
    type Point = P;

    fn is_closed(&self) -> bool {
        true
    }

    fn iter_points(&self) -> impl Iterator<Item = &'_ Self::Point> {
        ClosedContour::iter_points(self)
    }
}

/// Iterator of contour points.
#[derive(Debug, Clone)]
pub struct ContourPointsIterator<'a, P, Iter>
where
    Iter: Iterator<Item = &'a P>,
{
    points_iter: Iter,
    is_closed: bool,
    first_point: Option<&'a P>,
}

impl<'a, P: 'a, Iter> ContourPointsIterator<'a, P, Iter>
where
    Iter: Iterator<Item = &'a P>,
{
    fn new(points_iter: Iter, is_closed: bool) -> Self {
        Self {
            points_iter,
            is_closed,
            first_point: None,
        }
    }
}

impl<'a, P, Iter> Iterator for ContourPointsIterator<'a, P, Iter>
where
    Iter: Iterator<Item = &'a P>,
{
    type Item = &'a P;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.points_iter.next();
        if self.is_closed && self.first_point.is_none() {
            self.first_point = next;
        }

        if next.is_none() {
            self.first_point.take()
        } else {
            next
        }
    }
}

/// Iterator of contour segments.
#[derive(Debug, Clone)]
pub struct ContourSegmentIterator<'a, P: 'a, Iter>
where
    Iter: Iterator<Item = &'a P>,
{
    points_iter: ContourPointsIterator<'a, P, Iter>,
    prev_point: Option<&'a P>,
}

impl<'a, P, Iter> ContourSegmentIterator<'a, P, Iter>
where
    Iter: Iterator<Item = &'a P>,
{
    fn new(points_iter: ContourPointsIterator<'a, P, Iter>) -> Self {
        Self {
            points_iter,
            prev_point: None,
        }
    }
}

impl<'a, P, Iter> Iterator for ContourSegmentIterator<'a, P, Iter>
where
    Iter: Iterator<Item = &'a P>,
{
    type Item = Segment<'a, P>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let next_point = self.points_iter.next()?;
            if let Some(prev) = self.prev_point.replace(next_point) {
                return Some(Segment(prev, next_point));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Point;

    #[test]
    fn iter_points_closing() {
        let contour =
            crate::impls::Contour::open(vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)]);
        assert_eq!(contour.iter_points_closing().count(), 2);
        assert_eq!(
            contour.iter_points_closing().last(),
            Some(&Point::new(1.0, 1.0))
        );

        let contour =
            crate::impls::ClosedContour::new(vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)]);
        assert_eq!(contour.iter_points_closing().count(), 3);
        assert_eq!(
            contour.iter_points_closing().last(),
            Some(&Point::new(0.0, 0.0))
        );
    }

    #[test]
    fn iter_segments() {
        let contour = crate::impls::Contour::open(vec![Point::new(0.0, 0.0)]);
        assert_eq!(contour.iter_segments().count(), 0);

        let contour =
            crate::impls::Contour::open(vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)]);
        assert_eq!(contour.iter_segments().count(), 1);
        assert_eq!(
            contour.iter_segments().last(),
            Some(Segment(&Point::new(0.0, 0.0), &Point::new(1.0, 1.0)))
        );

        let contour =
            crate::impls::ClosedContour::new(vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)]);
        assert_eq!(contour.iter_segments().count(), 2);
        assert_eq!(
            contour.iter_segments().last(),
            Some(Segment(&Point::new(1.0, 1.0), &Point::new(0.0, 0.0)))
        );
    }
}
