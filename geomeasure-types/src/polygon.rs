use crate::contour::Contour;
use crate::segment::Segment;

/// Polygon geometry. Polygon consists of one outer contour, and zero or more inner contours.
///
/// Inner contours represent *holes* in a polygon.
pub trait Polygon {
    /// Contour type.
    type Contour: Contour;

    /// Outer contour of the polygon.
    fn outer_contour(&self) -> &Self::Contour;
    /// Iterates over inner contours.
    fn inner_contours(&self) -> impl Iterator<Item = &'_ Self::Contour>;

    /// Iterates over all contours of the polygon starting with the outer one.
    fn iter_contours(&self) -> impl Iterator<Item = &'_ Self::Contour> {
        std::iter::once(self.outer_contour()).chain(self.inner_contours())
    }

    /// Iterates over all segments of the polygon contour lines.
    fn iter_segments(
        &self,
    ) -> impl Iterator<Item = Segment<'_, <Self::Contour as Contour>::Point>> {
        self.iter_contours().flat_map(Self::Contour::iter_segments)
    }
}
