use serde::{Deserialize, Serialize};

use crate::impls::{Contour, MultiContour, MultiPoint, MultiPolygon, Polygon};
use crate::multi_point::MultiPoint as _;
use crate::point::Point;

/// Geometry of any supported kind.
///
/// Measurement code dispatches on the variant rather than on virtual methods, so adding a new
/// kind of geometry means every `match` over `Geom` has to decide what to do with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Geom<P = Point> {
    /// Point geometry.
    Point(P),
    /// MultiPoint geometry.
    MultiPoint(MultiPoint<P>),
    /// Contour (line string or ring) geometry.
    Contour(Contour<P>),
    /// MultiContour geometry.
    MultiContour(MultiContour<P>),
    /// Polygon geometry.
    Polygon(Polygon<P>),
    /// MultiPolygon geometry.
    MultiPolygon(MultiPolygon<P>),
    /// Heterogeneous collection of geometries.
    Collection(Vec<Geom<P>>),
}

impl<P> Geom<P> {
    /// Topological dimension of the geometry: `0` for points, `1` for contours and `2` for
    /// polygons. A collection has the highest dimension of its members, an empty one has `0`.
    pub fn dimension(&self) -> u8 {
        match self {
            Geom::Point(_) | Geom::MultiPoint(_) => 0,
            Geom::Contour(_) | Geom::MultiContour(_) => 1,
            Geom::Polygon(_) | Geom::MultiPolygon(_) => 2,
            Geom::Collection(parts) => parts.iter().map(Geom::dimension).max().unwrap_or(0),
        }
    }

    /// True if the geometry contains no points.
    pub fn is_empty(&self) -> bool {
        match self {
            Geom::Point(_) => false,
            Geom::MultiPoint(v) => v.parts().is_empty(),
            Geom::Contour(v) => v.is_empty(),
            Geom::MultiContour(v) => v.parts().iter().all(|c| c.is_empty()),
            Geom::Polygon(v) => v.outer_contour.points.is_empty(),
            Geom::MultiPolygon(v) => v.parts().iter().all(|p| p.outer_contour.points.is_empty()),
            Geom::Collection(parts) => parts.iter().all(Geom::is_empty),
        }
    }

    /// True if the geometry is a collection of parts rather than a single part.
    pub fn is_multipart(&self) -> bool {
        matches!(
            self,
            Geom::MultiPoint(_)
                | Geom::MultiContour(_)
                | Geom::MultiPolygon(_)
                | Geom::Collection(_)
        )
    }

    fn any_point(&self, predicate: &impl Fn(&P) -> bool) -> bool {
        match self {
            Geom::Point(p) => predicate(p),
            Geom::MultiPoint(v) => v.iter_points().any(predicate),
            Geom::Contour(v) => v.iter().any(predicate),
            Geom::MultiContour(v) => v.parts().iter().any(|c| c.iter().any(predicate)),
            Geom::Polygon(v) => polygon_any(v, predicate),
            Geom::MultiPolygon(v) => v.parts().iter().any(|p| polygon_any(p, predicate)),
            Geom::Collection(parts) => parts.iter().any(|g| g.any_point(predicate)),
        }
    }
}

impl Geom<Point> {
    /// True if any point of the geometry has a `z` value.
    pub fn has_z(&self) -> bool {
        self.any_point(&|p: &Point| p.z().is_some())
    }

    /// True if any point of the geometry has a measure value.
    pub fn has_m(&self) -> bool {
        self.any_point(&|p: &Point| p.m().is_some())
    }
}

fn polygon_any<P>(polygon: &Polygon<P>, predicate: &impl Fn(&P) -> bool) -> bool {
    polygon.outer_contour.points.iter().any(predicate)
        || polygon
            .inner_contours
            .iter()
            .any(|c| c.points.iter().any(predicate))
}

impl<P> From<P> for Geom<P> {
    fn from(value: P) -> Self {
        Self::Point(value)
    }
}

impl<P> From<Contour<P>> for Geom<P> {
    fn from(value: Contour<P>) -> Self {
        Self::Contour(value)
    }
}

impl<P> From<MultiContour<P>> for Geom<P> {
    fn from(value: MultiContour<P>) -> Self {
        Self::MultiContour(value)
    }
}

impl<P> From<Polygon<P>> for Geom<P> {
    fn from(value: Polygon<P>) -> Self {
        Self::Polygon(value)
    }
}

impl<P> From<MultiPolygon<P>> for Geom<P> {
    fn from(value: MultiPolygon<P>) -> Self {
        Self::MultiPolygon(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impls::ClosedContour;

    fn square() -> Polygon<Point> {
        ClosedContour::new(vec![
            Point::new(0.0, 0.0),
            Point::new(0.0, 1.0),
            Point::new(1.0, 1.0),
            Point::new(1.0, 0.0),
        ])
        .into()
    }

    #[test]
    fn dimension() {
        assert_eq!(Geom::Point(Point::new(0.0, 0.0)).dimension(), 0);
        assert_eq!(Geom::<Point>::Contour(Contour::open(vec![])).dimension(), 1);
        assert_eq!(Geom::Polygon(square()).dimension(), 2);

        let collection = Geom::Collection(vec![
            Geom::Point(Point::new(0.0, 0.0)),
            Geom::Polygon(square()),
        ]);
        assert_eq!(collection.dimension(), 2);
        assert_eq!(Geom::<Point>::Collection(vec![]).dimension(), 0);
    }

    #[test]
    fn emptiness() {
        assert!(Geom::<Point>::Contour(Contour::open(vec![])).is_empty());
        assert!(!Geom::Polygon(square()).is_empty());
        assert!(Geom::<Point>::Collection(vec![]).is_empty());
        assert!(Geom::<Point>::Collection(vec![]).is_multipart());
    }

    #[test]
    fn z_and_m() {
        let line = Geom::Contour(Contour::open(vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 1.0).with_z(10.0),
        ]));
        assert!(line.has_z());
        assert!(!line.has_m());

        let collection = Geom::Collection(vec![
            Geom::Polygon(square()),
            Geom::Point(Point::new(0.0, 0.0).with_m(1.0)),
        ]);
        assert!(!collection.has_z());
        assert!(collection.has_m());
    }
}
