use crate::polygon::Polygon;

/// Geometry consisting of several polygons.
pub trait MultiPolygon {
    /// Polygon type.
    type Polygon: Polygon;

    /// Iterator over polygons.
    fn polygons(&self) -> impl Iterator<Item = &Self::Polygon>;
}
