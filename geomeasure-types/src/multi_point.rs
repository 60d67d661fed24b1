/// Geometry consisting of several points.
pub trait MultiPoint {
    /// Point type.
    type Point;

    /// Iterator over points.
    fn iter_points(&self) -> impl Iterator<Item = &'_ Self::Point>;
}
