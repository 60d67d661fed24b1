//! Geometries, reference frames, coordinate transforms and measurement units consumed by the
//! `geomeasure` calculator.
//!
//! The geometry model is deliberately small: a [`Point`] value type with optional `z` and `m`
//! ordinates, contours (line strings and rings), polygons, their multi-part counterparts and a
//! closed [`Geom`] enum that ties them together.
//!
//! Coordinate reference systems ([`geo::Crs`]) know whether they are geographic and what
//! their map units are, and can produce a [`geo::Transform`] into geographic coordinates.

pub mod cartesian;
pub mod error;
pub mod geo;
pub mod impls;
pub mod units;

mod contour;
mod geometry;
mod multi_contour;
mod multi_point;
mod multi_polygon;
mod point;
mod polygon;
mod segment;

pub use contour::{ClosedContour, Contour, ContourPointsIterator, ContourSegmentIterator};
pub use geometry::Geom;
pub use multi_contour::MultiContour;
pub use multi_point::MultiPoint;
pub use multi_polygon::MultiPolygon;
pub use point::Point;
pub use polygon::Polygon;
pub use segment::Segment;
