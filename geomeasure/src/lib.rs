//! Accurate distances, areas, perimeters, bearings and destination points, either on a flat
//! plane or on an ellipsoidal model of the Earth.
//!
//! The entry point is [`DistanceArea`]: a calculator configured with the reference system the
//! input geometries are expressed in and, optionally, an ellipsoid. Without an ellipsoid all
//! measurements are planar and reported in the map units of the reference system. With an
//! ellipsoid, points are transformed into geographic coordinates and measured with geodesic
//! solvers, and results are reported in meters and square meters.
//!
//! ```
//! use geomeasure::DistanceArea;
//! use geomeasure_types::impls::Contour;
//! use geomeasure_types::{Geom, Point};
//!
//! let mut calculator = DistanceArea::new();
//! calculator.set_ellipsoid("WGS84").expect("known ellipsoid");
//!
//! let line = Geom::Contour(Contour::open(vec![Point::new(0.0, 0.0), Point::new(0.0, 1.0)]));
//! let length = calculator.measure_length(&line);
//! assert!((length - 110_574.4).abs() < 0.1);
//! ```

mod antimeridian;
mod area;
mod config;
mod distance_area;
mod ellipsoid;
mod error;
mod geodesic;
mod transformer;

pub use antimeridian::wrap_longitude;
pub use area::{planar_polygon_area, AreaSeries};
pub use config::MeasureConfiguration;
pub use distance_area::DistanceArea;
pub use ellipsoid::{
    BuiltinEllipsoids, EllipsoidParameters, EllipsoidRegistry, Spheroid, GEO_NONE,
};
pub use error::MeasureError;
pub use geodesic::{AntimeridianCrossing, GeodesicLine, InverseSolution};
pub use transformer::CoordinateTransformer;
