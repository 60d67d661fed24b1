//! The distance and area calculator.

use geomeasure_types::error::TransformError;
use geomeasure_types::geo::{Crs, TransformDirection};
use geomeasure_types::impls::Polygon;
use geomeasure_types::units::{AreaUnit, DistanceUnit};
use geomeasure_types::{
    Contour as _, Geom, MultiContour as _, MultiPolygon as _, Point, Polygon as _, Segment,
};
use log::{debug, warn};

use crate::area::planar_polygon_area;
use crate::config::MeasureConfiguration;
use crate::ellipsoid::{BuiltinEllipsoids, EllipsoidRegistry, Spheroid, GEO_NONE};
use crate::error::MeasureError;
use crate::geodesic::InverseSolution;
use crate::transformer::CoordinateTransformer;

/// Geographic start points beyond this latitude are not projected by
/// [`DistanceArea::measure_line_projected`].
const MAX_PROJECTED_LATITUDE: f64 = 85.05115;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum MeasureType {
    Length,
    Area,
}

/// Calculator of distances, areas and bearings.
///
/// A calculator is configured with the reference system of the input geometries (see
/// [`DistanceArea::set_source_crs`]) and, optionally, with an ellipsoid (see
/// [`DistanceArea::set_ellipsoid`]). Without an ellipsoid all measurements are Cartesian and
/// expressed in the map units of the source reference system. With an ellipsoid, input points
/// are transformed into geographic coordinates and measured on the ellipsoid, and results are
/// expressed in meters and square meters.
///
/// Failures to transform a point never escape the measurement methods: the affected
/// measurement degrades to `0` and a warning is logged.
#[derive(Debug, Clone)]
pub struct DistanceArea {
    ellipsoid: String,
    spheroid: Option<Spheroid>,
    transformer: CoordinateTransformer,
}

impl Default for DistanceArea {
    fn default() -> Self {
        Self::new()
    }
}

impl DistanceArea {
    /// Creates a Cartesian calculator for geographic WGS84 coordinates.
    pub fn new() -> Self {
        Self {
            ellipsoid: GEO_NONE.to_string(),
            spheroid: None,
            transformer: CoordinateTransformer::new(Crs::WGS84, Crs::WGS84),
        }
    }

    /// Creates a calculator from a configuration, resolving the ellipsoid name with the
    /// built-in registry.
    pub fn from_config(config: &MeasureConfiguration) -> Result<Self, MeasureError> {
        Self::from_config_with(config, &BuiltinEllipsoids)
    }

    /// Creates a calculator from a configuration, resolving the ellipsoid name with the given
    /// registry.
    pub fn from_config_with(
        config: &MeasureConfiguration,
        registry: &impl EllipsoidRegistry,
    ) -> Result<Self, MeasureError> {
        let mut calculator = Self::new().with_source_crs(config.source_crs().clone());
        calculator.set_ellipsoid_with(config.ellipsoid(), registry)?;
        Ok(calculator)
    }

    /// Sets the ellipsoid and returns the calculator.
    pub fn with_ellipsoid(mut self, name: &str) -> Result<Self, MeasureError> {
        self.set_ellipsoid(name)?;
        Ok(self)
    }

    /// Sets the source reference system and returns the calculator.
    pub fn with_source_crs(mut self, crs: Crs) -> Self {
        self.set_source_crs(crs);
        self
    }

    /// True if measurements are done on an ellipsoid.
    pub fn will_use_ellipsoid(&self) -> bool {
        self.spheroid.is_some()
    }

    /// Name of the ellipsoid in use, [`GEO_NONE`] for Cartesian measurements.
    pub fn ellipsoid(&self) -> &str {
        &self.ellipsoid
    }

    /// The ellipsoid measurements are done on, if any.
    pub fn spheroid(&self) -> Option<&Spheroid> {
        self.spheroid.as_ref()
    }

    /// Sets the ellipsoid by its name in the built-in registry.
    ///
    /// [`GEO_NONE`] turns ellipsoidal measurements off. Unknown names are rejected and leave
    /// the calculator unchanged.
    pub fn set_ellipsoid(&mut self, name: &str) -> Result<(), MeasureError> {
        self.set_ellipsoid_with(name, &BuiltinEllipsoids)
    }

    /// Sets the ellipsoid by its name in the given registry.
    pub fn set_ellipsoid_with(
        &mut self,
        name: &str,
        registry: &impl EllipsoidRegistry,
    ) -> Result<(), MeasureError> {
        if name == GEO_NONE {
            debug!("Ellipsoidal measurements turned off");
            self.ellipsoid = GEO_NONE.to_string();
            self.spheroid = None;
            return Ok(());
        }

        let params = registry
            .lookup(name)
            .ok_or_else(|| MeasureError::UnknownEllipsoid(name.to_string()))?;

        if params.use_custom_parameters {
            self.set_ellipsoid_params(params.semi_major, params.semi_minor);
        } else {
            debug!(
                "Using ellipsoid {name}: a = {}, b = {}, 1/f = {}",
                params.semi_major, params.semi_minor, params.inverse_flattening
            );
            self.ellipsoid = name.to_string();
            self.spheroid = Some(Spheroid::from(&params));
            self.transformer.set_destination_crs(params.crs);
        }

        Ok(())
    }

    /// Sets a custom ellipsoid by its semi-major and semi-minor axes in meters.
    pub fn set_ellipsoid_params(&mut self, semi_major: f64, semi_minor: f64) {
        self.ellipsoid = format!("PARAMETER:{semi_major}:{semi_minor}");
        self.spheroid = Some(Spheroid::new(semi_major, semi_minor));
        debug!("Using custom ellipsoid {}", self.ellipsoid);
    }

    /// Sets the reference system of the input geometries.
    pub fn set_source_crs(&mut self, crs: Crs) {
        self.transformer.set_source_crs(crs);
    }

    /// Reference system of the input geometries.
    pub fn source_crs(&self) -> &Crs {
        self.transformer.source_crs()
    }

    pub(crate) fn transformer(&self) -> &CoordinateTransformer {
        &self.transformer
    }

    /// Units of the lengths returned by the calculator.
    pub fn length_units(&self) -> DistanceUnit {
        if self.will_use_ellipsoid() {
            DistanceUnit::Meters
        } else {
            self.source_crs().map_units()
        }
    }

    /// Units of the areas returned by the calculator.
    pub fn area_units(&self) -> AreaUnit {
        if self.will_use_ellipsoid() {
            AreaUnit::SquareMeters
        } else {
            self.source_crs().map_units().to_area_unit()
        }
    }

    /// Converts a length returned by the calculator into the given units.
    pub fn convert_length_measurement(&self, length: f64, to: DistanceUnit) -> f64 {
        length * self.length_units().factor_to(to)
    }

    /// Converts an area returned by the calculator into the given units.
    pub fn convert_area_measurement(&self, area: f64, to: AreaUnit) -> f64 {
        area * self.area_units().factor_to(to)
    }

    /// Length of a linear geometry. Multi-part geometries and collections measure as the sum
    /// of their parts. Points and polygons have zero length.
    ///
    /// On an ellipsoid, segments whose endpoints are nearly antipodal may have no solution of
    /// the inverse problem (see [`InverseSolution::is_converged`]). Such segments contribute
    /// nothing to the total and a warning is logged, so a line made of a single such segment
    /// measures `0`.
    pub fn measure_length(&self, geometry: &Geom) -> f64 {
        self.measure(geometry, MeasureType::Length)
    }

    /// Area of a surface geometry: the area of the outer ring minus the areas of the holes.
    /// Multi-part geometries and collections measure as the sum of their parts. Points and
    /// lines have zero area.
    pub fn measure_area(&self, geometry: &Geom) -> f64 {
        self.measure(geometry, MeasureType::Area)
    }

    /// Perimeter of a surface geometry: the total length of all of its rings, holes included.
    /// Geometries of lower dimension have zero perimeter.
    pub fn measure_perimeter(&self, geometry: &Geom) -> f64 {
        if geometry.dimension() < 2 {
            return 0.0;
        }

        match geometry {
            Geom::Polygon(polygon) => self.polygon_perimeter(polygon),
            Geom::MultiPolygon(polygons) => polygons
                .polygons()
                .map(|polygon| self.polygon_perimeter(polygon))
                .sum(),
            Geom::Collection(parts) => parts.iter().map(|g| self.measure_perimeter(g)).sum(),
            Geom::Point(_) | Geom::MultiPoint(_) | Geom::Contour(_) | Geom::MultiContour(_) => {
                0.0
            }
        }
    }

    fn measure(&self, geometry: &Geom, measure_type: MeasureType) -> f64 {
        match (geometry, measure_type) {
            (Geom::Point(_) | Geom::MultiPoint(_), _) => 0.0,
            (Geom::Contour(contour), MeasureType::Length) => {
                absorb(self.line_length(contour.iter_points_closing()), "line")
            }
            (Geom::MultiContour(contours), MeasureType::Length) => contours
                .contours()
                .map(|contour| absorb(self.line_length(contour.iter_points_closing()), "line"))
                .sum(),
            (Geom::Polygon(polygon), MeasureType::Area) => {
                absorb(self.polygon_area(polygon), "polygon")
            }
            (Geom::MultiPolygon(polygons), MeasureType::Area) => polygons
                .polygons()
                .map(|polygon| absorb(self.polygon_area(polygon), "polygon"))
                .sum(),
            (Geom::Collection(parts), _) => {
                parts.iter().map(|part| self.measure(part, measure_type)).sum()
            }
            (Geom::Contour(_) | Geom::MultiContour(_), MeasureType::Area)
            | (Geom::Polygon(_) | Geom::MultiPolygon(_), MeasureType::Length) => 0.0,
        }
    }

    /// Length of the polyline through the given points.
    ///
    /// On an ellipsoid, segments whose endpoints are nearly antipodal may have no solution of
    /// the inverse problem (see [`InverseSolution::is_converged`]). Such segments contribute
    /// nothing to the total and a warning is logged, so a line made of a single such segment
    /// measures `0`.
    pub fn measure_line(&self, points: &[Point]) -> f64 {
        absorb(self.line_length(points), "line")
    }

    /// Length of the line between two points. Nearly antipodal points on an ellipsoid
    /// measure `0`, see [`DistanceArea::measure_line`].
    pub fn measure_line_between(&self, p1: &Point, p2: &Point) -> f64 {
        absorb(self.line_length([p1, p2]), "line")
    }

    /// Area of the ring through the given points. The ring does not need to repeat its first
    /// point.
    pub fn measure_polygon(&self, points: &[Point]) -> f64 {
        absorb(self.ring_area(points), "polygon")
    }

    fn line_length<'a>(
        &self,
        points: impl IntoIterator<Item = &'a Point>,
    ) -> Result<f64, TransformError> {
        let mut points = points.into_iter();
        let Some(first) = points.next() else {
            return Ok(0.0);
        };

        let Some(spheroid) = &self.spheroid else {
            let mut prev = first;
            let mut total = 0.0;
            for point in points {
                total += Segment(prev, point).length();
                prev = point;
            }

            return Ok(total);
        };

        let mut prev = self.to_geographic(first)?;
        let mut total = 0.0;
        for point in points {
            let next = self.to_geographic(point)?;
            let solution = spheroid.compute_distance_bearing(&prev, &next);
            if solution.is_converged() {
                total += solution.distance;
            } else {
                warn!("Geodesic between {prev:?} and {next:?} did not converge, segment skipped");
            }
            prev = next;
        }

        Ok(total)
    }

    fn polygon_area(&self, polygon: &Polygon<Point>) -> Result<f64, TransformError> {
        let mut area = self.ring_area(polygon.outer_contour.points())?;
        for hole in &polygon.inner_contours {
            area -= self.ring_area(hole.points())?;
        }

        Ok(area)
    }

    fn polygon_perimeter(&self, polygon: &Polygon<Point>) -> f64 {
        polygon
            .iter_contours()
            .map(|ring| absorb(self.line_length(ring.iter_points_closing()), "ring"))
            .sum()
    }

    fn ring_area(&self, points: &[Point]) -> Result<f64, TransformError> {
        if points.len() < 3 {
            return Ok(0.0);
        }

        match &self.spheroid {
            Some(spheroid) => {
                let geographic = points
                    .iter()
                    .map(|p| self.to_geographic(p))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(spheroid.polygon_area(&geographic))
            }
            None => Ok(planar_polygon_area(points)),
        }
    }

    /// Area of a ring given in geographic coordinates (or in source coordinates if no
    /// ellipsoid is used). No transformation is applied to the points.
    pub fn compute_polygon_area(&self, points: &[Point]) -> f64 {
        match &self.spheroid {
            Some(spheroid) => spheroid.polygon_area(points),
            None => planar_polygon_area(points),
        }
    }

    /// Cartesian area of a ring, in squared units of the coordinates.
    pub fn compute_polygon_flat_area(&self, points: &[Point]) -> f64 {
        planar_polygon_area(points)
    }

    /// Distance and azimuths between two points given in geographic coordinates.
    ///
    /// Without an ellipsoid the distance is Cartesian and the azimuths are measured on the
    /// plane.
    pub fn compute_distance_bearing(&self, p1: &Point, p2: &Point) -> InverseSolution {
        match &self.spheroid {
            Some(spheroid) => spheroid.compute_distance_bearing(p1, p2),
            None => {
                let course1 = planar_bearing(p1, p2);
                InverseSolution {
                    distance: Segment(p1, p2).length(),
                    course1,
                    course2: course1 + std::f64::consts::PI,
                }
            }
        }
    }

    /// Azimuth from `p1` to `p2` in radians, clockwise from north.
    ///
    /// Fails if the points cannot be transformed into geographic coordinates.
    pub fn bearing(&self, p1: &Point, p2: &Point) -> Result<f64, MeasureError> {
        match &self.spheroid {
            Some(spheroid) => {
                let pp1 = self.to_geographic(p1)?;
                let pp2 = self.to_geographic(p2)?;
                Ok(spheroid.compute_distance_bearing(&pp1, &pp2).course1)
            }
            None => Ok(planar_bearing(p1, p2)),
        }
    }

    /// Point at `distance` from `p` in the direction of `bearing` (degrees clockwise from
    /// north).
    ///
    /// With an ellipsoid, `p` is in geographic coordinates, the distance is in meters and the
    /// result is in geographic coordinates. Without one the point is moved on the plane.
    pub fn destination(&self, p: &Point, distance: f64, bearing: f64) -> Point {
        match &self.spheroid {
            Some(spheroid) => spheroid.destination(p, distance, bearing),
            None => p.project(distance, bearing.to_radians()),
        }
    }

    /// Projects a point by `distance` meters in the direction of `azimuth` (radians clockwise
    /// from north) and returns the length of the projected line in source units together with
    /// the projected point.
    ///
    /// For a geographic source with an ellipsoid the point is projected along the geodesic
    /// and the returned length is the Cartesian distance in degrees. Otherwise the point is
    /// projected on the plane and the requested distance is returned unchanged.
    pub fn measure_line_projected(&self, p1: &Point, distance: f64, azimuth: f64) -> (f64, Point) {
        let (result, p2) = match &self.spheroid {
            Some(spheroid) if self.source_crs().is_geographic() => {
                if !(-180.0..=180.0).contains(&p1.x())
                    || !(-MAX_PROJECTED_LATITUDE..=MAX_PROJECTED_LATITUDE).contains(&p1.y())
                {
                    warn!("Cannot project {p1:?} on the ellipsoid, the point is out of bounds");
                    return (0.0, *p1);
                }

                let p2 = spheroid.destination(p1, distance, azimuth.to_degrees());
                (Segment(p1, &p2).length(), p2)
            }
            _ => {
                let map_units = self.source_crs().map_units();
                let source_distance = if map_units != DistanceUnit::Meters {
                    distance * DistanceUnit::Meters.factor_to(map_units)
                } else {
                    distance
                };
                (distance, p1.project(source_distance, azimuth))
            }
        };

        debug!(
            "Projected {distance} m from {p1:?} with azimuth {azimuth} to {p2:?}, \
             length {result} {}",
            self.source_crs().map_units()
        );

        (result, p2)
    }

    pub(crate) fn to_geographic(&self, point: &Point) -> Result<Point, TransformError> {
        self.transformer
            .transform(point, TransformDirection::Forward)
    }
}

fn planar_bearing(p1: &Point, p2: &Point) -> f64 {
    let dx = p2.x() - p1.x();
    let dy = p2.y() - p1.y();
    dx.atan2(dy)
}

fn absorb(result: Result<f64, TransformError>, what: &str) -> f64 {
    result.unwrap_or_else(|err| {
        warn!("Failed to transform coordinates while measuring {what}: {err}");
        0.0
    })
}
