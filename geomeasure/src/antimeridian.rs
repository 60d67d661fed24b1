//! Breaking lines at the antimeridian and sampling geodesics.

use geomeasure_types::error::TransformError;
use geomeasure_types::geo::TransformDirection;
use geomeasure_types::impls::{Contour, MultiContour};
use geomeasure_types::{Contour as _, Geom, Point};
use log::{debug, warn};

use crate::distance_area::DistanceArea;
use crate::geodesic::{linear_antimeridian_crossing, AntimeridianCrossing, GeodesicLine};

/// Consecutive longitudes on opposite sides of these values are taken to cross the
/// antimeridian rather than the prime meridian.
const CROSSING_LONGITUDE: f64 = 120.0;

/// Wraps a longitude in degrees into `[-180, 180]`.
pub fn wrap_longitude(lon: f64) -> f64 {
    let lon = lon % 360.0;
    if lon > 180.0 {
        lon - 360.0
    } else if lon < -180.0 {
        lon + 360.0
    } else {
        lon
    }
}

fn crosses_antimeridian(prev_lon: f64, lon: f64) -> bool {
    (prev_lon < -CROSSING_LONGITUDE && lon > CROSSING_LONGITUDE)
        || (prev_lon > CROSSING_LONGITUDE && lon < -CROSSING_LONGITUDE)
}

fn side_of(lon: f64) -> f64 {
    if lon < -CROSSING_LONGITUDE {
        -180.0
    } else {
        180.0
    }
}

fn interpolate(from: Option<f64>, to: Option<f64>, fraction: f64) -> Option<f64> {
    match (from, to) {
        (Some(from), Some(to)) => Some(from + (to - from) * fraction),
        _ => None,
    }
}

impl DistanceArea {
    /// Latitude at which the line between two geographic points crosses the antimeridian,
    /// together with the fraction of the line from `p1` to the crossing.
    ///
    /// With an ellipsoid the line is the geodesic between the points, otherwise it is a
    /// straight line in longitude and latitude.
    pub fn latitude_geodesic_crosses_antimeridian(
        &self,
        p1: &Point,
        p2: &Point,
    ) -> AntimeridianCrossing {
        match self.spheroid() {
            Some(spheroid) => spheroid.latitude_geodesic_crosses_antimeridian(p1, p2),
            None => linear_antimeridian_crossing(p1, p2),
        }
    }

    /// Splits linear geometries into parts that do not cross the antimeridian.
    ///
    /// Every segment that crosses the antimeridian is broken at the crossing: the current part
    /// ends on one side of the antimeridian and the next one starts at the same latitude on the
    /// other side. `z` and measure values of the inserted points are interpolated along the
    /// segment. Non-linear geometries are returned unchanged, linear ones are returned as a
    /// [`Geom::MultiContour`] of open contours.
    ///
    /// If a point of a line cannot be transformed, that line and all remaining ones are
    /// returned unsplit.
    pub fn split_geometry_at_antimeridian(&self, geometry: &Geom) -> Geom {
        if geometry.dimension() != 1 {
            return geometry.clone();
        }

        let mut lines = Vec::new();
        collect_lines(geometry, &mut lines);

        let mut result = MultiContour::default();
        let mut remaining = lines.into_iter();
        for line in remaining.by_ref() {
            if line.is_empty() {
                continue;
            }

            match self.split_line(line) {
                Ok(parts) => parts.into_iter().for_each(|part| result.push(part)),
                Err(err) => {
                    warn!(
                        "Failed to transform a line, unable to split it at the antimeridian: {err}"
                    );
                    result.push(line.clone());
                    break;
                }
            }
        }

        for line in remaining.filter(|line| !line.is_empty()) {
            result.push(line.clone());
        }

        Geom::MultiContour(result)
    }

    fn split_line(&self, line: &Contour<Point>) -> Result<Vec<Contour<Point>>, TransformError> {
        let is_geographic = self.source_crs().is_geographic();

        let mut parts = Vec::new();
        let mut points = Vec::with_capacity(line.len());
        let mut prev: Option<(Point, Point)> = None;

        for source in line.iter_points_closing() {
            let mut point = *source;
            if is_geographic {
                point = point.with_xy(wrap_longitude(point.x()), point.y());
            }

            let geographic = self.to_geographic(&point)?;

            if let Some((prev_point, prev_geographic)) = prev {
                if crosses_antimeridian(prev_geographic.x(), geographic.x()) {
                    let crossing =
                        self.latitude_geodesic_crosses_antimeridian(&prev_geographic, &geographic);
                    let z = interpolate(prev_point.z(), point.z(), crossing.fraction);
                    let m = interpolate(prev_point.m(), point.m(), crossing.fraction);

                    let closing = self.to_source(
                        side_of(prev_geographic.x()),
                        crossing.latitude,
                        z,
                        m,
                    )?;
                    if closing.is_finite() {
                        points.push(closing);
                    }
                    parts.push(Contour::open(std::mem::take(&mut points)));

                    let opening =
                        self.to_source(side_of(geographic.x()), crossing.latitude, z, m)?;
                    if opening.is_finite() {
                        points.push(opening);
                    }
                }
            }

            points.push(point);
            prev = Some((point, geographic));
        }

        parts.push(Contour::open(points));
        Ok(parts)
    }

    fn to_source(
        &self,
        lon: f64,
        lat: f64,
        z: Option<f64>,
        m: Option<f64>,
    ) -> Result<Point, TransformError> {
        let mut point = Point::new(lon, lat);
        if let Some(z) = z {
            point = point.with_z(z);
        }
        if let Some(m) = m {
            point = point.with_m(m);
        }

        self.transformer()
            .transform(&point, TransformDirection::Reverse)
    }

    /// Samples the geodesic between two points every `interval` meters.
    ///
    /// The first sample is `p1` and the last one is exactly `p2`. If `break_line` is set, the
    /// samples are split into separate parts where the geodesic crosses the antimeridian, with
    /// both parts ending at the crossing point.
    ///
    /// Without an ellipsoid the result is the single segment between the points. If the end
    /// points cannot be transformed the result is empty. If a sample cannot be transformed back
    /// into the source reference system, the samples produced so far are returned.
    ///
    /// The geodesic exists for any pair of points, nearly antipodal ones included.
    pub fn geodesic_line(
        &self,
        p1: &Point,
        p2: &Point,
        interval: f64,
        break_line: bool,
    ) -> Vec<Vec<Point>> {
        let Some(spheroid) = self.spheroid() else {
            return vec![vec![*p1, *p2]];
        };

        let (pp1, pp2) = match (self.to_geographic(p1), self.to_geographic(p2)) {
            (Ok(pp1), Ok(pp2)) => (pp1, pp2),
            (Err(err), _) | (_, Err(err)) => {
                warn!("Failed to transform a point, unable to calculate geodesic line: {err}");
                return vec![];
            }
        };

        if interval.is_nan() || interval <= 0.0 {
            warn!("Invalid geodesic sampling interval {interval}, using a single segment");
            return vec![vec![*p1, *p2]];
        }

        let Some(line) = spheroid.inverse_line(&pp1, &pp2) else {
            warn!("Cannot build geodesic between {pp1:?} and {pp2:?}, using a single segment");
            return vec![vec![*p1, *p2]];
        };

        self.sample_geodesic(&line, (p1, pp1), (p2, pp2), interval, break_line, |lon, lat| {
            self.to_source(lon, lat, None, None)
        })
    }

    /// Walks `line` every `interval` meters. Each end is given both in the source reference
    /// system and in geographic coordinates.
    fn sample_geodesic(
        &self,
        line: &GeodesicLine,
        (p1, pp1): (&Point, Point),
        (p2, pp2): (&Point, Point),
        interval: f64,
        break_line: bool,
        to_source: impl Fn(f64, f64) -> Result<Point, TransformError>,
    ) -> Vec<Vec<Point>> {
        let total_distance = line.distance();
        debug!("Sampling geodesic of {total_distance} m every {interval} m");

        let mut result = Vec::new();
        let mut current = vec![*p1];
        let mut prev = Point::new(wrap_longitude(pp1.x()), pp1.y());
        let mut d = interval;
        let mut last_run = d >= total_distance;

        loop {
            let geographic = if last_run {
                Point::new(wrap_longitude(pp2.x()), pp2.y())
            } else {
                let position = line.position(d);
                Point::new(wrap_longitude(position.x()), position.y())
            };

            if break_line && crosses_antimeridian(prev.x(), geographic.x()) {
                let crossing = self.latitude_geodesic_crosses_antimeridian(&prev, &geographic);
                let closing = match to_source(side_of(prev.x()), crossing.latitude) {
                    Ok(point) => point,
                    Err(err) => {
                        warn!("Failed to transform a geodesic sample: {err}");
                        break;
                    }
                };
                if closing.is_finite() {
                    current.push(closing);
                }
                result.push(std::mem::take(&mut current));

                match to_source(side_of(geographic.x()), crossing.latitude) {
                    Ok(opening) if opening.is_finite() => current.push(opening),
                    Ok(_) => {}
                    Err(err) => {
                        warn!("Failed to transform a geodesic sample: {err}");
                        break;
                    }
                }
            }

            prev = geographic;

            if last_run {
                current.push(*p2);
                break;
            }

            match to_source(geographic.x(), geographic.y()) {
                Ok(point) => current.push(point),
                Err(err) => {
                    warn!("Failed to transform a geodesic sample: {err}");
                    break;
                }
            }

            d += interval;
            if d >= total_distance {
                last_run = true;
            }
        }

        if !current.is_empty() {
            result.push(current);
        }

        result
    }
}

fn collect_lines<'a>(geometry: &'a Geom, lines: &mut Vec<&'a Contour<Point>>) {
    match geometry {
        Geom::Contour(contour) => lines.push(contour),
        Geom::MultiContour(contours) => lines.extend(contours.parts()),
        Geom::Collection(parts) => parts.iter().for_each(|part| collect_lines(part, lines)),
        Geom::Point(_) | Geom::MultiPoint(_) | Geom::Polygon(_) | Geom::MultiPolygon(_) => {}
    }
}
