//! Polygon area on an ellipsoid and on a plane.
//!
//! Ellipsoidal area follows the series expansion used by GRASS GIS: the area of a ring is
//! accumulated from the signed areas between each edge and the pole, with the latitude
//! integral expanded in powers of the squared eccentricity up to `e⁶`.

use std::f64::consts::{FRAC_PI_2, PI};

use geomeasure_types::cartesian::CartesianPoint2d;
use geomeasure_types::geo::GeoPoint;

use crate::ellipsoid::Spheroid;

const TWO_PI: f64 = 2.0 * PI;

/// Latitude differences (radians) below this are integrated with the mid-point rule.
const LATITUDE_THRESHOLD: f64 = 1.0e-6;

/// Coefficients of the ellipsoidal area series, derived from the ellipsoid axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AreaSeries {
    ae: f64,
    q_a: f64,
    q_b: f64,
    q_c: f64,
    qbar_a: f64,
    qbar_b: f64,
    qbar_c: f64,
    qbar_d: f64,
    q_p: f64,
    e: f64,
}

impl AreaSeries {
    /// Computes the coefficients for an ellipsoid with the given axes in meters.
    pub fn new(semi_major: f64, semi_minor: f64) -> Self {
        let a2 = semi_major * semi_major;
        let e2 = 1.0 - (semi_minor * semi_minor) / a2;
        let e4 = e2 * e2;
        let e6 = e4 * e2;

        let mut series = Self {
            ae: a2 * (1.0 - e2),
            q_a: (2.0 / 3.0) * e2,
            q_b: (3.0 / 5.0) * e4,
            q_c: (4.0 / 7.0) * e6,
            qbar_a: -1.0 - (2.0 / 3.0) * e2 - (3.0 / 5.0) * e4 - (4.0 / 7.0) * e6,
            qbar_b: (2.0 / 9.0) * e2 + (2.0 / 5.0) * e4 + (4.0 / 7.0) * e6,
            qbar_c: -(3.0 / 25.0) * e4 - (12.0 / 35.0) * e6,
            qbar_d: (4.0 / 49.0) * e6,
            q_p: 0.0,
            e: 0.0,
        };

        series.q_p = series.q(FRAC_PI_2);
        series.e = (4.0 * PI * series.q_p * series.ae).abs();
        series
    }

    /// Total surface area of the ellipsoid in square meters.
    pub fn total_area(&self) -> f64 {
        self.e
    }

    fn q(&self, x: f64) -> f64 {
        let sin_x = x.sin();
        let sin_x2 = sin_x * sin_x;

        sin_x * (1.0 + sin_x2 * (self.q_a + sin_x2 * (self.q_b + sin_x2 * self.q_c)))
    }

    fn qbar(&self, x: f64) -> f64 {
        let cos_x = x.cos();
        let cos_x2 = cos_x * cos_x;

        cos_x
            * (self.qbar_a
                + cos_x2 * (self.qbar_b + cos_x2 * (self.qbar_c + cos_x2 * self.qbar_d)))
    }

    /// Area of a ring given in geographic coordinates, in square meters.
    ///
    /// The ring does not need to repeat its first point. The result is never larger than half
    /// of the ellipsoid surface: a ring always encloses the smaller of the two regions it
    /// separates.
    pub fn ring_area<P: GeoPoint<Num = f64>>(&self, points: &[P]) -> f64 {
        let Some(last) = points.last() else {
            return 0.0;
        };

        let mut x2 = last.lon_rad();
        let mut y2 = last.lat_rad();
        let mut qbar2 = self.qbar(y2);
        let mut area = 0.0;

        for point in points {
            let x1 = x2;
            let y1 = y2;
            let qbar1 = qbar2;

            x2 = point.lon_rad();
            y2 = point.lat_rad();
            qbar2 = self.qbar(y2);

            if x1 > x2 {
                while x1 - x2 > PI {
                    x2 += TWO_PI;
                }
            } else if x2 > x1 {
                while x2 - x1 > PI {
                    x2 -= TWO_PI;
                }
            }

            let dx = x2 - x1;
            let dy = y2 - y1;
            area += if dy.abs() > LATITUDE_THRESHOLD {
                dx * (self.q_p - (qbar2 - qbar1) / dy)
            } else {
                dx * (self.q_p - self.q((y1 + y2) / 2.0))
            };
        }

        area *= self.ae;
        area = area.abs();

        if area > self.e {
            area = self.e;
        }
        if area > self.e / 2.0 {
            area = self.e - area;
        }

        area
    }
}

impl Spheroid {
    /// Area of a ring given in geographic coordinates, in square meters.
    ///
    /// See [`AreaSeries::ring_area`].
    pub fn polygon_area<P: GeoPoint<Num = f64>>(&self, points: &[P]) -> f64 {
        self.series.ring_area(points)
    }
}

/// Area of a ring on a plane, in squared units of the coordinates.
///
/// Uses the shoelace formula over the closed ring. The ring does not need to repeat its first
/// point, and the orientation of the ring does not affect the result.
pub fn planar_polygon_area<P: CartesianPoint2d<Num = f64>>(points: &[P]) -> f64 {
    let size = points.len();
    let mut area = 0.0;
    for i in 0..size {
        let current = &points[i];
        let next = &points[(i + 1) % size];
        area += current.x() * next.y() - current.y() * next.x();
    }

    (area / 2.0).abs()
}
