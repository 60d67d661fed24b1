//! Vincenty's solutions of the inverse and direct geodesic problems, geodesic lines, and the
//! search for the latitude at which a geodesic crosses the antimeridian.

use std::f64::consts::PI;

use geographiclib_rs::{DirectGeodesic, Geodesic, InverseGeodesic};
use geomeasure_types::geo::GeoPoint;
use geomeasure_types::Point;
use log::{trace, warn};

use crate::ellipsoid::Spheroid;

/// Iteration stops once successive values change by less than this (radians).
const CONVERGENCE: f64 = 1.0e-12;
const INVERSE_MAX_ITERATIONS: usize = 20;
const DIRECT_MAX_ITERATIONS: usize = 100;

/// Antimeridian search stops once the candidate longitude is this close to 180 degrees.
const ANTIMERIDIAN_TOLERANCE: f64 = 1.0e-8;
const ANTIMERIDIAN_MAX_ITERATIONS: usize = 100;
/// Brackets wider than this (degrees of longitude) are narrowed by bisection rather than by
/// proportional steps.
const BISECTION_WIDTH: f64 = 5.0;

/// Solution of the inverse geodesic problem between two points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InverseSolution {
    /// Length of the geodesic in meters. Negative if the iteration did not converge.
    pub distance: f64,
    /// Azimuth at the first point, radians clockwise from north.
    pub course1: f64,
    /// Reverse azimuth at the second point, radians clockwise from north.
    pub course2: f64,
}

impl InverseSolution {
    const NOT_CONVERGED: Self = Self {
        distance: -1.0,
        course1: f64::NAN,
        course2: f64::NAN,
    };

    const COINCIDENT: Self = Self {
        distance: 0.0,
        course1: 0.0,
        course2: 0.0,
    };

    /// False if the solver failed to converge, in which case the azimuths are `NaN`.
    pub fn is_converged(&self) -> bool {
        self.distance >= 0.0
    }
}

/// Latitude at which a segment crosses the antimeridian.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AntimeridianCrossing {
    /// Latitude of the crossing in degrees.
    pub latitude: f64,
    /// Position of the crossing along the segment, `0` at the first input point and `1` at the
    /// second.
    pub fraction: f64,
}

impl Spheroid {
    /// Solves the inverse geodesic problem: distance and azimuths between two geographic
    /// points.
    ///
    /// Coincident points give a zero distance. For nearly antipodal points the solution may not
    /// converge, which is reported by a negative distance (see [`InverseSolution::is_converged`]).
    pub fn compute_distance_bearing(
        &self,
        p1: &impl GeoPoint<Num = f64>,
        p2: &impl GeoPoint<Num = f64>,
    ) -> InverseSolution {
        if double_near(p1.lon(), p2.lon()) && double_near(p1.lat(), p2.lat()) {
            return InverseSolution::COINCIDENT;
        }

        let a = self.semi_major;
        let b = self.semi_minor;
        let f = self.flattening();

        let l = p2.lon_rad() - p1.lon_rad();
        let (sin_u1, cos_u1) = ((1.0 - f) * p1.lat_rad().tan()).atan().sin_cos();
        let (sin_u2, cos_u2) = ((1.0 - f) * p2.lat_rad().tan()).atan().sin_cos();

        let mut lambda = l;
        let mut lambda_p = 2.0 * PI;

        let mut sin_lambda = 0.0;
        let mut cos_lambda = 0.0;
        let mut sin_sigma = 0.0;
        let mut cos_sigma = 0.0;
        let mut sigma = 0.0;
        let mut cos_sq_alpha = 0.0;
        let mut cos2_sigma_m = 0.0;
        let mut tu1 = 0.0;
        let mut tu2 = 0.0;

        let mut iterations = 0;
        while (lambda - lambda_p).abs() > CONVERGENCE {
            if iterations == INVERSE_MAX_ITERATIONS {
                trace!("Inverse geodesic did not converge after {iterations} iterations");
                return InverseSolution::NOT_CONVERGED;
            }
            iterations += 1;

            (sin_lambda, cos_lambda) = lambda.sin_cos();
            tu1 = cos_u2 * sin_lambda;
            tu2 = cos_u1 * sin_u2 - sin_u1 * cos_u2 * cos_lambda;
            sin_sigma = (tu1 * tu1 + tu2 * tu2).sqrt();
            cos_sigma = sin_u1 * sin_u2 + cos_u1 * cos_u2 * cos_lambda;
            sigma = sin_sigma.atan2(cos_sigma);

            let sin_alpha = if sin_sigma == 0.0 {
                0.0
            } else {
                cos_u1 * cos_u2 * sin_lambda / sin_sigma
            };
            cos_sq_alpha = (1.0 - sin_alpha * sin_alpha).max(0.0);

            // Equatorial lines have no vertex.
            cos2_sigma_m = if cos_sq_alpha == 0.0 {
                0.0
            } else {
                cos_sigma - 2.0 * sin_u1 * sin_u2 / cos_sq_alpha
            };

            let c = f / 16.0 * cos_sq_alpha * (4.0 + f * (4.0 - 3.0 * cos_sq_alpha));
            lambda_p = lambda;
            lambda = l
                + (1.0 - c)
                    * f
                    * sin_alpha
                    * (sigma
                        + c * sin_sigma
                            * (cos2_sigma_m
                                + c * cos_sigma * (-1.0 + 2.0 * cos2_sigma_m * cos2_sigma_m)));
        }

        let u_sq = cos_sq_alpha * (a * a - b * b) / (b * b);
        let big_a =
            1.0 + u_sq / 16384.0 * (4096.0 + u_sq * (-768.0 + u_sq * (320.0 - 175.0 * u_sq)));
        let big_b = u_sq / 1024.0 * (256.0 + u_sq * (-128.0 + u_sq * (74.0 - 47.0 * u_sq)));
        let delta_sigma = big_b
            * sin_sigma
            * (cos2_sigma_m
                + big_b / 4.0
                    * (cos_sigma * (-1.0 + 2.0 * cos2_sigma_m * cos2_sigma_m)
                        - big_b / 6.0
                            * cos2_sigma_m
                            * (-3.0 + 4.0 * sin_sigma * sin_sigma)
                            * (-3.0 + 4.0 * cos2_sigma_m * cos2_sigma_m)));

        InverseSolution {
            distance: b * big_a * (sigma - delta_sigma),
            course1: tu1.atan2(tu2),
            course2: (cos_u1 * sin_lambda).atan2(-sin_u1 * cos_u2 + cos_u1 * sin_u2 * cos_lambda)
                + PI,
        }
    }

    /// Solves the direct geodesic problem: the point at `distance` meters from `p` along the
    /// geodesic leaving it with azimuth `bearing` (degrees clockwise from north).
    ///
    /// The returned longitude is not normalized and may fall outside of `[-180, 180]`. If the
    /// iteration does not settle within 100 steps the last approximation is returned and a
    /// warning is logged.
    pub fn destination(&self, p: &impl GeoPoint<Num = f64>, distance: f64, bearing: f64) -> Point {
        let (point, converged) = self.solve_direct(p, distance, bearing);
        if !converged {
            warn!(
                "Direct geodesic did not converge after {DIRECT_MAX_ITERATIONS} iterations, \
                 using the last approximation"
            );
        }

        point
    }

    fn solve_direct(
        &self,
        p: &impl GeoPoint<Num = f64>,
        distance: f64,
        bearing: f64,
    ) -> (Point, bool) {
        let a = self.semi_major;
        let b = self.semi_minor;
        let f = self.flattening();

        let (sin_alpha1, cos_alpha1) = bearing.to_radians().sin_cos();
        let tan_u1 = (1.0 - f) * p.lat_rad().tan();
        let cos_u1 = 1.0 / (1.0 + tan_u1 * tan_u1).sqrt();
        let sin_u1 = tan_u1 * cos_u1;
        let sigma1 = tan_u1.atan2(cos_alpha1);
        let sin_alpha = cos_u1 * sin_alpha1;
        let cos_sq_alpha = 1.0 - sin_alpha * sin_alpha;
        let u_sq = cos_sq_alpha * (a * a - b * b) / (b * b);
        let big_a =
            1.0 + u_sq / 16384.0 * (4096.0 + u_sq * (-768.0 + u_sq * (320.0 - 175.0 * u_sq)));
        let big_b = u_sq / 1024.0 * (256.0 + u_sq * (-128.0 + u_sq * (74.0 - 47.0 * u_sq)));

        let mut sigma = distance / (b * big_a);
        let mut sigma_p = 2.0 * PI;
        let mut sin_sigma = 0.0;
        let mut cos_sigma = 0.0;
        let mut cos2_sigma_m = 0.0;

        let mut iterations = 0;
        let converged = loop {
            if (sigma - sigma_p).abs() <= CONVERGENCE {
                break true;
            }
            if iterations == DIRECT_MAX_ITERATIONS {
                break false;
            }
            iterations += 1;

            cos2_sigma_m = (2.0 * sigma1 + sigma).cos();
            (sin_sigma, cos_sigma) = sigma.sin_cos();
            let delta_sigma = big_b
                * sin_sigma
                * (cos2_sigma_m
                    + big_b / 4.0
                        * (cos_sigma * (-1.0 + 2.0 * cos2_sigma_m * cos2_sigma_m)
                            - big_b / 6.0
                                * cos2_sigma_m
                                * (-3.0 + 4.0 * sin_sigma * sin_sigma)
                                * (-3.0 + 4.0 * cos2_sigma_m * cos2_sigma_m)));
            sigma_p = sigma;
            sigma = distance / (b * big_a) + delta_sigma;
        };

        let tmp = sin_u1 * sin_sigma - cos_u1 * cos_sigma * cos_alpha1;
        let lat2 = (sin_u1 * cos_sigma + cos_u1 * sin_sigma * cos_alpha1)
            .atan2((1.0 - f) * (sin_alpha * sin_alpha + tmp * tmp).sqrt());
        let lambda =
            (sin_sigma * sin_alpha1).atan2(cos_u1 * cos_sigma - sin_u1 * sin_sigma * cos_alpha1);
        let c = f / 16.0 * cos_sq_alpha * (4.0 + f * (4.0 - 3.0 * cos_sq_alpha));
        let omega = lambda
            - (1.0 - c)
                * f
                * sin_alpha
                * (sigma
                    + c * sin_sigma
                        * (cos2_sigma_m
                            + c * cos_sigma * (-1.0 + 2.0 * cos2_sigma_m * cos2_sigma_m)));

        (Point::new(p.lon() + omega.to_degrees(), lat2.to_degrees()), converged)
    }

    /// Geodesic between two geographic points that can be walked by distance.
    ///
    /// Unlike [`Spheroid::compute_distance_bearing`], the line is solved with Karney's
    /// algorithm and exists for nearly antipodal points too. Returns `None` only if the
    /// coordinates are not finite.
    pub fn inverse_line(
        &self,
        p1: &impl GeoPoint<Num = f64>,
        p2: &impl GeoPoint<Num = f64>,
    ) -> Option<GeodesicLine> {
        let geodesic = Geodesic::new(self.semi_major, self.flattening());
        let (distance, azimuth, _, _): (f64, f64, f64, f64) =
            geodesic.inverse(p1.lat(), p1.lon(), p2.lat(), p2.lon());
        if !distance.is_finite() || !azimuth.is_finite() {
            return None;
        }

        Some(GeodesicLine {
            geodesic,
            start: Point::new(p1.lon(), p1.lat()),
            azimuth,
            distance,
        })
    }

    /// Latitude at which the geodesic between two geographic points crosses the antimeridian,
    /// and the fraction of the geodesic length from `p1` to the crossing.
    ///
    /// The crossing is searched for iteratively: wide brackets are halved, narrow ones are
    /// refined proportionally to the remaining longitude difference. If the geodesic cannot be
    /// computed the crossing is interpolated linearly.
    pub fn latitude_geodesic_crosses_antimeridian(
        &self,
        p1: &Point,
        p2: &Point,
    ) -> AntimeridianCrossing {
        let bracket = Bracket::new(p1, p2);
        let Bracket {
            mut p1x,
            mut p1y,
            mut p2x,
            mut p2y,
            reversed,
        } = bracket;

        let Some(mut line) = self.inverse_line(&Point::new(p1x, p1y), &Point::new(p2x, p2y))
        else {
            warn!("Cannot build geodesic between {p1:?} and {p2:?}, interpolating linearly");
            return bracket.linear_crossing();
        };

        let total_distance = line.distance();
        let mut offset = 0.0;
        let mut intersection = total_distance;
        let mut lat = p2y;
        let mut lon = p2x;

        let mut iterations = 0;
        while (lon - 180.0).abs() > ANTIMERIDIAN_TOLERANCE
            && iterations < ANTIMERIDIAN_MAX_ITERATIONS
        {
            if iterations > 0 && (p2x - p1x).abs() > BISECTION_WIDTH {
                if lon < 180.0 {
                    offset += intersection;
                    p1x = lon;
                    p1y = lat;
                } else {
                    p2x = lon;
                    p2y = lat;
                }

                match self.inverse_line(&Point::new(p1x, p1y), &Point::new(p2x, p2y)) {
                    Some(narrowed) => line = narrowed,
                    None => break,
                }
                intersection = line.distance() * 0.5;
            } else {
                intersection *= (180.0 - p1x) / (lon - p1x);
            }

            let position = line.position(intersection);
            lat = position.y();
            lon = position.x();
            if lon < 0.0 {
                lon += 360.0;
            }

            iterations += 1;
            trace!("Antimeridian search iteration {iterations}: lon = {lon}, lat = {lat}");
        }

        let fraction = if total_distance > 0.0 {
            (offset + intersection) / total_distance
        } else {
            0.0
        };

        AntimeridianCrossing {
            latitude: lat,
            fraction: if reversed { 1.0 - fraction } else { fraction },
        }
    }
}

/// Geodesic starting at a point with a given azimuth and length.
#[derive(Debug, Clone)]
pub struct GeodesicLine {
    geodesic: Geodesic,
    start: Point,
    azimuth: f64,
    distance: f64,
}

impl GeodesicLine {
    /// Length of the geodesic in meters.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Initial azimuth in degrees.
    pub fn azimuth(&self) -> f64 {
        self.azimuth
    }

    /// Point at `s` meters from the start of the line, with longitude in `[-180, 180]`.
    pub fn position(&self, s: f64) -> Point {
        let (lat, lon): (f64, f64) =
            self.geodesic.direct(self.start.y(), self.start.x(), self.azimuth, s);
        Point::new(lon, lat)
    }
}

/// Segment endpoints rearranged so that the first lies west of the antimeridian and the second
/// east of it, with longitudes in `[0, 360)`.
#[derive(Debug, Clone, Copy)]
struct Bracket {
    p1x: f64,
    p1y: f64,
    p2x: f64,
    p2y: f64,
    reversed: bool,
}

impl Bracket {
    fn new(p1: &Point, p2: &Point) -> Self {
        let shift = |x: f64| if x < -120.0 { x + 360.0 } else { x };
        let x1 = shift(p1.x());
        let x2 = shift(p2.x());

        if x1 < 180.0 {
            Self {
                p1x: x1,
                p1y: p1.y(),
                p2x: x2,
                p2y: p2.y(),
                reversed: false,
            }
        } else {
            Self {
                p1x: x2,
                p1y: p2.y(),
                p2x: x1,
                p2y: p1.y(),
                reversed: true,
            }
        }
    }

    fn linear_crossing(&self) -> AntimeridianCrossing {
        let fraction = (180.0 - self.p1x) / (self.p2x - self.p1x);
        AntimeridianCrossing {
            latitude: self.p1y + fraction * (self.p2y - self.p1y),
            fraction: if self.reversed { 1.0 - fraction } else { fraction },
        }
    }
}

/// Latitude at which the straight segment between two points crosses the antimeridian when
/// longitude and latitude are treated as plane coordinates.
pub(crate) fn linear_antimeridian_crossing(p1: &Point, p2: &Point) -> AntimeridianCrossing {
    Bracket::new(p1, p2).linear_crossing()
}

fn double_near(a: f64, b: f64) -> bool {
    const EPSILON: f64 = 4.0 * f64::EPSILON;
    (a - b).abs() <= EPSILON
}
