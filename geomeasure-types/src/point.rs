use approx::AbsDiffEq;
use serde::{Deserialize, Serialize};

use crate::cartesian::{CartesianPoint2d, NewCartesianPoint2d};
use crate::geo::{GeoPoint, NewGeoPoint};

/// A point with `x`/`y` coordinates and optional `z` and `m` (measure) values.
///
/// In a geographic reference system `x` is longitude and `y` is latitude (both in degrees), in
/// a projected one they are easting and northing in the map units of the system.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    x: f64,
    y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    z: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    m: Option<f64>,
}

impl Point {
    /// Creates a new 2d point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            z: None,
            m: None,
        }
    }

    /// X coordinate (longitude or easting).
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Y coordinate (latitude or northing).
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Z value, if the point has one.
    pub fn z(&self) -> Option<f64> {
        self.z
    }

    /// Measure value, if the point has one.
    pub fn m(&self) -> Option<f64> {
        self.m
    }

    /// Returns a copy of the point with the given `z` value.
    pub fn with_z(mut self, z: f64) -> Self {
        self.z = Some(z);
        self
    }

    /// Returns a copy of the point with the given measure value.
    pub fn with_m(mut self, m: f64) -> Self {
        self.m = Some(m);
        self
    }

    /// Returns a copy of the point with `x` and `y` replaced, keeping `z` and `m`.
    pub fn with_xy(mut self, x: f64, y: f64) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    /// True if both `x` and `y` are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Moves the point by `distance` in the direction of `azimuth` on a plane.
    ///
    /// `azimuth` is given in radians, clockwise from north (the positive `y` direction).
    pub fn project(&self, distance: f64, azimuth: f64) -> Self {
        let (sin, cos) = azimuth.sin_cos();
        self.with_xy(self.x + distance * sin, self.y + distance * cos)
    }
}

impl CartesianPoint2d for Point {
    type Num = f64;

    fn x(&self) -> f64 {
        self.x
    }

    fn y(&self) -> f64 {
        self.y
    }
}

impl NewCartesianPoint2d for Point {
    fn new(x: f64, y: f64) -> Self {
        Point::new(x, y)
    }
}

impl GeoPoint for Point {
    type Num = f64;

    fn lat(&self) -> f64 {
        self.y
    }

    fn lon(&self) -> f64 {
        self.x
    }
}

impl NewGeoPoint for Point {
    fn latlon(lat: f64, lon: f64) -> Self {
        Point::new(lon, lat)
    }
}

impl AbsDiffEq for Point {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.x.abs_diff_eq(&other.x, epsilon) && self.y.abs_diff_eq(&other.y, epsilon)
    }
}

/// Creates a new [`Point`] from latitude and longitude values (in degrees).
///
/// ```
/// use geomeasure_types::geo::GeoPoint;
/// use geomeasure_types::latlon;
///
/// let point = latlon!(38.0, 52.0);
/// assert_eq!(point.lat(), 38.0);
/// assert_eq!(point.lon(), 52.0);
/// ```
#[macro_export]
macro_rules! latlon {
    ($lat:expr, $lon:expr) => {
        <$crate::Point as $crate::geo::NewGeoPoint<f64>>::latlon($lat, $lon)
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn project_north_and_east() {
        let p = Point::new(10.0, 20.0);
        assert_abs_diff_eq!(p.project(5.0, 0.0), Point::new(10.0, 25.0), epsilon = 1e-12);
        assert_abs_diff_eq!(
            p.project(5.0, std::f64::consts::FRAC_PI_2),
            Point::new(15.0, 20.0),
            epsilon = 1e-12
        );
    }

    #[test]
    fn with_xy_keeps_z_and_m() {
        let p = Point::new(1.0, 2.0).with_z(3.0).with_m(4.0).with_xy(5.0, 6.0);
        assert_eq!(p.x(), 5.0);
        assert_eq!(p.y(), 6.0);
        assert_eq!(p.z(), Some(3.0));
        assert_eq!(p.m(), Some(4.0));
    }

    #[test]
    fn latlon_macro_swaps_axes() {
        let p = latlon!(45.0, 10.0);
        assert_eq!(p.x(), 10.0);
        assert_eq!(p.y(), 45.0);
    }

    #[test]
    fn serde_skips_missing_ordinates() {
        let json = serde_json::to_string(&Point::new(1.0, 2.0)).expect("serialize");
        assert_eq!(json, r#"{"x":1.0,"y":2.0}"#);

        let p: Point = serde_json::from_str(r#"{"x":1.0,"y":2.0,"z":3.0}"#).expect("deserialize");
        assert_eq!(p.z(), Some(3.0));
        assert_eq!(p.m(), None);
    }
}
