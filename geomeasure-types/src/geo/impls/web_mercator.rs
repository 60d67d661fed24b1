use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

use crate::error::TransformError;
use crate::geo::datum::Datum;
use crate::geo::traits::transform::{Transform, TransformDirection};
use crate::point::Point;

/// Spherical mercator projection (EPSG:3857) on the semi-major axis of a datum.
///
/// [`TransformDirection::Forward`] unprojects mercator coordinates into longitude and latitude,
/// [`TransformDirection::Reverse`] projects them back. The poles cannot be projected and are
/// reported as [`TransformError::OutOfDomain`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct WebMercator {
    datum: Datum,
}

impl WebMercator {
    /// Creates a new projection on the given datum.
    pub fn new(datum: Datum) -> Self {
        Self { datum }
    }

    fn project(&self, point: &Point) -> Result<Point, TransformError> {
        if !point.is_finite() || point.y().abs() >= 90.0 {
            return Err(TransformError::OutOfDomain {
                x: point.x(),
                y: point.y(),
            });
        }

        let r = self.datum.semimajor();
        let x = r * point.x().to_radians();
        let y = r * (FRAC_PI_4 + point.y().to_radians() / 2.0).tan().ln();

        if x.is_finite() && y.is_finite() {
            Ok(point.with_xy(x, y))
        } else {
            Err(TransformError::OutOfDomain {
                x: point.x(),
                y: point.y(),
            })
        }
    }

    fn unproject(&self, point: &Point) -> Result<Point, TransformError> {
        if !point.is_finite() {
            return Err(TransformError::OutOfDomain {
                x: point.x(),
                y: point.y(),
            });
        }

        let r = self.datum.semimajor();
        let lat = 2.0 * (point.y() / r).exp().atan() - FRAC_PI_2;
        let lon = point.x() / r;

        Ok(point.with_xy(lon.to_degrees(), lat.to_degrees()))
    }
}

impl Default for WebMercator {
    fn default() -> Self {
        Self::new(Datum::WGS84)
    }
}

impl Transform for WebMercator {
    fn transform(
        &self,
        point: &Point,
        direction: TransformDirection,
    ) -> Result<Point, TransformError> {
        match direction {
            TransformDirection::Forward => self.unproject(point),
            TransformDirection::Reverse => self.project(point),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use assert_matches::assert_matches;

    #[test]
    fn round_trip() {
        let projection = WebMercator::default();
        let geo = Point::new(30.0, 60.0).with_z(12.0);
        let projected = projection
            .transform(&geo, TransformDirection::Reverse)
            .expect("projectable");
        assert_abs_diff_eq!(projected.x(), 3_339_584.723_798_207, epsilon = 1e-6);
        assert_abs_diff_eq!(projected.y(), 8_399_737.889_818_357, epsilon = 1e-6);
        assert_eq!(projected.z(), Some(12.0));

        let back = projection
            .transform(&projected, TransformDirection::Forward)
            .expect("unprojectable");
        assert_abs_diff_eq!(back, geo, epsilon = 1e-9);
    }

    #[test]
    fn pole_is_out_of_domain() {
        let projection = WebMercator::default();
        assert_matches!(
            projection.transform(&Point::new(0.0, 90.0), TransformDirection::Reverse),
            Err(TransformError::OutOfDomain { .. })
        );
        assert_matches!(
            projection.transform(&Point::new(f64::NAN, 0.0), TransformDirection::Forward),
            Err(TransformError::OutOfDomain { .. })
        );
    }

    #[test]
    fn in_place() {
        let projection = WebMercator::default();
        let (mut x, mut y, mut z) = (0.0, 0.0, 5.0);
        projection
            .transform_in_place(&mut x, &mut y, &mut z, TransformDirection::Forward)
            .expect("valid point");
        assert_abs_diff_eq!(x, 0.0);
        assert_abs_diff_eq!(y, 0.0);
        assert_eq!(z, 5.0);
    }
}
