//! Conversion of input coordinates into the geographic frame of the ellipsoid.

use std::sync::Arc;

use geomeasure_types::error::TransformError;
use geomeasure_types::geo::{Crs, Transform, TransformDirection};
use geomeasure_types::Point;
use log::debug;

/// Converts points between the source reference system of a calculator and the geographic
/// reference system of its ellipsoid.
///
/// The transform is rebuilt whenever either reference system changes. If the pair of systems
/// cannot be related, the error is kept and returned by every transform call.
///
/// When the datums of the two systems differ, no datum shift parameters are known, and the
/// geographic coordinates of the source datum are used unchanged on the destination ellipsoid
/// (a ballpark shift).
#[derive(Debug, Clone)]
pub struct CoordinateTransformer {
    source: Crs,
    destination: Crs,
    transform: Result<Arc<dyn Transform>, TransformError>,
}

impl CoordinateTransformer {
    /// Creates a new transformer between `source` and `destination`.
    pub fn new(source: Crs, destination: Crs) -> Self {
        let transform = Self::build(&source, &destination);
        Self {
            source,
            destination,
            transform,
        }
    }

    fn build(source: &Crs, destination: &Crs) -> Result<Arc<dyn Transform>, TransformError> {
        if !destination.is_geographic() {
            return Err(TransformError::Unsupported(format!(
                "destination reference system {destination:?} is not geographic"
            )));
        }

        if source.datum() != destination.datum() {
            debug!(
                "Using ballpark datum shift from {:?} to {:?}",
                source.datum(),
                destination.datum()
            );
        }

        source.transform_to_geographic().map(Arc::from)
    }

    /// Reference system of the input coordinates.
    pub fn source_crs(&self) -> &Crs {
        &self.source
    }

    /// Geographic reference system coordinates are transformed into.
    pub fn destination_crs(&self) -> &Crs {
        &self.destination
    }

    /// True if the source and destination datums differ and coordinates are moved between
    /// them without a datum shift.
    pub fn is_ballpark(&self) -> bool {
        self.source.datum() != self.destination.datum()
    }

    /// Replaces the source reference system.
    pub fn set_source_crs(&mut self, source: Crs) {
        self.transform = Self::build(&source, &self.destination);
        self.source = source;
    }

    /// Replaces the destination reference system.
    pub fn set_destination_crs(&mut self, destination: Crs) {
        self.transform = Self::build(&self.source, &destination);
        self.destination = destination;
    }

    /// Transforms a point. `Forward` goes from the source system into the destination one.
    pub fn transform(
        &self,
        point: &Point,
        direction: TransformDirection,
    ) -> Result<Point, TransformError> {
        match &self.transform {
            Ok(transform) => transform.transform(point, direction),
            Err(err) => Err(err.clone()),
        }
    }

    /// Transforms coordinates in place. On error the values are left untouched.
    pub fn transform_in_place(
        &self,
        x: &mut f64,
        y: &mut f64,
        z: &mut f64,
        direction: TransformDirection,
    ) -> Result<(), TransformError> {
        match &self.transform {
            Ok(transform) => transform.transform_in_place(x, y, z, direction),
            Err(err) => Err(err.clone()),
        }
    }
}

impl Default for CoordinateTransformer {
    fn default() -> Self {
        Self::new(Crs::WGS84, Crs::WGS84)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use assert_matches::assert_matches;
    use geomeasure_types::geo::Datum;
    use geomeasure_types::units::DistanceUnit;

    #[test]
    fn geographic_source_is_identity() {
        let transformer = CoordinateTransformer::default();
        let point = Point::new(12.0, 34.0).with_z(5.0);
        assert_eq!(
            transformer.transform(&point, TransformDirection::Forward),
            Ok(point)
        );
        assert!(!transformer.is_ballpark());
    }

    #[test]
    fn web_mercator_source() {
        let transformer = CoordinateTransformer::new(Crs::EPSG3857, Crs::WGS84);
        let geo = transformer
            .transform(&Point::new(0.0, 0.0), TransformDirection::Forward)
            .expect("transformable");
        assert_abs_diff_eq!(geo, Point::new(0.0, 0.0), epsilon = 1e-12);

        let (mut x, mut y, mut z) = (30.0, 60.0, 0.0);
        transformer
            .transform_in_place(&mut x, &mut y, &mut z, TransformDirection::Reverse)
            .expect("projectable");
        assert_abs_diff_eq!(x, 3_339_584.723_798_207, epsilon = 1e-6);
    }

    #[test]
    fn unknown_source_fails() {
        let mut transformer = CoordinateTransformer::default();
        transformer.set_source_crs(Crs::planar(DistanceUnit::Meters));
        assert_matches!(
            transformer.transform(&Point::new(0.0, 0.0), TransformDirection::Forward),
            Err(TransformError::Unsupported(_))
        );

        let (mut x, mut y, mut z) = (1.0, 2.0, 3.0);
        assert!(transformer
            .transform_in_place(&mut x, &mut y, &mut z, TransformDirection::Forward)
            .is_err());
        assert_eq!((x, y, z), (1.0, 2.0, 3.0));
    }

    #[test]
    fn destination_must_be_geographic() {
        let mut transformer = CoordinateTransformer::default();
        transformer.set_destination_crs(Crs::EPSG3857);
        assert_matches!(
            transformer.transform(&Point::new(0.0, 0.0), TransformDirection::Forward),
            Err(TransformError::Unsupported(_))
        );

        transformer.set_destination_crs(Crs::WGS84);
        assert!(transformer
            .transform(&Point::new(0.0, 0.0), TransformDirection::Forward)
            .is_ok());
    }

    #[test]
    fn different_datums_use_ballpark_shift() {
        let bessel = Crs::geographic(Datum::new(6_377_397.155, 299.152_812_8));
        let mut transformer = CoordinateTransformer::default();
        transformer.set_destination_crs(bessel.clone());

        assert!(transformer.is_ballpark());
        assert_eq!(transformer.destination_crs(), &bessel);
        let point = Point::new(13.4, 52.5);
        assert_eq!(
            transformer.transform(&point, TransformDirection::Forward),
            Ok(point)
        );
    }
}
