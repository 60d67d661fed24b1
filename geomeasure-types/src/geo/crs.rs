use serde::{Deserialize, Serialize};

use crate::error::TransformError;
use crate::geo::datum::Datum;
use crate::geo::impls::{IdentityTransform, WebMercator};
use crate::geo::traits::transform::Transform;
use crate::units::DistanceUnit;

/// Coordinate reference system.
///
/// A reference system is either geographic (coordinates are longitude and latitude in degrees
/// on the datum ellipsoid) or projected onto a plane, in which case it knows the units of its
/// coordinates and how to convert them into geographic coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Crs {
    datum: Datum,
    projection_type: ProjectionType,
    units: DistanceUnit,
}

/// Projection used by a [`Crs`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum ProjectionType {
    /// Coordinates are not projected. The reference system is geographic.
    None,
    /// Spherical mercator on the semi-major axis of the datum (EPSG:3857).
    WebMercator,
    /// Projection given by a `geodesy` operator definition, e.g. `"utm zone=32"`.
    Other(String),
    /// Planar coordinates with no known relation to the globe.
    Unknown,
}

impl Crs {
    /// Geographic coordinates on WGS84 ellipsoid (EPSG:4326).
    pub const WGS84: Crs = Crs {
        datum: Datum::WGS84,
        projection_type: ProjectionType::None,
        units: DistanceUnit::Degrees,
    };

    /// Web mercator projection (EPSG:3857).
    pub const EPSG3857: Crs = Crs {
        datum: Datum::WGS84,
        projection_type: ProjectionType::WebMercator,
        units: DistanceUnit::Meters,
    };

    /// Geographic reference system on the given datum.
    pub const fn geographic(datum: Datum) -> Self {
        Self {
            datum,
            projection_type: ProjectionType::None,
            units: DistanceUnit::Degrees,
        }
    }

    /// Projected reference system on WGS84 defined by a `geodesy` operator definition.
    pub fn projected(definition: impl Into<String>, units: DistanceUnit) -> Self {
        Self {
            datum: Datum::WGS84,
            projection_type: ProjectionType::Other(definition.into()),
            units,
        }
    }

    /// Plane coordinates in the given units that cannot be related to the globe.
    pub const fn planar(units: DistanceUnit) -> Self {
        Self {
            datum: Datum::WGS84,
            projection_type: ProjectionType::Unknown,
            units,
        }
    }

    /// Datum of the reference system.
    pub fn datum(&self) -> Datum {
        self.datum
    }

    /// Projection of the reference system.
    pub fn projection_type(&self) -> &ProjectionType {
        &self.projection_type
    }

    /// True if coordinates in this system are longitude and latitude.
    pub fn is_geographic(&self) -> bool {
        matches!(self.projection_type, ProjectionType::None)
    }

    /// Units of the coordinates of this system.
    pub fn map_units(&self) -> DistanceUnit {
        if self.is_geographic() {
            DistanceUnit::Degrees
        } else {
            self.units
        }
    }

    /// Creates a transform from this reference system into geographic coordinates.
    ///
    /// Returns an error if the relation of the system to the globe is unknown, or if its
    /// projection definition cannot be parsed.
    pub fn transform_to_geographic(&self) -> Result<Box<dyn Transform>, TransformError> {
        match &self.projection_type {
            ProjectionType::None => Ok(Box::new(IdentityTransform)),
            ProjectionType::WebMercator => Ok(Box::new(WebMercator::new(self.datum))),
            #[cfg(feature = "geodesy")]
            ProjectionType::Other(definition) => Ok(Box::new(
                crate::geo::impls::GeodesyTransform::new(definition)?,
            )),
            #[cfg(not(feature = "geodesy"))]
            ProjectionType::Other(definition) => Err(TransformError::Unsupported(format!(
                "projection '{definition}' requires the `geodesy` feature"
            ))),
            ProjectionType::Unknown => Err(TransformError::Unsupported(
                "reference system has no known relation to the globe".into(),
            )),
        }
    }
}

impl Default for Crs {
    fn default() -> Self {
        Self::WGS84
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn units() {
        assert!(Crs::WGS84.is_geographic());
        assert_eq!(Crs::WGS84.map_units(), DistanceUnit::Degrees);
        assert!(!Crs::EPSG3857.is_geographic());
        assert_eq!(Crs::EPSG3857.map_units(), DistanceUnit::Meters);
        assert_eq!(
            Crs::planar(DistanceUnit::Feet).map_units(),
            DistanceUnit::Feet
        );
    }

    #[test]
    fn unknown_projection_has_no_transform() {
        assert_matches!(
            Crs::planar(DistanceUnit::Meters).transform_to_geographic(),
            Err(TransformError::Unsupported(_))
        );
        assert!(Crs::WGS84.transform_to_geographic().is_ok());
        assert!(Crs::EPSG3857.transform_to_geographic().is_ok());
    }

    #[test]
    fn serde_round_trip() {
        let crs = Crs::projected("utm zone=32", DistanceUnit::Meters);
        let json = serde_json::to_string(&crs).expect("serialize");
        let restored: Crs = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(restored, crs);
    }
}
