use geomeasure_types::geo::Crs;
use serde::{Deserialize, Serialize};

use crate::ellipsoid::GEO_NONE;

/// Configuration of a [`DistanceArea`](crate::DistanceArea) calculator.
///
/// Missing fields take their default values when deserialized, so an empty object describes a
/// Cartesian calculator for geographic WGS84 coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeasureConfiguration {
    ellipsoid: String,
    source_crs: Crs,
}

impl Default for MeasureConfiguration {
    fn default() -> Self {
        Self {
            ellipsoid: GEO_NONE.to_string(),
            source_crs: Crs::WGS84,
        }
    }
}

impl MeasureConfiguration {
    /// Name of the ellipsoid.
    pub fn ellipsoid(&self) -> &str {
        &self.ellipsoid
    }

    /// Sets the name of the ellipsoid.
    pub fn with_ellipsoid(mut self, ellipsoid: impl Into<String>) -> Self {
        self.ellipsoid = ellipsoid.into();
        self
    }

    /// Sets the name of the ellipsoid.
    pub fn set_ellipsoid(&mut self, ellipsoid: impl Into<String>) {
        self.ellipsoid = ellipsoid.into();
    }

    /// Reference system of the measured geometries.
    pub fn source_crs(&self) -> &Crs {
        &self.source_crs
    }

    /// Sets the reference system of the measured geometries.
    pub fn with_source_crs(mut self, source_crs: Crs) -> Self {
        self.source_crs = source_crs;
        self
    }

    /// Sets the reference system of the measured geometries.
    pub fn set_source_crs(&mut self, source_crs: Crs) {
        self.source_crs = source_crs;
    }
}
