use serde::{Deserialize, Serialize};

/// Size and shape of the ellipsoid a reference system is defined on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Datum {
    semimajor: f64,
    inv_flattening: f64,
}

impl Datum {
    /// WGS84 datum.
    pub const WGS84: Self = Datum {
        semimajor: 6_378_137.0,
        inv_flattening: 298.257223563,
    };

    /// Creates a new datum from the semi-major axis (meters) and inverse flattening.
    ///
    /// An inverse flattening of `0` describes a sphere.
    pub const fn new(semimajor: f64, inv_flattening: f64) -> Self {
        Self {
            semimajor,
            inv_flattening,
        }
    }

    /// Semi-major axis in meters.
    pub fn semimajor(&self) -> f64 {
        self.semimajor
    }

    /// Inverse flattening.
    pub fn inv_flattening(&self) -> f64 {
        self.inv_flattening
    }

    /// Semi-minor axis in meters.
    pub fn semiminor(&self) -> f64 {
        if self.inv_flattening == 0.0 {
            self.semimajor
        } else {
            self.semimajor - self.semimajor / self.inv_flattening
        }
    }
}

impl Default for Datum {
    fn default() -> Self {
        Self::WGS84
    }
}
