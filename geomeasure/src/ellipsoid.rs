//! Ellipsoid definitions and the registry they are looked up in.

use geomeasure_types::geo::{Crs, Datum};

use crate::area::AreaSeries;

/// Ellipsoid name that turns ellipsoidal calculations off.
pub const GEO_NONE: &str = "NONE";

/// Prefix of ellipsoid names that carry their axes inline: `PARAMETER:<semi-major>:<semi-minor>`.
const PARAMETER_PREFIX: &str = "PARAMETER";

/// Parameters of an ellipsoid returned by an [`EllipsoidRegistry`].
#[derive(Debug, Clone, PartialEq)]
pub struct EllipsoidParameters {
    /// Semi-major axis in meters.
    pub semi_major: f64,
    /// Semi-minor axis in meters.
    pub semi_minor: f64,
    /// Inverse flattening. Infinite for a sphere.
    pub inverse_flattening: f64,
    /// True if the ellipsoid was given by its axes rather than by a known name. Such ellipsoids
    /// have no reference system of their own.
    pub use_custom_parameters: bool,
    /// Geographic reference system on this ellipsoid.
    pub crs: Crs,
}

/// Source of ellipsoid definitions.
pub trait EllipsoidRegistry {
    /// Looks the ellipsoid up by its name. Returns `None` if the name is unknown.
    fn lookup(&self, name: &str) -> Option<EllipsoidParameters>;
}

/// Registry of well-known ellipsoids.
///
/// Besides the named entries, any `PARAMETER:<a>:<b>` name is accepted and produces an
/// ellipsoid with the given semi-major and semi-minor axes.
#[derive(Debug, Default, Copy, Clone)]
pub struct BuiltinEllipsoids;

struct BuiltinEllipsoid {
    acronym: &'static str,
    description: &'static str,
    semi_major: f64,
    inverse_flattening: f64,
}

// Inverse flattening of 0 marks a sphere.
const BUILTIN: &[BuiltinEllipsoid] = &[
    BuiltinEllipsoid {
        acronym: "WGS84",
        description: "WGS 84",
        semi_major: 6_378_137.0,
        inverse_flattening: 298.257_223_563,
    },
    BuiltinEllipsoid {
        acronym: "GRS80",
        description: "GRS 1980 (IUGG, 1980)",
        semi_major: 6_378_137.0,
        inverse_flattening: 298.257_222_101,
    },
    BuiltinEllipsoid {
        acronym: "WGS72",
        description: "WGS 72",
        semi_major: 6_378_135.0,
        inverse_flattening: 298.26,
    },
    BuiltinEllipsoid {
        acronym: "GRS67",
        description: "GRS 67 (IUGG 1967)",
        semi_major: 6_378_160.0,
        inverse_flattening: 298.247_167_427,
    },
    BuiltinEllipsoid {
        acronym: "intl",
        description: "International 1924 (Hayford 1909, 1910)",
        semi_major: 6_378_388.0,
        inverse_flattening: 297.0,
    },
    BuiltinEllipsoid {
        acronym: "Helmert",
        description: "Helmert 1906",
        semi_major: 6_378_200.0,
        inverse_flattening: 298.3,
    },
    BuiltinEllipsoid {
        acronym: "clrk66",
        description: "Clarke 1866",
        semi_major: 6_378_206.4,
        inverse_flattening: 294.978_698_213_9,
    },
    BuiltinEllipsoid {
        acronym: "clrk80",
        description: "Clarke 1880 mod.",
        semi_major: 6_378_249.145,
        inverse_flattening: 293.4663,
    },
    BuiltinEllipsoid {
        acronym: "bessel",
        description: "Bessel 1841",
        semi_major: 6_377_397.155,
        inverse_flattening: 299.152_812_8,
    },
    BuiltinEllipsoid {
        acronym: "krass",
        description: "Krassovsky, 1942",
        semi_major: 6_378_245.0,
        inverse_flattening: 298.3,
    },
    BuiltinEllipsoid {
        acronym: "airy",
        description: "Airy 1830",
        semi_major: 6_377_563.396,
        inverse_flattening: 299.324_964_6,
    },
    BuiltinEllipsoid {
        acronym: "mod_airy",
        description: "Modified Airy",
        semi_major: 6_377_340.189,
        inverse_flattening: 299.324_964_6,
    },
    BuiltinEllipsoid {
        acronym: "aust_SA",
        description: "Australian Natl & S. Amer. 1969",
        semi_major: 6_378_160.0,
        inverse_flattening: 298.25,
    },
    BuiltinEllipsoid {
        acronym: "evrst30",
        description: "Everest 1830",
        semi_major: 6_377_276.345,
        inverse_flattening: 300.8017,
    },
    BuiltinEllipsoid {
        acronym: "sphere",
        description: "Normal Sphere (r=6370997)",
        semi_major: 6_370_997.0,
        inverse_flattening: 0.0,
    },
];

impl BuiltinEllipsoids {
    /// Acronyms and descriptions of all named ellipsoids.
    pub fn list(&self) -> impl Iterator<Item = (&'static str, &'static str)> {
        BUILTIN
            .iter()
            .map(|ellipsoid| (ellipsoid.acronym, ellipsoid.description))
    }

    fn parse_parameters(name: &str) -> Option<EllipsoidParameters> {
        let mut parts = name.split(':');
        if parts.next()? != PARAMETER_PREFIX {
            return None;
        }

        let semi_major: f64 = parts.next()?.trim().parse().ok()?;
        let semi_minor: f64 = parts.next()?.trim().parse().ok()?;
        if parts.next().is_some() {
            return None;
        }

        Some(EllipsoidParameters {
            semi_major,
            semi_minor,
            inverse_flattening: semi_major / (semi_major - semi_minor),
            use_custom_parameters: true,
            crs: Crs::WGS84,
        })
    }
}

impl EllipsoidRegistry for BuiltinEllipsoids {
    fn lookup(&self, name: &str) -> Option<EllipsoidParameters> {
        if name.starts_with(PARAMETER_PREFIX) {
            return Self::parse_parameters(name);
        }

        let ellipsoid = BUILTIN.iter().find(|e| e.acronym == name)?;
        let datum = Datum::new(ellipsoid.semi_major, ellipsoid.inverse_flattening);
        let inverse_flattening = if ellipsoid.inverse_flattening == 0.0 {
            f64::INFINITY
        } else {
            ellipsoid.inverse_flattening
        };

        Some(EllipsoidParameters {
            semi_major: ellipsoid.semi_major,
            semi_minor: datum.semiminor(),
            inverse_flattening,
            use_custom_parameters: false,
            crs: Crs::geographic(datum),
        })
    }
}

/// Ellipsoid the calculator measures on, together with the coefficients derived from it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spheroid {
    pub(crate) semi_major: f64,
    pub(crate) semi_minor: f64,
    pub(crate) inverse_flattening: f64,
    pub(crate) series: AreaSeries,
}

impl Spheroid {
    /// Creates a spheroid from its semi-major and semi-minor axes in meters.
    pub fn new(semi_major: f64, semi_minor: f64) -> Self {
        Self::with_inverse_flattening(
            semi_major,
            semi_minor,
            semi_major / (semi_major - semi_minor),
        )
    }

    /// Creates a spheroid from axes and an explicitly given inverse flattening.
    pub fn with_inverse_flattening(
        semi_major: f64,
        semi_minor: f64,
        inverse_flattening: f64,
    ) -> Self {
        Self {
            semi_major,
            semi_minor,
            inverse_flattening,
            series: AreaSeries::new(semi_major, semi_minor),
        }
    }

    /// Semi-major axis in meters.
    pub fn semi_major(&self) -> f64 {
        self.semi_major
    }

    /// Semi-minor axis in meters.
    pub fn semi_minor(&self) -> f64 {
        self.semi_minor
    }

    /// Inverse flattening. Infinite for a sphere.
    pub fn inverse_flattening(&self) -> f64 {
        self.inverse_flattening
    }

    /// Flattening, `0` for a sphere.
    pub fn flattening(&self) -> f64 {
        1.0 / self.inverse_flattening
    }

    /// Coefficients of the ellipsoidal polygon area series.
    pub fn area_series(&self) -> &AreaSeries {
        &self.series
    }
}

impl From<&EllipsoidParameters> for Spheroid {
    fn from(params: &EllipsoidParameters) -> Self {
        Spheroid::with_inverse_flattening(
            params.semi_major,
            params.semi_minor,
            params.inverse_flattening,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use assert_matches::assert_matches;

    #[test]
    fn wgs84() {
        let params = BuiltinEllipsoids.lookup("WGS84").expect("known ellipsoid");
        assert_relative_eq!(params.semi_major, 6_378_137.0);
        assert_relative_eq!(params.semi_minor, 6_356_752.314_245, epsilon = 1e-5);
        assert_relative_eq!(params.inverse_flattening, 298.257_223_563);
        assert!(!params.use_custom_parameters);
        assert!(params.crs.is_geographic());
        assert_eq!(params.crs.datum(), Datum::WGS84);
    }

    #[test]
    fn sphere() {
        let params = BuiltinEllipsoids.lookup("sphere").expect("known ellipsoid");
        assert_eq!(params.semi_major, params.semi_minor);
        assert!(params.inverse_flattening.is_infinite());

        let spheroid = Spheroid::from(&params);
        assert_eq!(spheroid.flattening(), 0.0);
    }

    #[test]
    fn parameters() {
        let params = BuiltinEllipsoids
            .lookup("PARAMETER:6370997:6370000")
            .expect("valid parameters");
        assert!(params.use_custom_parameters);
        assert_relative_eq!(params.semi_major, 6_370_997.0);
        assert_relative_eq!(params.semi_minor, 6_370_000.0);
        assert_relative_eq!(params.inverse_flattening, 6_370_997.0 / 997.0);

        assert_matches!(BuiltinEllipsoids.lookup("PARAMETER:6370997"), None);
        assert_matches!(BuiltinEllipsoids.lookup("PARAMETER:a:b"), None);
        assert_matches!(BuiltinEllipsoids.lookup("PARAMETER:1:2:3"), None);
    }

    #[test]
    fn unknown() {
        assert_matches!(BuiltinEllipsoids.lookup("not an ellipsoid"), None);
        assert_matches!(BuiltinEllipsoids.lookup(GEO_NONE), None);
        assert_matches!(BuiltinEllipsoids.lookup("wgs84"), None);
    }

    #[test]
    fn list_contains_lookups() {
        for (acronym, _) in BuiltinEllipsoids.list() {
            assert!(BuiltinEllipsoids.lookup(acronym).is_some(), "{acronym}");
        }
    }

    #[test]
    fn spheroid_from_axes() {
        let spheroid = Spheroid::new(6_378_137.0, 6_356_752.314_245_179);
        assert_relative_eq!(spheroid.inverse_flattening(), 298.257_223_563, epsilon = 1e-6);
        assert_relative_eq!(spheroid.flattening(), 1.0 / 298.257_223_563, epsilon = 1e-12);
    }
}
