//! Distance and area units and the conversion factors between them.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Length of one degree of longitude at the equator of WGS84, in meters.
///
/// Used to convert planar distances measured in degrees into linear units.
pub const DEGREE_TO_METER: f64 = 111_319.490_793_273_58;

const FEET_TO_METER: f64 = 0.3048;
const NAUTICAL_MILE_TO_METER: f64 = 1852.0;
const YARDS_TO_METER: f64 = 0.9144;
const MILES_TO_METER: f64 = 1609.344;
const ACRE_TO_SQUARE_METER: f64 = 4046.856_422_4;

/// Units of distance.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceUnit {
    /// Meters.
    Meters,
    /// Kilometers.
    Kilometers,
    /// International feet.
    Feet,
    /// Nautical miles.
    NauticalMiles,
    /// International yards.
    Yards,
    /// Statute miles.
    Miles,
    /// Degrees, for distances in geographic reference systems.
    Degrees,
    /// Centimeters.
    Centimeters,
    /// Millimeters.
    Millimeters,
    /// Unknown unit. Converting from or to it does not change the value.
    Unknown,
}

/// Units of area.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AreaUnit {
    /// Square meters.
    SquareMeters,
    /// Square kilometers.
    SquareKilometers,
    /// Square feet.
    SquareFeet,
    /// Square yards.
    SquareYards,
    /// Square miles.
    SquareMiles,
    /// Hectares.
    Hectares,
    /// Acres.
    Acres,
    /// Square nautical miles.
    SquareNauticalMiles,
    /// Square degrees, for areas in geographic reference systems.
    SquareDegrees,
    /// Square centimeters.
    SquareCentimeters,
    /// Square millimeters.
    SquareMillimeters,
    /// Unknown unit. Converting from or to it does not change the value.
    Unknown,
}

impl DistanceUnit {
    /// All known (non-`Unknown`) distance units.
    pub const ALL: [DistanceUnit; 9] = [
        DistanceUnit::Meters,
        DistanceUnit::Kilometers,
        DistanceUnit::Feet,
        DistanceUnit::NauticalMiles,
        DistanceUnit::Yards,
        DistanceUnit::Miles,
        DistanceUnit::Degrees,
        DistanceUnit::Centimeters,
        DistanceUnit::Millimeters,
    ];

    /// Length of one unit in meters, or `None` for [`DistanceUnit::Unknown`].
    pub fn meters(self) -> Option<f64> {
        let value = match self {
            DistanceUnit::Meters => 1.0,
            DistanceUnit::Kilometers => 1000.0,
            DistanceUnit::Feet => FEET_TO_METER,
            DistanceUnit::NauticalMiles => NAUTICAL_MILE_TO_METER,
            DistanceUnit::Yards => YARDS_TO_METER,
            DistanceUnit::Miles => MILES_TO_METER,
            DistanceUnit::Degrees => DEGREE_TO_METER,
            DistanceUnit::Centimeters => 0.01,
            DistanceUnit::Millimeters => 0.001,
            DistanceUnit::Unknown => return None,
        };

        Some(value)
    }

    /// Factor to multiply a value in `self` units by to get the value in `to` units.
    ///
    /// If either of the units is unknown, the factor is `1.0`.
    pub fn factor_to(self, to: DistanceUnit) -> f64 {
        if self == to {
            return 1.0;
        }

        match (self.meters(), to.meters()) {
            (Some(from), Some(to)) => from / to,
            _ => 1.0,
        }
    }

    /// Area unit corresponding to the square of this distance unit.
    pub fn to_area_unit(self) -> AreaUnit {
        match self {
            DistanceUnit::Meters => AreaUnit::SquareMeters,
            DistanceUnit::Kilometers => AreaUnit::SquareKilometers,
            DistanceUnit::Feet => AreaUnit::SquareFeet,
            DistanceUnit::NauticalMiles => AreaUnit::SquareNauticalMiles,
            DistanceUnit::Yards => AreaUnit::SquareYards,
            DistanceUnit::Miles => AreaUnit::SquareMiles,
            DistanceUnit::Degrees => AreaUnit::SquareDegrees,
            DistanceUnit::Centimeters => AreaUnit::SquareCentimeters,
            DistanceUnit::Millimeters => AreaUnit::SquareMillimeters,
            DistanceUnit::Unknown => AreaUnit::Unknown,
        }
    }

    /// Short name of the unit.
    pub fn abbreviation(self) -> &'static str {
        match self {
            DistanceUnit::Meters => "m",
            DistanceUnit::Kilometers => "km",
            DistanceUnit::Feet => "ft",
            DistanceUnit::NauticalMiles => "NM",
            DistanceUnit::Yards => "yd",
            DistanceUnit::Miles => "mi",
            DistanceUnit::Degrees => "deg",
            DistanceUnit::Centimeters => "cm",
            DistanceUnit::Millimeters => "mm",
            DistanceUnit::Unknown => "<unknown>",
        }
    }
}

impl AreaUnit {
    /// All known (non-`Unknown`) area units.
    pub const ALL: [AreaUnit; 11] = [
        AreaUnit::SquareMeters,
        AreaUnit::SquareKilometers,
        AreaUnit::SquareFeet,
        AreaUnit::SquareYards,
        AreaUnit::SquareMiles,
        AreaUnit::Hectares,
        AreaUnit::Acres,
        AreaUnit::SquareNauticalMiles,
        AreaUnit::SquareDegrees,
        AreaUnit::SquareCentimeters,
        AreaUnit::SquareMillimeters,
    ];

    /// Area of one unit in square meters, or `None` for [`AreaUnit::Unknown`].
    pub fn square_meters(self) -> Option<f64> {
        let value = match self {
            AreaUnit::SquareMeters => 1.0,
            AreaUnit::SquareKilometers => 1.0e6,
            AreaUnit::SquareFeet => FEET_TO_METER * FEET_TO_METER,
            AreaUnit::SquareYards => YARDS_TO_METER * YARDS_TO_METER,
            AreaUnit::SquareMiles => MILES_TO_METER * MILES_TO_METER,
            AreaUnit::Hectares => 10_000.0,
            AreaUnit::Acres => ACRE_TO_SQUARE_METER,
            AreaUnit::SquareNauticalMiles => NAUTICAL_MILE_TO_METER * NAUTICAL_MILE_TO_METER,
            AreaUnit::SquareDegrees => DEGREE_TO_METER * DEGREE_TO_METER,
            AreaUnit::SquareCentimeters => 1.0e-4,
            AreaUnit::SquareMillimeters => 1.0e-6,
            AreaUnit::Unknown => return None,
        };

        Some(value)
    }

    /// Factor to multiply a value in `self` units by to get the value in `to` units.
    ///
    /// If either of the units is unknown, the factor is `1.0`.
    pub fn factor_to(self, to: AreaUnit) -> f64 {
        if self == to {
            return 1.0;
        }

        match (self.square_meters(), to.square_meters()) {
            (Some(from), Some(to)) => from / to,
            _ => 1.0,
        }
    }

    /// Short name of the unit.
    pub fn abbreviation(self) -> &'static str {
        match self {
            AreaUnit::SquareMeters => "m²",
            AreaUnit::SquareKilometers => "km²",
            AreaUnit::SquareFeet => "ft²",
            AreaUnit::SquareYards => "yd²",
            AreaUnit::SquareMiles => "mi²",
            AreaUnit::Hectares => "ha",
            AreaUnit::Acres => "ac",
            AreaUnit::SquareNauticalMiles => "NM²",
            AreaUnit::SquareDegrees => "deg²",
            AreaUnit::SquareCentimeters => "cm²",
            AreaUnit::SquareMillimeters => "mm²",
            AreaUnit::Unknown => "<unknown>",
        }
    }
}

impl Display for DistanceUnit {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.abbreviation())
    }
}

impl Display for AreaUnit {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.abbreviation())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn distance_factors() {
        assert_relative_eq!(DistanceUnit::Kilometers.factor_to(DistanceUnit::Meters), 1000.0);
        assert_relative_eq!(DistanceUnit::Meters.factor_to(DistanceUnit::Feet), 1.0 / 0.3048);
        assert_relative_eq!(DistanceUnit::Miles.factor_to(DistanceUnit::Yards), 1760.0);
        assert_relative_eq!(DistanceUnit::Unknown.factor_to(DistanceUnit::Miles), 1.0);
    }

    #[test]
    fn distance_round_trip() {
        let value = 1234.5678;
        for from in DistanceUnit::ALL {
            for to in DistanceUnit::ALL {
                let converted = value * from.factor_to(to);
                assert_relative_eq!(
                    converted * to.factor_to(from),
                    value,
                    max_relative = 1e-12
                );
            }
        }
    }

    #[test]
    fn area_factors() {
        assert_relative_eq!(AreaUnit::Hectares.factor_to(AreaUnit::SquareMeters), 10_000.0);
        assert_relative_eq!(
            AreaUnit::SquareMiles.factor_to(AreaUnit::Acres),
            640.0,
            max_relative = 1e-9
        );
        assert_relative_eq!(AreaUnit::SquareKilometers.factor_to(AreaUnit::Hectares), 100.0);
    }

    #[test]
    fn area_unit_of_distance_unit() {
        for unit in DistanceUnit::ALL {
            let meters = unit.meters().expect("known unit");
            let square = unit.to_area_unit().square_meters().expect("known unit");
            assert_relative_eq!(square, meters * meters, max_relative = 1e-12);
        }
    }

    #[test]
    fn display() {
        assert_eq!(DistanceUnit::Kilometers.to_string(), "km");
        assert_eq!(AreaUnit::Hectares.to_string(), "ha");
    }

    #[test]
    fn serde_names() {
        let json = serde_json::to_string(&DistanceUnit::NauticalMiles).expect("serialize");
        assert_eq!(json, r#""nautical_miles""#);
    }
}
