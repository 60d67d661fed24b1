use num_traits::Float;

/// A point on the surface of an ellipsoid given by latitude and longitude in degrees.
pub trait GeoPoint {
    /// Numeric type of the coordinates.
    type Num: Float;

    /// Latitude in degrees.
    fn lat(&self) -> Self::Num;
    /// Longitude in degrees.
    fn lon(&self) -> Self::Num;

    /// Latitude in radians.
    fn lat_rad(&self) -> Self::Num {
        self.lat().to_radians()
    }

    /// Longitude in radians.
    fn lon_rad(&self) -> Self::Num {
        self.lon().to_radians()
    }
}

/// Geographic point that can be constructed from its coordinates.
pub trait NewGeoPoint<N = f64>: GeoPoint<Num = N> + Sized {
    /// Creates a point from latitude and longitude.
    fn latlon(lat: N, lon: N) -> Self;
    /// Creates a point from longitude and latitude.
    fn lonlat(lon: N, lat: N) -> Self {
        Self::latlon(lat, lon)
    }
}
