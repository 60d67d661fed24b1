//! Geographic coordinates (see [`GeoPoint`]), reference systems (see [`Crs`]) and conversion of
//! points between a reference system and geographic coordinates (see [`Transform`]).

mod crs;
mod datum;
pub mod impls;
mod traits;

pub use crs::{Crs, ProjectionType};
pub use datum::Datum;
pub use traits::point::{GeoPoint, NewGeoPoint};
pub use traits::transform::{Transform, TransformDirection};
