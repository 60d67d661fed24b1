//! Implementations of the [`Transform`](super::Transform) trait for the supported projections.

mod identity;
mod web_mercator;

pub use identity::IdentityTransform;
pub use web_mercator::WebMercator;

#[cfg(feature = "geodesy")]
mod geodesy;
#[cfg(feature = "geodesy")]
pub use self::geodesy::GeodesyTransform;
