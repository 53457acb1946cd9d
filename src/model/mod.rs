//! Component model for coordinate reference systems
//!
//! Immutable value types: codes, units, ellipsoids, prime meridians,
//! datums, axes and the coordinate system variants built from them.

mod code;
mod units;
mod ellipsoid;
mod prime_meridian;
mod datum;
mod axis;
mod crs;
pub mod wgs84;

#[cfg(test)]
mod tests;

// Re-export key types
pub use self::code::{CrsCode, Identifiable};
pub use self::units::Unit;
pub use self::ellipsoid::Ellipsoid;
pub use self::prime_meridian::PrimeMeridian;
pub use self::datum::{DatumShift, GeodeticDatum, HelmertParameters};
pub use self::axis::{Axis, AxisOrientation};
pub use self::crs::{
    CompoundCrs, CoordinateSystem, CrsType, GeocentricCrs, GeographicCrs, ProjectedCrs, VerticalCrs,
};
