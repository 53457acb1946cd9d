//! Built-in WGS84 components used as the common pivot

use std::sync::Arc;
use lazy_static::lazy_static;

use super::axis::Axis;
use super::code::{CrsCode, Identifiable};
use super::crs::{CoordinateSystem, GeographicCrs};
use super::datum::GeodeticDatum;
use super::ellipsoid::Ellipsoid;
use super::prime_meridian::PrimeMeridian;
use super::units::Unit;

lazy_static! {
    pub static ref WGS84_DATUM_CODE: CrsCode = CrsCode::epsg(6326);

    pub static ref WGS84_ELLIPSOID: Arc<Ellipsoid> = Arc::new(Ellipsoid::from_inverse_flattening(
        Identifiable::new(CrsCode::epsg(7030), "WGS 84"),
        6378137.0,
        298.257223563,
        Unit::Metre,
    ));

    pub static ref GREENWICH: Arc<PrimeMeridian> = Arc::new(PrimeMeridian::new(
        Identifiable::new(CrsCode::epsg(8901), "Greenwich"),
        0.0,
        Unit::Degree,
    ));

    pub static ref WGS84_DATUM: Arc<GeodeticDatum> = Arc::new(GeodeticDatum::new(
        Identifiable::new(WGS84_DATUM_CODE.clone(), "World Geodetic System 1984"),
        WGS84_ELLIPSOID.clone(),
        GREENWICH.clone(),
        None,
    ));

    /// Longitude/latitude on WGS84, the target every Helmert shift refers to
    pub static ref WGS84_GEOGRAPHIC: Arc<CoordinateSystem> = Arc::new(CoordinateSystem::Geographic(
        GeographicCrs::from_parts(
            Identifiable::new(CrsCode::epsg(4326), "WGS 84"),
            WGS84_DATUM.clone(),
            Axis::default_geographic(),
        )
    ));
}
