//! Map projections
//!
//! [`Projection`] holds the parameters of a conversion as defined in the
//! configuration. A [`Projector`] binds those parameters to the ellipsoid
//! and prime meridian of a datum and evaluates the family formulas.

mod family;
pub(crate) mod utils;
mod transverse_mercator;
mod lambert_conformal_conic;
mod lambert_azimuthal;
mod stereographic;
mod mercator;


use std::fmt;

use crate::errors::{CrsError, CrsResult};
use crate::model::{GeodeticDatum, Identifiable, Unit};

pub use self::family::{FamilyParameters, MapProjection};
pub use self::transverse_mercator::TransverseMercator;
pub use self::lambert_conformal_conic::LambertConformalConic;
pub use self::lambert_azimuthal::LambertAzimuthalEqualArea;
pub use self::stereographic::ObliqueStereographic;
pub use self::mercator::Mercator;

use self::utils::{adjust_lon, EPS10, HALFPI};

/// Projection family together with its family-specific parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProjectionKind {
    TransverseMercator,
    /// Standard parallels in radians; equal values give the one-parallel case
    LambertConformalConic { first_parallel: f64, second_parallel: f64 },
    LambertAzimuthalEqualArea,
    ObliqueStereographic,
    Mercator,
    PseudoMercator,
}

impl ProjectionKind {
    /// Angles are preserved
    pub fn is_conformal(&self) -> bool {
        !matches!(self, ProjectionKind::LambertAzimuthalEqualArea | ProjectionKind::PseudoMercator)
    }

    /// Areas are preserved
    pub fn is_equal_area(&self) -> bool {
        matches!(self, ProjectionKind::LambertAzimuthalEqualArea)
    }

    pub fn name(&self) -> &'static str {
        match self {
            ProjectionKind::TransverseMercator => "transverse_mercator",
            ProjectionKind::LambertConformalConic { .. } => "lambert_conformal_conic",
            ProjectionKind::LambertAzimuthalEqualArea => "lambert_azimuthal_equal_area",
            ProjectionKind::ObliqueStereographic => "oblique_stereographic",
            ProjectionKind::Mercator => "mercator",
            ProjectionKind::PseudoMercator => "pseudo_mercator",
        }
    }
}

impl fmt::Display for ProjectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parameters of a map projection
///
/// Angles are stored in radians, false easting/northing in `units`.
/// The natural origin longitude is relative to the datum's prime meridian.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    id: Identifiable,
    kind: ProjectionKind,
    projection_longitude: f64,
    projection_latitude: f64,
    scale: f64,
    false_easting: f64,
    false_northing: f64,
    units: Unit,
}

impl Projection {
    pub fn new(
        id: Identifiable,
        kind: ProjectionKind,
        natural_origin: (f64, f64),
        scale: f64,
        false_origin: (f64, f64),
        units: Unit,
    ) -> CrsResult<Self> {
        let (lon0, lat0) = natural_origin;
        if scale.is_nan() || scale <= 0.0 {
            return Err(CrsError::Configuration(format!(
                "projection {} has non-positive scale factor {}", id.code(), scale
            )));
        }
        if lat0.abs() > HALFPI + EPS10 || !lon0.is_finite() {
            return Err(CrsError::Configuration(format!(
                "projection {} has an invalid natural origin", id.code()
            )));
        }
        if !units.is_linear() {
            return Err(CrsError::Configuration(format!(
                "projection {} needs a linear unit, got {}", id.code(), units
            )));
        }
        Ok(Projection {
            id,
            kind,
            projection_longitude: lon0,
            projection_latitude: lat0,
            scale,
            false_easting: false_origin.0,
            false_northing: false_origin.1,
            units,
        })
    }

    pub fn id(&self) -> &Identifiable {
        &self.id
    }

    pub fn kind(&self) -> ProjectionKind {
        self.kind
    }

    /// Longitude of natural origin, radians
    pub fn projection_longitude(&self) -> f64 {
        self.projection_longitude
    }

    /// Latitude of natural origin, radians
    pub fn projection_latitude(&self) -> f64 {
        self.projection_latitude
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn false_easting(&self) -> f64 {
        self.false_easting
    }

    pub fn false_northing(&self) -> f64 {
        self.false_northing
    }

    pub fn units(&self) -> Unit {
        self.units
    }

    pub fn is_conformal(&self) -> bool {
        self.kind.is_conformal()
    }

    pub fn is_equal_area(&self) -> bool {
        self.kind.is_equal_area()
    }

    /// Compare parameters, ignoring identification
    pub fn same_parameters(&self, other: &Projection) -> bool {
        self.kind == other.kind
            && self.projection_longitude == other.projection_longitude
            && self.projection_latitude == other.projection_latitude
            && self.scale == other.scale
            && self.units.to_base(self.false_easting) == other.units.to_base(other.false_easting)
            && self.units.to_base(self.false_northing) == other.units.to_base(other.false_northing)
    }
}

/// A projection prepared for one datum
///
/// Works on Greenwich longitudes and latitudes in radians and planar
/// coordinates in metres.
#[derive(Debug)]
pub struct Projector {
    family: Box<dyn MapProjection>,
    central_meridian: f64,
    semi_major_axis: f64,
    false_easting: f64,
    false_northing: f64,
}

impl Projector {
    pub fn new(projection: &Projection, datum: &GeodeticDatum) -> CrsResult<Self> {
        let ellipsoid = datum.ellipsoid();
        let params = FamilyParameters {
            es: ellipsoid.eccentricity_squared(),
            e: ellipsoid.eccentricity(),
            lat0: projection.projection_latitude(),
            k0: projection.scale(),
        };

        let family: Box<dyn MapProjection> = match projection.kind() {
            ProjectionKind::TransverseMercator => Box::new(TransverseMercator::new(&params)),
            ProjectionKind::LambertConformalConic { first_parallel, second_parallel } => {
                Box::new(LambertConformalConic::new(&params, first_parallel, second_parallel)?)
            }
            ProjectionKind::LambertAzimuthalEqualArea => Box::new(LambertAzimuthalEqualArea::new(&params)),
            ProjectionKind::ObliqueStereographic => Box::new(ObliqueStereographic::new(&params)),
            ProjectionKind::Mercator => Box::new(Mercator::new(&params)),
            ProjectionKind::PseudoMercator => Box::new(Mercator::pseudo(&params)),
        };

        let units = projection.units();
        Ok(Projector {
            family,
            central_meridian: projection.projection_longitude() + datum.prime_meridian().longitude_as_radian(),
            semi_major_axis: ellipsoid.semi_major_axis_in_metres(),
            false_easting: units.to_base(projection.false_easting()),
            false_northing: units.to_base(projection.false_northing()),
        })
    }

    pub fn name(&self) -> &'static str {
        self.family.name()
    }

    /// Geographic (radians) to planar (metres)
    pub fn forward(&self, lon: f64, lat: f64) -> CrsResult<(f64, f64)> {
        if !lon.is_finite() || !lat.is_finite() {
            return Err(CrsError::domain(self.name(), "non-finite input"));
        }
        if lat.abs() > HALFPI + EPS10 {
            return Err(CrsError::domain(self.name(), format!("latitude {} out of range", lat.to_degrees())));
        }
        let lat = lat.clamp(-HALFPI, HALFPI);
        let (x, y) = self.family.forward(adjust_lon(lon - self.central_meridian), lat)?;
        Ok((
            x * self.semi_major_axis + self.false_easting,
            y * self.semi_major_axis + self.false_northing,
        ))
    }

    /// Planar (metres) to geographic (radians)
    pub fn inverse(&self, x: f64, y: f64) -> CrsResult<(f64, f64)> {
        if !x.is_finite() || !y.is_finite() {
            return Err(CrsError::domain(self.name(), "non-finite input"));
        }
        let (lam, phi) = self.family.inverse(
            (x - self.false_easting) / self.semi_major_axis,
            (y - self.false_northing) / self.semi_major_axis,
        )?;
        if !lam.is_finite() || !phi.is_finite() {
            return Err(CrsError::domain(self.name(), format!("no inverse for ({}, {})", x, y)));
        }
        Ok((adjust_lon(lam + self.central_meridian), phi))
    }
}
