//! Projection family trait definition

use std::fmt::Debug;
use crate::errors::CrsResult;

/// Strategy trait implemented by every projection family
///
/// Both directions work on a unit ellipsoid: longitudes are relative to the
/// central meridian and planar coordinates are in units of the semi-major
/// axis with the scale factor applied. False origin and axis length are
/// handled by [`super::Projector`].
pub trait MapProjection: Debug + Send + Sync {
    /// Project a longitude difference and latitude (radians)
    fn forward(&self, lam: f64, phi: f64) -> CrsResult<(f64, f64)>;

    /// Recover longitude difference and latitude (radians)
    fn inverse(&self, x: f64, y: f64) -> CrsResult<(f64, f64)>;

    /// Get the name of this projection family
    fn name(&self) -> &'static str;
}

/// Shape and origin values every family is prepared from
#[derive(Debug, Clone, Copy)]
pub struct FamilyParameters {
    /// Eccentricity squared
    pub es: f64,
    /// Eccentricity
    pub e: f64,
    /// Latitude of natural origin in radians
    pub lat0: f64,
    /// Scale factor at natural origin
    pub k0: f64,
}
