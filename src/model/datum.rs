//! Geodetic datums and their datum-shift parameters

use std::sync::Arc;
use nalgebra::Matrix4;

use super::code::Identifiable;
use super::ellipsoid::Ellipsoid;
use super::prime_meridian::PrimeMeridian;
use super::units::Unit;

/// Seven-parameter similarity transform into WGS84 (position vector convention)
///
/// Translations are in metres, rotations in arc-seconds and the scale
/// difference in parts per million.
#[derive(Debug, Clone, PartialEq)]
pub struct HelmertParameters {
    id: Identifiable,
    pub dx: f64,
    pub dy: f64,
    pub dz: f64,
    pub rx: f64,
    pub ry: f64,
    pub rz: f64,
    pub ppm: f64,
}

impl HelmertParameters {
    pub fn new(id: Identifiable, translation: [f64; 3], rotation: [f64; 3], ppm: f64) -> Self {
        HelmertParameters {
            id,
            dx: translation[0],
            dy: translation[1],
            dz: translation[2],
            rx: rotation[0],
            ry: rotation[1],
            rz: rotation[2],
            ppm,
        }
    }

    pub fn id(&self) -> &Identifiable {
        &self.id
    }

    /// True if all seven parameters are zero
    pub fn is_identity(&self) -> bool {
        self.values().iter().all(|v| *v == 0.0)
    }

    /// The parameters in the order dx, dy, dz, rx, ry, rz, ppm
    pub fn values(&self) -> [f64; 7] {
        [self.dx, self.dy, self.dz, self.rx, self.ry, self.rz, self.ppm]
    }

    /// Compare the seven values, ignoring identification
    pub fn same_values(&self, other: &HelmertParameters) -> bool {
        self.values() == other.values()
    }

    /// The linearized affine matrix acting on geocentric coordinates
    pub fn to_affine(&self) -> Matrix4<f64> {
        let as_rad = Unit::ArcSecond.to_base_factor();
        let scale = 1.0 + self.ppm * 1e-6;
        let (rx, ry, rz) = (self.rx * as_rad, self.ry * as_rad, self.rz * as_rad);
        Matrix4::new(
            scale, -rz * scale, ry * scale, self.dx,
            rz * scale, scale, -rx * scale, self.dy,
            -ry * scale, rx * scale, scale, self.dz,
            0.0, 0.0, 0.0, 1.0,
        )
    }
}

/// Reference frame: ellipsoid, prime meridian and the optional shift to WGS84
#[derive(Debug, Clone, PartialEq)]
pub struct GeodeticDatum {
    id: Identifiable,
    ellipsoid: Arc<Ellipsoid>,
    prime_meridian: Arc<PrimeMeridian>,
    to_wgs84: Option<Arc<HelmertParameters>>,
}

impl GeodeticDatum {
    pub fn new(
        id: Identifiable,
        ellipsoid: Arc<Ellipsoid>,
        prime_meridian: Arc<PrimeMeridian>,
        to_wgs84: Option<Arc<HelmertParameters>>,
    ) -> Self {
        GeodeticDatum { id, ellipsoid, prime_meridian, to_wgs84 }
    }

    pub fn id(&self) -> &Identifiable {
        &self.id
    }

    pub fn ellipsoid(&self) -> &Arc<Ellipsoid> {
        &self.ellipsoid
    }

    pub fn prime_meridian(&self) -> &Arc<PrimeMeridian> {
        &self.prime_meridian
    }

    pub fn to_wgs84(&self) -> Option<&Arc<HelmertParameters>> {
        self.to_wgs84.as_ref()
    }

    /// Whether this is the WGS84 pivot datum itself
    pub fn is_wgs84(&self) -> bool {
        self.id.has_code(&super::wgs84::WGS84_DATUM_CODE)
    }

    /// Whether the datum can be related to WGS84
    pub fn has_wgs84_relation(&self) -> bool {
        self.is_wgs84() || self.to_wgs84.is_some()
    }

    /// Same shape and same shift to WGS84, ignoring identification
    pub fn same_reference_frame(&self, other: &GeodeticDatum) -> bool {
        if !self.ellipsoid.same_shape(&other.ellipsoid)
            || self.prime_meridian.longitude_as_radian() != other.prime_meridian.longitude_as_radian() {
            return false;
        }
        match (self.wgs84_shift(), other.wgs84_shift()) {
            (None, None) => self.id == other.id,
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }

    fn wgs84_shift(&self) -> Option<[f64; 7]> {
        if self.is_wgs84() {
            return Some([0.0; 7]);
        }
        self.to_wgs84.as_ref().map(|h| h.values())
    }
}

/// Helmert parameters configured directly between two datums
///
/// Preferred over the detour through WGS84 whenever a chain needs to get
/// from `source` to `target` (or back, using the inverse).
#[derive(Debug, Clone, PartialEq)]
pub struct DatumShift {
    source: Arc<GeodeticDatum>,
    target: Arc<GeodeticDatum>,
    parameters: Arc<HelmertParameters>,
}

impl DatumShift {
    pub fn new(source: Arc<GeodeticDatum>, target: Arc<GeodeticDatum>, parameters: Arc<HelmertParameters>) -> Self {
        DatumShift { source, target, parameters }
    }

    pub fn source(&self) -> &Arc<GeodeticDatum> {
        &self.source
    }

    pub fn target(&self) -> &Arc<GeodeticDatum> {
        &self.target
    }

    pub fn parameters(&self) -> &Arc<HelmertParameters> {
        &self.parameters
    }

    /// True if the shift leads from `source` to `target` as configured
    pub fn connects(&self, source: &GeodeticDatum, target: &GeodeticDatum) -> bool {
        self.source.id().code() == source.id().code() && self.target.id().code() == target.id().code()
    }
}
