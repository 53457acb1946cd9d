//! Conversion between geographic and geocentric coordinates

use std::sync::Arc;
use nalgebra::Point3;
use log::warn;

use crate::errors::{CrsError, CrsResult};
use crate::model::{CoordinateSystem, Ellipsoid};
use crate::projection::utils::{EPS10, HALFPI};

const MAX_ITERATIONS: usize = 20;
const LATITUDE_TOLERANCE: f64 = 1e-14;

/// Geographic (lon, lat radians, h metres) to earth-centred X, Y, Z
#[derive(Debug, Clone)]
pub struct GeocentricTransform {
    source: Arc<CoordinateSystem>,
    target: Arc<CoordinateSystem>,
    ellipsoid: Arc<Ellipsoid>,
    semi_major_axis: f64,
    inverse: bool,
}

impl GeocentricTransform {
    pub fn new(source: Arc<CoordinateSystem>, target: Arc<CoordinateSystem>, ellipsoid: Arc<Ellipsoid>) -> Self {
        let semi_major_axis = ellipsoid.semi_major_axis_in_metres();
        GeocentricTransform { source, target, ellipsoid, semi_major_axis, inverse: false }
    }

    pub fn source(&self) -> &Arc<CoordinateSystem> {
        &self.source
    }

    pub fn target(&self) -> &Arc<CoordinateSystem> {
        &self.target
    }

    /// Same step, starting at another system
    pub(crate) fn with_source(mut self, source: Arc<CoordinateSystem>) -> Self {
        self.source = source;
        self
    }

    /// Same step, ending at another system
    pub(crate) fn with_target(mut self, target: Arc<CoordinateSystem>) -> Self {
        self.target = target;
        self
    }

    pub fn ellipsoid(&self) -> &Arc<Ellipsoid> {
        &self.ellipsoid
    }

    pub fn is_inverse(&self) -> bool {
        self.inverse
    }

    pub fn invert(&self) -> Self {
        GeocentricTransform {
            source: self.target.clone(),
            target: self.source.clone(),
            ellipsoid: self.ellipsoid.clone(),
            semi_major_axis: self.semi_major_axis,
            inverse: !self.inverse,
        }
    }

    pub fn is_inverse_of(&self, other: &GeocentricTransform) -> bool {
        self.inverse != other.inverse && self.ellipsoid.same_shape(&other.ellipsoid)
    }

    pub fn transform(&self, points: &mut [Point3<f64>]) -> CrsResult<()> {
        for point in points.iter_mut() {
            if !point.x.is_finite() || !point.y.is_finite() || !point.z.is_finite() {
                return Err(CrsError::domain("Geocentric", "non-finite input"));
            }
            let (a, b, c) = if self.inverse {
                self.to_geographic(point.x, point.y, point.z)
            } else {
                self.to_geocentric(point.x, point.y, point.z)?
            };
            point.x = a;
            point.y = b;
            point.z = c;
        }
        Ok(())
    }

    fn to_geocentric(&self, lon: f64, lat: f64, height: f64) -> CrsResult<(f64, f64, f64)> {
        if lat.abs() > HALFPI + EPS10 {
            return Err(CrsError::domain("Geocentric", format!("latitude {} out of range", lat.to_degrees())));
        }
        let es = self.ellipsoid.eccentricity_squared();
        let lat = lat.clamp(-HALFPI, HALFPI);
        let (sin_lat, cos_lat) = lat.sin_cos();
        let n = self.semi_major_axis / (1.0 - es * sin_lat * sin_lat).sqrt();
        Ok((
            (n + height) * cos_lat * lon.cos(),
            (n + height) * cos_lat * lon.sin(),
            (n * (1.0 - es) + height) * sin_lat,
        ))
    }

    fn to_geographic(&self, x: f64, y: f64, z: f64) -> (f64, f64, f64) {
        let es = self.ellipsoid.eccentricity_squared();
        let a = self.semi_major_axis;
        let p = x.hypot(y);

        if p < 1e-9 {
            // on the polar axis
            let b = a * (1.0 - es).sqrt();
            let lat = if z < 0.0 { -HALFPI } else { HALFPI };
            return (0.0, lat, z.abs() - b);
        }

        let lon = y.atan2(x);
        let mut lat = z.atan2(p * (1.0 - es));
        let mut converged = false;
        for _ in 0..MAX_ITERATIONS {
            let sin_lat = lat.sin();
            let n = a / (1.0 - es * sin_lat * sin_lat).sqrt();
            let height = p / lat.cos() - n;
            let next = z.atan2(p * (1.0 - es * n / (n + height)));
            let delta = (next - lat).abs();
            lat = next;
            if delta < LATITUDE_TOLERANCE {
                converged = true;
                break;
            }
        }
        if !converged {
            warn!("Geocentric to geographic iteration did not converge for ({}, {}, {})", x, y, z);
        }
        let sin_lat = lat.sin();
        let n = a / (1.0 - es * sin_lat * sin_lat).sqrt();
        (lon, lat, p / lat.cos() - n)
    }
}
