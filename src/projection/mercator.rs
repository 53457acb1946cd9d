//! Mercator (ellipsoidal) and Popular Visualisation Pseudo-Mercator

use crate::errors::{CrsError, CrsResult};
use super::family::{FamilyParameters, MapProjection};
use super::utils::{phi2, tsfn, EPS10, HALFPI};

/// Normal aspect Mercator
///
/// The pseudo variant evaluates the spherical formulas with the ellipsoid's
/// semi-major axis as radius, which is what web maps use.
#[derive(Debug)]
pub struct Mercator {
    e: f64,
    k0: f64,
    spherical: bool,
}

impl Mercator {
    pub fn new(params: &FamilyParameters) -> Self {
        Mercator { e: params.e, k0: params.k0, spherical: false }
    }

    pub fn pseudo(params: &FamilyParameters) -> Self {
        Mercator { e: 0.0, k0: params.k0, spherical: true }
    }
}

impl MapProjection for Mercator {
    fn forward(&self, lam: f64, phi: f64) -> CrsResult<(f64, f64)> {
        if (phi.abs() - HALFPI).abs() <= EPS10 {
            return Err(CrsError::domain(self.name(), "poles project to infinity"));
        }
        Ok((
            self.k0 * lam,
            -self.k0 * tsfn(phi, phi.sin(), self.e).ln(),
        ))
    }

    fn inverse(&self, x: f64, y: f64) -> CrsResult<(f64, f64)> {
        let ts = (-y / self.k0).exp();
        Ok((x / self.k0, phi2(ts, self.e)))
    }

    fn name(&self) -> &'static str {
        if self.spherical {
            "Popular Visualisation Pseudo Mercator"
        } else {
            "Mercator"
        }
    }
}
