//! Ellipsoidal Transverse Mercator (Gauss-Krüger, UTM)

use crate::errors::{CrsError, CrsResult};
use super::family::{FamilyParameters, MapProjection};
use super::utils::{enfn, inv_mlfn, mlfn, EPS10, HALFPI};

const FC1: f64 = 1.0;
const FC2: f64 = 0.5;
const FC3: f64 = 1.0 / 6.0;
const FC4: f64 = 1.0 / 12.0;
const FC5: f64 = 0.05;
const FC6: f64 = 1.0 / 30.0;
const FC7: f64 = 1.0 / 42.0;
const FC8: f64 = 1.0 / 56.0;

/// Series expansion around the central meridian
///
/// The series only holds within a quarter turn of the central meridian;
/// points beyond it are rejected rather than projected to garbage.
#[derive(Debug)]
pub struct TransverseMercator {
    es: f64,
    esp: f64,
    k0: f64,
    en: [f64; 5],
    ml0: f64,
    /// Meridian distance from the equator to the pole
    ml_pole: f64,
}

impl TransverseMercator {
    pub fn new(params: &FamilyParameters) -> Self {
        let en = enfn(params.es);
        let lat0 = params.lat0;
        TransverseMercator {
            es: params.es,
            esp: params.es / (1.0 - params.es),
            k0: params.k0,
            en,
            ml0: mlfn(lat0, lat0.sin(), lat0.cos(), &en),
            ml_pole: mlfn(HALFPI, 1.0, 0.0, &en),
        }
    }
}

impl MapProjection for TransverseMercator {
    fn forward(&self, lam: f64, phi: f64) -> CrsResult<(f64, f64)> {
        if lam.abs() > HALFPI + EPS10 {
            return Err(CrsError::domain(
                self.name(),
                format!("{:.6} degrees from the central meridian", lam.to_degrees()),
            ));
        }
        let sin_phi = phi.sin();
        let cos_phi = phi.cos();
        let mut t = if cos_phi.abs() > EPS10 { sin_phi / cos_phi } else { 0.0 };
        t *= t;
        let mut al = cos_phi * lam;
        let als = al * al;
        al /= (1.0 - self.es * sin_phi * sin_phi).sqrt();
        let n = self.esp * cos_phi * cos_phi;

        let x = self.k0 * al * (FC1 + FC3 * als * (1.0 - t + n
            + FC5 * als * (5.0 + t * (t - 18.0) + n * (14.0 - 58.0 * t)
            + FC7 * als * (61.0 + t * (t * (179.0 - t) - 479.0)))));

        let y = self.k0 * (mlfn(phi, sin_phi, cos_phi, &self.en) - self.ml0
            + sin_phi * al * lam * FC2 * (1.0 + FC4 * als * (5.0 - t + n * (9.0 + 4.0 * n)
            + FC6 * als * (61.0 + t * (t - 58.0) + n * (270.0 - 330.0 * t)
            + FC8 * als * (1385.0 + t * (t * (543.0 - t) - 3111.0))))));

        Ok((x, y))
    }

    fn inverse(&self, x: f64, y: f64) -> CrsResult<(f64, f64)> {
        let meridian_distance = self.ml0 + y / self.k0;
        if meridian_distance.abs() > self.ml_pole + EPS10 {
            return Err(CrsError::domain(self.name(), "northing beyond the pole"));
        }
        let mut phi = inv_mlfn(meridian_distance, self.es, &self.en);
        if phi.abs() >= HALFPI {
            if x.abs() > EPS10 {
                return Err(CrsError::domain(self.name(), "easting off the central meridian at the pole"));
            }
            return Ok((0.0, phi.signum() * HALFPI));
        }

        let sin_phi = phi.sin();
        let cos_phi = phi.cos();
        let mut t = if cos_phi.abs() > EPS10 { sin_phi / cos_phi } else { 0.0 };
        let n = self.esp * cos_phi * cos_phi;
        let mut con = 1.0 - self.es * sin_phi * sin_phi;
        let d = x * con.sqrt() / self.k0;
        con *= t;
        t *= t;
        let ds = d * d;

        phi -= (con * ds / (1.0 - self.es)) * FC2 * (1.0 - ds * FC4 * (5.0 + t * (3.0 - 9.0 * n)
            + n * (1.0 - 4.0 * n) - ds * FC6 * (61.0 + t * (90.0 - 252.0 * n + 45.0 * t)
            + 46.0 * n - ds * FC8 * (1385.0 + t * (3633.0 + t * (4095.0 + 1574.0 * t))))));

        let lam = d * (FC1 - ds * FC3 * (1.0 + 2.0 * t + n - ds * FC5 * (5.0 + t * (28.0 + 24.0 * t + 8.0 * n)
            + 6.0 * n - ds * FC7 * (61.0 + t * (662.0 + t * (1320.0 + 720.0 * t)))))) / cos_phi;

        if lam.abs() > HALFPI + EPS10 {
            return Err(CrsError::domain(self.name(), "easting too far from the central meridian"));
        }
        Ok((lam, phi))
    }

    fn name(&self) -> &'static str {
        "Transverse Mercator"
    }
}
