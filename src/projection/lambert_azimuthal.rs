//! Lambert Azimuthal Equal Area, oblique ellipsoidal aspect

use crate::errors::{CrsError, CrsResult};
use super::family::{FamilyParameters, MapProjection};
use super::utils::{authlat, authset, qsfn, EPS10};

#[derive(Debug)]
pub struct LambertAzimuthalEqualArea {
    e: f64,
    one_es: f64,
    qp: f64,
    rq: f64,
    apa: [f64; 3],
    sinb1: f64,
    cosb1: f64,
    dd: f64,
    xmf: f64,
    ymf: f64,
    lat0: f64,
}

impl LambertAzimuthalEqualArea {
    pub fn new(params: &FamilyParameters) -> Self {
        let (es, e) = (params.es, params.e);
        let one_es = 1.0 - es;
        let qp = qsfn(1.0, e, one_es);
        let rq = (0.5 * qp).sqrt();
        let sin_phi0 = params.lat0.sin();
        let sinb1 = qsfn(sin_phi0, e, one_es) / qp;
        let cosb1 = (1.0 - sinb1 * sinb1).sqrt();
        let dd = params.lat0.cos() / ((1.0 - es * sin_phi0 * sin_phi0).sqrt() * rq * cosb1);

        LambertAzimuthalEqualArea {
            e,
            one_es,
            qp,
            rq,
            apa: authset(es),
            sinb1,
            cosb1,
            dd,
            xmf: rq * dd,
            ymf: rq / dd,
            lat0: params.lat0,
        }
    }
}

impl MapProjection for LambertAzimuthalEqualArea {
    fn forward(&self, lam: f64, phi: f64) -> CrsResult<(f64, f64)> {
        let (sin_lam, cos_lam) = lam.sin_cos();
        let q = qsfn(phi.sin(), self.e, self.one_es);
        let sinb = q / self.qp;
        let cosb = (1.0 - sinb * sinb).max(0.0).sqrt();
        let b = 1.0 + self.sinb1 * sinb + self.cosb1 * cosb * cos_lam;
        if b.abs() < EPS10 {
            return Err(CrsError::domain(self.name(), "point is antipodal to the projection centre"));
        }
        let b = (2.0 / b).sqrt();
        Ok((
            self.xmf * b * cosb * sin_lam,
            self.ymf * b * (self.cosb1 * sinb - self.sinb1 * cosb * cos_lam),
        ))
    }

    fn inverse(&self, x: f64, y: f64) -> CrsResult<(f64, f64)> {
        let mut x = x / self.dd;
        let mut y = y * self.dd;
        let rho = x.hypot(y);
        if rho < EPS10 {
            return Ok((0.0, self.lat0));
        }
        let ratio = 0.5 * rho / self.rq;
        if ratio > 1.0 + EPS10 {
            return Err(CrsError::domain(self.name(), "point lies outside the projected disc"));
        }
        let s_ce = 2.0 * ratio.min(1.0).asin();
        let (sin_ce, cos_ce) = s_ce.sin_cos();
        x *= sin_ce;
        let ab = cos_ce * self.sinb1 + y * sin_ce * self.cosb1 / rho;
        y = rho * self.cosb1 * cos_ce - y * self.sinb1 * sin_ce;
        Ok((x.atan2(y), authlat(ab.clamp(-1.0, 1.0).asin(), &self.apa)))
    }

    fn name(&self) -> &'static str {
        "Lambert Azimuthal Equal Area"
    }
}
