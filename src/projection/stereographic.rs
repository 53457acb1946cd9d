//! Oblique Stereographic via the Gauss conformal sphere (e.g. RD New)

use crate::errors::{CrsError, CrsResult};
use super::family::{FamilyParameters, MapProjection};
use super::utils::{srat, EPS10, FORTPI, HALFPI};

const INVERSE_ITERATIONS: usize = 20;
const INVERSE_TOLERANCE: f64 = 1e-14;

#[derive(Debug)]
pub struct ObliqueStereographic {
    e: f64,
    k0: f64,
    c: f64,
    k: f64,
    ratexp: f64,
    phic0: f64,
    sinc0: f64,
    cosc0: f64,
    r2: f64,
}

impl ObliqueStereographic {
    pub fn new(params: &FamilyParameters) -> Self {
        let (es, e) = (params.es, params.e);
        let phi0 = params.lat0;
        let sin_phi = phi0.sin();
        let mut cos_phi = phi0.cos();
        cos_phi *= cos_phi;

        let rc = (1.0 - es).sqrt() / (1.0 - es * sin_phi * sin_phi);
        let c = (1.0 + es * cos_phi * cos_phi / (1.0 - es)).sqrt();
        let chi = (sin_phi / c).asin();
        let ratexp = 0.5 * c * e;
        let k = (0.5 * chi + FORTPI).tan()
            / ((0.5 * phi0 + FORTPI).tan().powf(c) * srat(e * sin_phi, ratexp));

        ObliqueStereographic {
            e,
            k0: params.k0,
            c,
            k,
            ratexp,
            phic0: chi,
            sinc0: chi.sin(),
            cosc0: chi.cos(),
            r2: 2.0 * rc,
        }
    }
}

impl MapProjection for ObliqueStereographic {
    fn forward(&self, lam: f64, phi: f64) -> CrsResult<(f64, f64)> {
        // onto the conformal sphere
        let chi = 2.0 * (self.k * (0.5 * phi + FORTPI).tan().powf(self.c)
            * srat(self.e * phi.sin(), self.ratexp)).atan() - HALFPI;
        let lam = self.c * lam;

        let (sin_chi, cos_chi) = chi.sin_cos();
        let cos_lam = lam.cos();
        let denom = 1.0 + self.sinc0 * sin_chi + self.cosc0 * cos_chi * cos_lam;
        if denom.abs() < EPS10 {
            return Err(CrsError::domain(self.name(), "point is antipodal to the projection centre"));
        }
        let k = self.k0 * self.r2 / denom;
        Ok((
            k * cos_chi * lam.sin(),
            k * (self.cosc0 * sin_chi - self.sinc0 * cos_chi * cos_lam),
        ))
    }

    fn inverse(&self, x: f64, y: f64) -> CrsResult<(f64, f64)> {
        let x = x / self.k0;
        let y = y / self.k0;
        let rho = x.hypot(y);
        let (mut phi, mut lam) = if rho > 0.0 {
            let c = 2.0 * rho.atan2(self.r2);
            let (sin_c, cos_c) = c.sin_cos();
            (
                (cos_c * self.sinc0 + y * sin_c * self.cosc0 / rho).asin(),
                (x * sin_c).atan2(rho * self.cosc0 * cos_c - y * self.sinc0 * sin_c),
            )
        } else {
            (self.phic0, 0.0)
        };

        // back from the conformal sphere
        lam /= self.c;
        let num = ((0.5 * phi + FORTPI).tan() / self.k).powf(1.0 / self.c);
        for _ in 0..INVERSE_ITERATIONS {
            let next = 2.0 * (num * srat(self.e * phi.sin(), -0.5 * self.e)).atan() - HALFPI;
            let delta = (next - phi).abs();
            phi = next;
            if delta < INVERSE_TOLERANCE {
                return Ok((lam, phi));
            }
        }
        Err(CrsError::domain(self.name(), "inverse latitude iteration did not converge"))
    }

    fn name(&self) -> &'static str {
        "Oblique Stereographic"
    }
}
