//! Lambert Conformal Conic, one or two standard parallels

use crate::errors::{CrsError, CrsResult};
use super::family::{FamilyParameters, MapProjection};
use super::utils::{msfn, phi2, tsfn, EPS10, HALFPI};

#[derive(Debug)]
pub struct LambertConformalConic {
    e: f64,
    k0: f64,
    n: f64,
    c: f64,
    rho0: f64,
}

impl LambertConformalConic {
    /// Prepare the cone constants
    ///
    /// Equal standard parallels give the tangent (one parallel) case.
    pub fn new(params: &FamilyParameters, first_parallel: f64, second_parallel: f64) -> CrsResult<Self> {
        if (first_parallel + second_parallel).abs() < EPS10 {
            return Err(CrsError::Configuration(
                "Lambert conformal conic standard parallels are symmetric to the equator".to_string(),
            ));
        }
        let (es, e) = (params.es, params.e);

        let sin_phi1 = first_parallel.sin();
        let m1 = msfn(sin_phi1, first_parallel.cos(), es);
        let ml1 = tsfn(first_parallel, sin_phi1, e);
        let mut n = sin_phi1;
        if (first_parallel - second_parallel).abs() >= EPS10 {
            let sin_phi2 = second_parallel.sin();
            n = (m1 / msfn(sin_phi2, second_parallel.cos(), es)).ln()
                / (ml1 / tsfn(second_parallel, sin_phi2, e)).ln();
        }
        let c = m1 * ml1.powf(-n) / n;
        let rho0 = if (params.lat0.abs() - HALFPI).abs() < EPS10 {
            0.0
        } else {
            c * tsfn(params.lat0, params.lat0.sin(), e).powf(n)
        };

        Ok(LambertConformalConic { e, k0: params.k0, n, c, rho0 })
    }
}

impl MapProjection for LambertConformalConic {
    fn forward(&self, lam: f64, phi: f64) -> CrsResult<(f64, f64)> {
        let rho = if (phi.abs() - HALFPI).abs() < EPS10 {
            if phi * self.n <= 0.0 {
                return Err(CrsError::domain(self.name(), "pole opposite to the cone apex"));
            }
            0.0
        } else {
            self.c * tsfn(phi, phi.sin(), self.e).powf(self.n)
        };
        let theta = lam * self.n;
        Ok((
            self.k0 * rho * theta.sin(),
            self.k0 * (self.rho0 - rho * theta.cos()),
        ))
    }

    fn inverse(&self, x: f64, y: f64) -> CrsResult<(f64, f64)> {
        let mut x = x / self.k0;
        let mut y = self.rho0 - y / self.k0;
        let mut rho = x.hypot(y);
        if rho == 0.0 {
            let pole = if self.n > 0.0 { HALFPI } else { -HALFPI };
            return Ok((0.0, pole));
        }
        if self.n < 0.0 {
            rho = -rho;
            x = -x;
            y = -y;
        }
        let phi = phi2((rho / self.c).powf(1.0 / self.n), self.e);
        Ok((x.atan2(y) / self.n, phi))
    }

    fn name(&self) -> &'static str {
        "Lambert Conformal Conic"
    }
}
