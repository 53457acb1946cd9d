//! Series expansions and iterations shared by the projection families

use std::f64::consts::PI;
use log::warn;

pub const HALFPI: f64 = PI / 2.0;
pub const FORTPI: f64 = PI / 4.0;
pub const TWOPI: f64 = PI * 2.0;
pub const EPS10: f64 = 1e-10;
pub const EPS11: f64 = 1e-11;
pub const MAX_ITER: usize = 10;

/// Bring a longitude into the range (-PI, PI]
pub fn adjust_lon(mut lon: f64) -> f64 {
    if lon.abs() <= PI {
        return lon;
    }
    lon %= TWOPI;
    if lon > PI {
        lon -= TWOPI;
    } else if lon <= -PI {
        lon += TWOPI;
    }
    lon
}

/// Radius of the parallel divided by the semi-major axis
pub fn msfn(sin_phi: f64, cos_phi: f64, es: f64) -> f64 {
    cos_phi / (1.0 - es * sin_phi * sin_phi).sqrt()
}

/// Isometric latitude helper `t` of the conformal projections
pub fn tsfn(phi: f64, sin_phi: f64, e: f64) -> f64 {
    let con = e * sin_phi;
    (0.5 * (HALFPI - phi)).tan() / ((1.0 - con) / (1.0 + con)).powf(0.5 * e)
}

/// Latitude from `t`, the inverse of [`tsfn`]
pub fn phi2(ts: f64, e: f64) -> f64 {
    let eccnth = 0.5 * e;
    let mut phi = HALFPI - 2.0 * ts.atan();
    for _ in 0..15 {
        let con = e * phi.sin();
        let dphi = HALFPI - 2.0 * (ts * ((1.0 - con) / (1.0 + con)).powf(eccnth)).atan() - phi;
        phi += dphi;
        if dphi.abs() <= EPS10 {
            return phi;
        }
    }
    warn!("Latitude iteration did not converge for t = {}", ts);
    phi
}

/// Coefficients of the meridian distance series
pub fn enfn(es: f64) -> [f64; 5] {
    const C00: f64 = 1.0;
    const C02: f64 = 0.25;
    const C04: f64 = 0.046875;
    const C06: f64 = 0.01953125;
    const C08: f64 = 0.01068115234375;
    const C22: f64 = 0.75;
    const C44: f64 = 0.46875;
    const C46: f64 = 0.013020833333333333;
    const C48: f64 = 0.007120768229166667;
    const C66: f64 = 0.3645833333333333;
    const C68: f64 = 0.005696614583333333;
    const C88: f64 = 0.3076171875;

    let mut en = [0.0; 5];
    en[0] = C00 - es * (C02 + es * (C04 + es * (C06 + es * C08)));
    en[1] = es * (C22 - es * (C04 + es * (C06 + es * C08)));
    let mut t = es * es;
    en[2] = t * (C44 - es * (C46 + es * C48));
    t *= es;
    en[3] = t * (C66 - es * C68);
    en[4] = t * es * C88;
    en
}

/// Meridian distance from the equator, in units of the semi-major axis
pub fn mlfn(phi: f64, sin_phi: f64, cos_phi: f64, en: &[f64; 5]) -> f64 {
    let c = cos_phi * sin_phi;
    let s = sin_phi * sin_phi;
    en[0] * phi - c * (en[1] + s * (en[2] + s * (en[3] + s * en[4])))
}

/// Latitude for a meridian distance, the inverse of [`mlfn`]
pub fn inv_mlfn(arg: f64, es: f64, en: &[f64; 5]) -> f64 {
    let k = 1.0 / (1.0 - es);
    let mut phi = arg;
    for _ in 0..MAX_ITER {
        let s = phi.sin();
        let t = 1.0 - es * s * s;
        let delta = (mlfn(phi, s, phi.cos(), en) - arg) * (t * t.sqrt()) * k;
        phi -= delta;
        if delta.abs() < EPS11 {
            return phi;
        }
    }
    warn!("Meridian distance inversion did not converge for {}", arg);
    phi
}

/// Authalic `q` for a given sine of latitude
pub fn qsfn(sin_phi: f64, e: f64, one_es: f64) -> f64 {
    if e >= 1e-7 {
        let con = e * sin_phi;
        one_es * (sin_phi / (1.0 - con * con) - (0.5 / e) * ((1.0 - con) / (1.0 + con)).ln())
    } else {
        sin_phi + sin_phi
    }
}

/// Coefficients for converting authalic to geodetic latitude
pub fn authset(es: f64) -> [f64; 3] {
    const P00: f64 = 1.0 / 3.0;
    const P01: f64 = 31.0 / 180.0;
    const P02: f64 = 517.0 / 5040.0;
    const P10: f64 = 23.0 / 360.0;
    const P11: f64 = 251.0 / 3780.0;
    const P20: f64 = 761.0 / 45360.0;

    let mut apa = [0.0; 3];
    apa[0] = es * P00;
    let mut t = es * es;
    apa[0] += t * P01;
    apa[1] = t * P10;
    t *= es;
    apa[0] += t * P02;
    apa[1] += t * P11;
    apa[2] = t * P20;
    apa
}

/// Geodetic latitude from authalic latitude `beta`
pub fn authlat(beta: f64, apa: &[f64; 3]) -> f64 {
    let t = beta + beta;
    beta + apa[0] * t.sin() + apa[1] * (t + t).sin() + apa[2] * (t + t + t).sin()
}

/// Helper of the Gauss conformal sphere
pub fn srat(esinp: f64, exp: f64) -> f64 {
    ((1.0 - esinp) / (1.0 + esinp)).powf(exp)
}
