use std::sync::Arc;

use approx::assert_abs_diff_eq;
use nalgebra::Vector4;

use crate::model::wgs84::{GREENWICH, WGS84_DATUM, WGS84_ELLIPSOID};
use crate::model::{CrsCode, Ellipsoid, GeodeticDatum, HelmertParameters, Identifiable, PrimeMeridian, Unit};

fn id(code: &str) -> Identifiable {
    Identifiable::new(CrsCode::parse(code), code)
}

fn grs80() -> Arc<Ellipsoid> {
    Arc::new(Ellipsoid::from_inverse_flattening(id("epsg:7019"), 6378137.0, 298.257222101, Unit::Metre))
}

#[test]
fn test_units() {
    assert_abs_diff_eq!(Unit::Degree.to_base(180.0), std::f64::consts::PI, epsilon = 1e-15);
    assert_abs_diff_eq!(Unit::Grad.to_base(200.0), std::f64::consts::PI, epsilon = 1e-15);
    assert_abs_diff_eq!(Unit::UsSurveyFoot.to_base(3937.0), 1200.0, epsilon = 1e-9);
    assert_abs_diff_eq!(Unit::Kilometre.from_base(1500.0), 1.5, epsilon = 1e-12);
    assert!(Unit::ArcSecond.is_angular());
    assert!(Unit::Foot.is_linear());
    assert_eq!(Unit::from_name("Meter"), Some(Unit::Metre));
    assert_eq!(Unit::from_name("gon"), Some(Unit::Grad));
    assert_eq!(Unit::from_name("furlong"), None);
}

#[test]
fn test_ellipsoid_from_inverse_flattening() {
    let bessel = Ellipsoid::from_inverse_flattening(id("epsg:7004"), 6377397.155, 299.1528128, Unit::Metre);
    assert_abs_diff_eq!(bessel.semi_minor_axis(), 6356078.963, epsilon = 1e-3);
    assert_abs_diff_eq!(bessel.eccentricity_squared(), 0.006674372, epsilon = 1e-9);
    assert_abs_diff_eq!(bessel.eccentricity(), bessel.eccentricity_squared().sqrt(), epsilon = 1e-15);
    assert!(!bessel.is_sphere());
}

#[test]
fn test_ellipsoid_from_semi_minor_axis() {
    let clarke = Ellipsoid::from_semi_minor_axis(id("epsg:7008"), 6378206.4, 6356583.8, Unit::Metre);
    assert_abs_diff_eq!(clarke.inverse_flattening(), 294.9786982, epsilon = 1e-6);

    let sphere = Ellipsoid::from_semi_minor_axis(id("test:sphere"), 6371000.0, 6371000.0, Unit::Metre);
    assert!(sphere.is_sphere());
    assert_eq!(sphere.flattening(), 0.0);
}

#[test]
fn test_ellipsoid_same_shape_ignores_units_and_id() {
    let in_km = Ellipsoid::from_inverse_flattening(id("test:km"), 6378.137, 298.257222101, Unit::Kilometre);
    assert!(grs80().same_shape(&in_km));
    assert!(!grs80().same_shape(&WGS84_ELLIPSOID));
}

#[test]
fn test_prime_meridian() {
    let paris = PrimeMeridian::new(id("epsg:8903"), 2.5969213, Unit::Grad);
    assert_abs_diff_eq!(paris.longitude_as_radian().to_degrees(), 2.33722917, epsilon = 1e-8);
    assert!(!paris.is_greenwich());
    assert!(GREENWICH.is_greenwich());
}

#[test]
fn test_helmert_to_affine() {
    let helmert = HelmertParameters::new(id("epsg:1777"), [598.1, 73.7, 418.2], [0.202, 0.045, -2.455], 6.7);
    assert!(!helmert.is_identity());
    assert_eq!(helmert.values(), [598.1, 73.7, 418.2, 0.202, 0.045, -2.455, 6.7]);

    let m = helmert.to_affine();
    let arcsec = Unit::ArcSecond.to_base_factor();
    let scale = 1.0 + 6.7e-6;
    assert_abs_diff_eq!(m[(0, 0)], scale, epsilon = 1e-15);
    assert_abs_diff_eq!(m[(0, 1)], 2.455 * arcsec * scale, epsilon = 1e-15);
    assert_abs_diff_eq!(m[(2, 1)], 0.202 * arcsec * scale, epsilon = 1e-15);
    assert_eq!(m[(0, 3)], 598.1);
    assert_eq!(m[(3, 3)], 1.0);

    let shifted = m * Vector4::new(0.0, 0.0, 0.0, 1.0);
    assert_eq!((shifted.x, shifted.y, shifted.z), (598.1, 73.7, 418.2));
}

#[test]
fn test_zero_helmert_is_identity() {
    let zero = HelmertParameters::new(id("epsg:1149"), [0.0; 3], [0.0; 3], 0.0);
    assert!(zero.is_identity());
    assert_eq!(zero.to_affine(), nalgebra::Matrix4::identity());
}

#[test]
fn test_datum_reference_frames() {
    let zero = Arc::new(HelmertParameters::new(id("epsg:1149"), [0.0; 3], [0.0; 3], 0.0));
    let etrs89 = GeodeticDatum::new(id("epsg:6258"), grs80(), GREENWICH.clone(), Some(zero.clone()));
    let nad83 = GeodeticDatum::new(id("epsg:6269"), grs80(), GREENWICH.clone(), Some(zero));
    let unrelated = GeodeticDatum::new(id("test:local"), grs80(), GREENWICH.clone(), None);
    let unrelated_copy = GeodeticDatum::new(id("test:local"), grs80(), GREENWICH.clone(), None);

    assert!(etrs89.same_reference_frame(&nad83));
    assert!(etrs89.has_wgs84_relation());
    assert!(!etrs89.is_wgs84());
    assert!(WGS84_DATUM.is_wgs84());
    assert!(WGS84_DATUM.has_wgs84_relation());
    // different ellipsoid, so not the same frame even with zero parameters
    assert!(!etrs89.same_reference_frame(&WGS84_DATUM));
    assert!(!unrelated.has_wgs84_relation());
    assert!(!unrelated.same_reference_frame(&etrs89));
    assert!(unrelated.same_reference_frame(&unrelated_copy));
}

#[test]
fn test_datum_prime_meridian_matters() {
    let paris = Arc::new(PrimeMeridian::new(id("epsg:8903"), 2.5969213, Unit::Grad));
    let a = GeodeticDatum::new(id("test:a"), grs80(), GREENWICH.clone(), None);
    let b = GeodeticDatum::new(id("test:a"), grs80(), paris, None);
    assert!(!a.same_reference_frame(&b));
}
