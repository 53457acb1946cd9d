//! Tests for lookups in the shipped definitions

use std::sync::Arc;

use approx::assert_abs_diff_eq;

use crate::model::{CoordinateSystem, CrsCode, CrsType, Unit};
use crate::projection::ProjectionKind;
use crate::store::CrsStore;
use crate::transform::Transformation;
use super::test_utils::minimal_definitions;

fn store() -> CrsStore {
    CrsStore::from_default_definitions().unwrap()
}

#[test]
fn test_default_definitions_load() {
    let store = store();
    assert_eq!(store.id(), "crskit-default");
    assert!(store.description().is_some());
    assert_eq!(store.len(), 28);
    for code in ["EPSG:4326", "CRS:84", "EPSG:4258", "EPSG:31467", "EPSG:3857", "EPSG:7415", "EPSG:4978"] {
        assert!(store.get_crs_by_code(code).is_some(), "{} missing", code);
    }
}

#[test]
fn test_gauss_kruger_zone_2() {
    let store = store();
    let crs = store.get_crs_by_code("EPSG:31466").unwrap();
    assert_eq!(crs.crs_type(), CrsType::Projected);
    assert_eq!(crs.name(), "DHDN / 3-degree Gauss-Kruger zone 2");

    let projected = match crs.as_ref() {
        CoordinateSystem::Projected(projected) => projected,
        other => panic!("expected a projected system, got {}", other),
    };
    let projection = projected.projection();
    assert_eq!(projection.kind(), ProjectionKind::TransverseMercator);
    assert_abs_diff_eq!(projection.projection_longitude().to_degrees(), 6.0, epsilon = 1e-12);
    assert_eq!(projection.projection_latitude(), 0.0);
    assert_eq!(projection.scale(), 1.0);
    assert_eq!(projection.false_easting(), 2500000.0);
    assert_eq!(projection.false_northing(), 0.0);
    assert_eq!(projection.units(), Unit::Metre);

    let datum = projected.base().datum();
    assert_eq!(datum.id().code(), &CrsCode::epsg(6314));
    assert_eq!(datum.ellipsoid().semi_major_axis(), 6377397.155);
    assert_eq!(datum.ellipsoid().inverse_flattening(), 299.1528128);
    assert!(datum.prime_meridian().is_greenwich());

    let helmert = datum.to_wgs84().unwrap();
    assert_eq!(helmert.values(), [598.1, 73.7, 418.2, 0.202, 0.045, -2.455, 6.7]);
}

#[test]
fn test_code_notations_resolve_alike() {
    let store = store();
    let expected = store.get_crs_by_code("EPSG:31466").unwrap();
    for code in ["epsg:31466", "31466", "urn:ogc:def:crs:EPSG::31466", "http://www.opengis.net/def/crs/EPSG/0/31466"] {
        let found = store.get_crs_by_code(code).unwrap();
        assert!(Arc::ptr_eq(&expected, &found), "{} resolved differently", code);
    }
}

#[test]
fn test_unknown_codes() {
    let store = store();
    assert!(store.get_crs_by_code("SOME_DUMMY_CODE").is_none());
    assert!(store.get_crs_by_code("EPSG:99999").is_none());
    assert!(store.get_crs_by_code("").is_none());
    assert!(store.require("SOME_DUMMY_CODE").is_err());
    // component codes are not coordinate systems
    assert!(store.get_crs_by_code("EPSG:7004").is_none());
}

#[test]
fn test_aliases() {
    let store = store();
    let pseudo = store.get_crs_by_code("EPSG:900913").unwrap();
    assert_eq!(pseudo.code(), &CrsCode::epsg(3857));
    assert_eq!(pseudo.id().codes().len(), 2);
}

#[test]
fn test_component_lookups() {
    let store = store();
    assert_eq!(store.get_ellipsoid_for_id("EPSG:7004").unwrap().id().name(), "Bessel 1841");
    assert_eq!(store.get_geodetic_datum_for_id("EPSG:6289").unwrap().id().name(), "Amersfoort");
    let paris = store.get_prime_meridian_for_id("EPSG:8903").unwrap();
    assert_eq!(paris.units(), Unit::Grad);
    assert_eq!(store.get_projection_for_id("EPSG:19914").unwrap().kind(), ProjectionKind::ObliqueStereographic);
    assert!(store.get_helmert_for_id("EPSG:1149").unwrap().is_identity());
    assert!(store.get_helmert_for_id("EPSG:4326").is_none());
}

#[test]
fn test_available_codes_are_sorted() {
    let store = store();
    let codes = store.available_codes();
    assert_eq!(codes.len(), store.len());
    assert!(codes.windows(2).all(|pair| pair[0] < pair[1]));
    // aliases are not listed
    assert!(!codes.contains(&CrsCode::epsg(900913)));

    let systems = store.systems();
    assert_eq!(systems[0].code(), &CrsCode::epsg(4326));
    assert_eq!(systems.len(), codes.len());
}

#[test]
fn test_systems_are_grouped_by_kind() {
    let geocentric_first = format!(
        r#"
[[geocentric_crs]]
codes = "EPSG:4978"
name = "WGS 84 (geocentric)"
datum = "EPSG:6326"
{}"#,
        minimal_definitions("ordering", "WGS 84")
    );
    let store = CrsStore::create(&geocentric_first).unwrap();
    let kinds: Vec<CrsType> = store.systems().iter().map(|crs| crs.crs_type()).collect();
    assert_eq!(kinds, vec![CrsType::Geographic, CrsType::Geocentric]);
}

#[test]
fn test_datum_shift_lookup() {
    let store = store();
    let dhdn = store.require("EPSG:31467").unwrap();
    let etrs89 = store.require("EPSG:25832").unwrap();
    let shift = store.get_transformation(&dhdn, &etrs89).unwrap();
    assert!(shift.steps().iter().any(|step| step.implementation_name() == "Helmert"));
    assert_eq!(shift.source().code(), &CrsCode::epsg(4314));
    assert_eq!(shift.target().code(), &CrsCode::epsg(4258));

    let utm = store.require("EPSG:25833").unwrap();
    match store.get_transformation(&etrs89, &utm) {
        Some(Transformation::Identity { source, target }) => {
            assert_eq!(source.code(), &CrsCode::epsg(4258));
            assert_eq!(target.code(), &CrsCode::epsg(4258));
        }
        other => panic!("expected an identity, got {:?}", other.map(|t| t.describe())),
    }

    let nap = store.require("EPSG:5709").unwrap();
    assert!(store.get_transformation(&nap, &etrs89).is_none());
}

#[test]
fn test_compound_definition() {
    let store = store();
    let compound = store.require("EPSG:7415").unwrap();
    assert_eq!(compound.dimension(), 3);
    assert_eq!(compound.underlying().code(), &CrsCode::epsg(28992));
    assert_eq!(compound.datum().unwrap().id().code(), &CrsCode::epsg(6289));
}

#[test]
fn test_from_file() {
    let path = std::env::temp_dir().join(format!("crskit_store_{}.toml", std::process::id()));
    std::fs::write(&path, super::test_utils::minimal_definitions("from-file", "WGS 84 from file")).unwrap();
    let store = CrsStore::from_file(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(store.id(), "from-file");
    assert_eq!(store.require("4326").unwrap().name(), "WGS 84 from file");
    assert!(CrsStore::from_file(&path).is_err());
}

#[test]
fn test_default_direct_datum_shifts() {
    let store = store();
    let shifts = store.datum_shifts();
    assert_eq!(shifts.len(), 1);
    assert_eq!(shifts[0].parameters().id().code(), &CrsCode::new("EPSG", "1776"));
    assert_eq!(shifts[0].source().id().code(), &CrsCode::new("EPSG", "6314"));
    assert_eq!(shifts[0].target().id().code(), &CrsCode::new("EPSG", "6258"));

    let dhdn = store.require("EPSG:31467").unwrap();
    let etrs89 = store.require("EPSG:4258").unwrap();
    assert!(shifts[0].connects(dhdn.datum().unwrap(), etrs89.datum().unwrap()));
    assert!(!shifts[0].connects(etrs89.datum().unwrap(), dhdn.datum().unwrap()));
}
