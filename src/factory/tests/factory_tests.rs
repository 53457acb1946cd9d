use std::sync::Arc;

use approx::assert_abs_diff_eq;
use nalgebra::Point3;

use crate::errors::CrsError;
use crate::factory::TransformationFactory;
use crate::model::wgs84::{WGS84_DATUM, WGS84_GEOGRAPHIC};
use crate::model::{
    Axis, AxisOrientation, CoordinateSystem, CrsCode, GeographicCrs, Identifiable, Unit, VerticalCrs,
};
use crate::store::CrsStore;
use crate::transform::Transformation;

const LOCAL_DEFINITIONS: &str = r#"
[provider]
id = "factory-test"

[[ellipsoid]]
codes = "TEST:BESSEL"
name = "Bessel 1841"
semi_major_axis = 6377397.155
inverse_flattening = 299.1528128

[[datum]]
codes = "TEST:LOCAL"
name = "Local datum without shift"
ellipsoid = "TEST:BESSEL"

[[geographic_crs]]
codes = "TEST:LOCAL_GEOGRAPHIC"
name = "Local"
datum = "TEST:LOCAL"
"#;

fn default_store() -> CrsStore {
    CrsStore::from_default_definitions().unwrap()
}

fn lat_lon_wgs84() -> Arc<CoordinateSystem> {
    let axes = vec![
        Axis::new("latitude", AxisOrientation::North, Unit::Degree),
        Axis::new("longitude", AxisOrientation::East, Unit::Degree),
    ];
    Arc::new(CoordinateSystem::Geographic(
        GeographicCrs::new(Identifiable::new(CrsCode::new("test", "4326_latlon"), "WGS 84 lat/lon"), WGS84_DATUM.clone(), axes)
            .unwrap(),
    ))
}

fn vertical(code: &str, datum: &str, units: Unit) -> Arc<CoordinateSystem> {
    let axis = Axis::new("height", AxisOrientation::Up, units);
    Arc::new(CoordinateSystem::Vertical(
        VerticalCrs::new(Identifiable::new(CrsCode::parse(code), code), datum, axis).unwrap(),
    ))
}

#[test]
fn test_same_system_needs_nothing() {
    let store = default_store();
    let crs = store.require("EPSG:25832").unwrap();
    assert!(TransformationFactory::new().build(&crs, &crs).unwrap().is_none());

    // aliases resolve to the same definition
    let a = store.require("EPSG:3857").unwrap();
    let b = store.require("EPSG:900913").unwrap();
    assert!(TransformationFactory::new().build(&a, &b).unwrap().is_none());
}

#[test]
fn test_flipped_axes_give_a_swap() {
    let chain = TransformationFactory::new().build(&WGS84_GEOGRAPHIC, &lat_lon_wgs84()).unwrap().unwrap();
    assert_eq!(chain.steps().len(), 1);
    assert_eq!(chain.implementation_name(), "Matrix");

    let mut points = vec![Point3::new(9.0, 48.0, 0.0)];
    chain.apply(&mut points).unwrap();
    assert_eq!((points[0].x, points[0].y), (48.0, 9.0));
}

#[test]
fn test_projected_to_projected_on_same_datum() {
    let store = default_store();
    let source = store.require("EPSG:4647").unwrap();
    let target = store.require("EPSG:25832").unwrap();
    let chain = TransformationFactory::new().build(&source, &target).unwrap().unwrap();

    // no datum shift between systems on the same base
    assert!(chain.steps().iter().all(|step| step.implementation_name() != "Helmert"));

    let mut points = vec![Point3::new(32574177.309926, 6020313.020522, 0.0)];
    chain.apply(&mut points).unwrap();
    assert_abs_diff_eq!(points[0].x, 574177.309926, epsilon = 1e-4);
    assert_abs_diff_eq!(points[0].y, 6020313.020522, epsilon = 1e-4);
}

#[test]
fn test_datum_shift_chain() {
    let store = default_store();
    let source = store.require("EPSG:31467").unwrap();
    let target = store.require("EPSG:4258").unwrap();
    let chain = TransformationFactory::new().build(&source, &target).unwrap().unwrap();

    // the zero ETRS89 shift and the metre normalization disappear
    assert_eq!(
        chain.describe(),
        "Transverse Mercator epsg:16263 (inverse) -> Geocentric epsg:7004 -> Helmert epsg:1777 \
         -> Geocentric epsg:7019 (inverse) -> Matrix 3x3"
    );
    assert_eq!(chain.source().code(), &CrsCode::epsg(31467));
    assert_eq!(chain.target().code(), &CrsCode::epsg(4258));
}

#[test]
fn test_datum_shift_between_geographic_and_geocentric() {
    let store = default_store();
    let geographic = store.require("EPSG:4258").unwrap();
    let geocentric = store.require("EPSG:4936").unwrap();

    let shift = TransformationFactory::new().datum_shift(&geographic, &geocentric).unwrap().unwrap();
    assert_eq!(shift.implementation_name(), "Geocentric");
    let back = TransformationFactory::new().datum_shift(&geocentric, &geographic).unwrap().unwrap();
    assert!(shift.is_inverse_of(&back));

    assert!(TransformationFactory::new().datum_shift(&geographic, &geographic).unwrap().is_none());
}

#[test]
fn test_datum_without_shift_parameters() {
    let local = CrsStore::create(LOCAL_DEFINITIONS).unwrap();
    let source = local.require("TEST:LOCAL_GEOGRAPHIC").unwrap();
    let result = TransformationFactory::new().build(&source, &WGS84_GEOGRAPHIC);
    match result {
        Err(CrsError::TransformationPath { reason, .. }) => assert!(reason.contains("test:local")),
        other => panic!("expected a path error, got {:?}", other.map(|c| c.map(|t| t.describe()))),
    }
}

#[test]
fn test_vertical_systems() {
    let metres = vertical("test:nap_m", "Normaal Amsterdams Peil", Unit::Metre);
    let feet = vertical("test:nap_ft", "normaal amsterdams peil", Unit::Foot);
    let other = vertical("test:dhhn", "Deutsches Haupthoehennetz 1992", Unit::Metre);

    let chain = TransformationFactory::new().build(&metres, &feet).unwrap().unwrap();
    let mut points = vec![Point3::new(1.0, 2.0, 3.048)];
    chain.apply(&mut points).unwrap();
    assert_abs_diff_eq!(points[0].x, 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(points[0].y, 2.0, epsilon = 1e-12);
    assert_abs_diff_eq!(points[0].z, 10.0, epsilon = 1e-12);

    assert!(matches!(
        TransformationFactory::new().build(&metres, &other),
        Err(CrsError::TransformationPath { .. })
    ));
    assert!(matches!(
        TransformationFactory::new().build(&metres, &WGS84_GEOGRAPHIC),
        Err(CrsError::TransformationPath { .. })
    ));
}

#[test]
fn test_chains_are_cached_per_direction() {
    let store = default_store();
    let source = store.require("EPSG:28992").unwrap();
    let target = store.require("EPSG:25832").unwrap();
    let factory = TransformationFactory::new();

    let first = factory.create(&source, &target).unwrap().unwrap();
    let second = factory.create(&source, &target).unwrap().unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(factory.cached_pairs(), 1);

    let reverse = factory.create(&target, &source).unwrap().unwrap();
    assert_eq!(reverse.source().code(), target.code());
    assert_eq!(factory.cached_pairs(), 2);

    assert!(factory.create(&source, &source).unwrap().is_none());
    assert_eq!(factory.cached_pairs(), 3);

    factory.clear();
    assert_eq!(factory.cached_pairs(), 0);
}

#[test]
fn test_concurrent_creation_publishes_one_chain() {
    let store = default_store();
    let source = store.require("EPSG:31467").unwrap();
    let target = store.require("EPSG:3857").unwrap();
    let factory = TransformationFactory::new();

    let chains: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| factory.create(&source, &target).unwrap().unwrap()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert_eq!(factory.cached_pairs(), 1);
    let cached = factory.create(&source, &target).unwrap().unwrap();
    assert!(chains.iter().all(|chain| chain.describe() == cached.describe()));
}

#[test]
fn test_built_chains_keep_requested_endpoints() {
    let store = default_store();
    let factory = TransformationFactory::new();
    let pairs = [
        ("EPSG:7415", "EPSG:4978"),
        ("EPSG:4978", "EPSG:7415"),
        ("EPSG:4936", "EPSG:4314"),
        ("EPSG:4314", "EPSG:4936"),
        ("EPSG:4326", "EPSG:4978"),
        ("EPSG:31466", "EPSG:25833"),
        ("EPSG:3857", "EPSG:4326"),
    ];
    for (source_code, target_code) in pairs {
        let source = store.require(source_code).unwrap();
        let target = store.require(target_code).unwrap();
        let chain = factory.build(&source, &target).unwrap().unwrap();

        assert_eq!(chain.source().code(), source.code(), "{}", chain);
        assert_eq!(chain.target().code(), target.code(), "{}", chain);
        assert!(chain.contains(&source) && chain.contains(&target), "{}", chain);
        assert!(chain.to_string().starts_with(&format!("{} => {}", source.code(), target.code())));
    }
}

#[test]
fn test_compound_to_geocentric_applies() {
    let store = default_store();
    let source = store.require("EPSG:7415").unwrap();
    let target = store.require("EPSG:4978").unwrap();
    let chain = TransformationFactory::new().build(&source, &target).unwrap().unwrap();

    let mut points = vec![Point3::new(155000.0, 463000.0, 0.0)];
    chain.apply(&mut points).unwrap();
    let radius = points[0].coords.norm();
    assert!(radius > 6.36e6 && radius < 6.39e6, "{}", radius);
}

#[test]
fn test_direct_datum_shift_is_preferred() {
    let store = default_store();
    let source = store.require("EPSG:31467").unwrap();
    let target = store.require("EPSG:25832").unwrap();
    let direct = TransformationFactory::with_datum_shifts(store.datum_shifts().to_vec());

    let chain = direct.build(&source, &target).unwrap().unwrap();
    let helmerts: Vec<String> = chain
        .steps()
        .iter()
        .filter(|step| step.implementation_name() == "Helmert")
        .map(|step| step.describe())
        .collect();
    assert_eq!(helmerts, vec!["Helmert epsg:1776".to_string()]);

    let reverse = direct.build(&target, &source).unwrap().unwrap();
    assert!(reverse.describe().contains("Helmert epsg:1776 (inverse)"));

    // same parameters as the detour through WGS 84, so the same result
    let detour = TransformationFactory::new().build(&source, &target).unwrap().unwrap();
    assert!(detour.describe().contains("Helmert epsg:1777"));
    let mut through_direct = vec![Point3::new(3532465.57, 5301523.49, 0.0)];
    let mut through_wgs84 = through_direct.clone();
    chain.apply(&mut through_direct).unwrap();
    detour.apply(&mut through_wgs84).unwrap();
    assert_abs_diff_eq!(through_direct[0].x, through_wgs84[0].x, epsilon = 1e-6);
    assert_abs_diff_eq!(through_direct[0].y, through_wgs84[0].y, epsilon = 1e-6);
}

#[test]
fn test_direct_shift_relates_datums_without_wgs84_parameters() {
    let definitions = format!(
        r#"{}
[[helmert]]
codes = "TEST:LOCAL_TO_WGS84_GEOCENTRIC"
name = "Local to WGS 84, translation only"
source = "TEST:LOCAL_GEOGRAPHIC"
target = "EPSG:4978"
dx = 100.0
dy = -20.0
"#,
        LOCAL_DEFINITIONS.replace("[provider]\nid = \"factory-test\"\n", "")
    );
    let store = CrsStore::create(&format!("{}{}", crate::store::DEFAULT_DEFINITIONS, definitions)).unwrap();
    let factory = TransformationFactory::with_datum_shifts(store.datum_shifts().to_vec());
    let local = store.require("TEST:LOCAL_GEOGRAPHIC").unwrap();
    let wgs84 = store.require("EPSG:4978").unwrap();

    // without the configured shift the local datum cannot be related
    assert!(matches!(
        TransformationFactory::new().build(&local, &wgs84),
        Err(CrsError::TransformationPath { .. })
    ));

    let chain = factory.build(&wgs84, &local).unwrap().unwrap();
    assert!(chain.describe().contains("Helmert test:local_to_wgs84_geocentric (inverse)"));

    let inverse = chain.invert().unwrap();
    let mut points = vec![Point3::new(4000000.0, 500000.0, 4900000.0)];
    chain.apply(&mut points).unwrap();
    inverse.apply(&mut points).unwrap();
    assert_abs_diff_eq!(points[0].x, 4000000.0, epsilon = 1e-4);
    assert_abs_diff_eq!(points[0].y, 500000.0, epsilon = 1e-4);
    assert_abs_diff_eq!(points[0].z, 4900000.0, epsilon = 1e-4);
}

#[test]
fn test_supplied_transformation_wins() {
    let store = default_store();
    let etrs89 = store.require("EPSG:4258").unwrap();
    let wgs84 = store.require("EPSG:4326").unwrap();
    let supplied = Transformation::Identity { source: etrs89.clone(), target: wgs84.clone() };
    let factory = TransformationFactory::new();

    let forward = factory.create_with(&etrs89, &wgs84, std::slice::from_ref(&supplied)).unwrap().unwrap();
    assert_eq!(forward.implementation_name(), "Identity");
    let backward = factory.create_with(&wgs84, &etrs89, std::slice::from_ref(&supplied)).unwrap().unwrap();
    assert_eq!(backward.source().code(), wgs84.code());
    assert_eq!(backward.target().code(), etrs89.code());
    // supplied transformations are not cached
    assert_eq!(factory.cached_pairs(), 0);

    let dhdn = store.require("EPSG:31467").unwrap();
    let built = factory.create_with(&dhdn, &etrs89, &[supplied]).unwrap().unwrap();
    assert!(built.describe().contains("Helmert"));
    assert_eq!(factory.cached_pairs(), 1);
}
