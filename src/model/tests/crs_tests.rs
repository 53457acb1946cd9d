use std::sync::Arc;

use crate::errors::CrsError;
use crate::model::wgs84::{WGS84_DATUM, WGS84_GEOGRAPHIC};
use crate::model::{
    Axis, AxisOrientation, CompoundCrs, CoordinateSystem, CrsCode, CrsType, GeocentricCrs, GeographicCrs,
    Identifiable, ProjectedCrs, Unit, VerticalCrs,
};
use crate::projection::{Projection, ProjectionKind};

fn id(code: &str) -> Identifiable {
    Identifiable::new(CrsCode::parse(code), code)
}

fn lat_lon_axes() -> Vec<Axis> {
    vec![
        Axis::new("latitude", AxisOrientation::North, Unit::Degree),
        Axis::new("longitude", AxisOrientation::East, Unit::Degree),
    ]
}

fn utm32() -> Arc<Projection> {
    Arc::new(
        Projection::new(
            id("epsg:16032"),
            ProjectionKind::TransverseMercator,
            (9f64.to_radians(), 0.0),
            0.9996,
            (500000.0, 0.0),
            Unit::Metre,
        )
        .unwrap(),
    )
}

fn wgs84_base() -> GeographicCrs {
    GeographicCrs::new(id("epsg:4326"), WGS84_DATUM.clone(), Axis::default_geographic()).unwrap()
}

#[test]
fn test_geographic_axis_validation() {
    let metres = Axis::default_projected();
    let result = GeographicCrs::new(id("test:bad"), WGS84_DATUM.clone(), metres);
    assert!(matches!(result, Err(CrsError::Configuration(_))));

    let parallel = vec![
        Axis::new("a", AxisOrientation::East, Unit::Degree),
        Axis::new("b", AxisOrientation::West, Unit::Degree),
    ];
    assert!(GeographicCrs::new(id("test:parallel"), WGS84_DATUM.clone(), parallel).is_err());

    let too_few = vec![Axis::new("a", AxisOrientation::East, Unit::Degree)];
    assert!(GeographicCrs::new(id("test:short"), WGS84_DATUM.clone(), too_few).is_err());

    assert!(GeographicCrs::new(id("test:latlon"), WGS84_DATUM.clone(), lat_lon_axes()).is_ok());
}

#[test]
fn test_geocentric_needs_front_axis() {
    let axes = vec![
        Axis::new("X", AxisOrientation::East, Unit::Metre),
        Axis::new("Y", AxisOrientation::North, Unit::Metre),
        Axis::new("Z", AxisOrientation::Up, Unit::Metre),
    ];
    assert!(GeocentricCrs::new(id("test:geocentric"), WGS84_DATUM.clone(), axes).is_err());

    let derived = GeocentricCrs::for_datum(WGS84_DATUM.clone());
    assert_eq!(derived.id().code(), &CrsCode::new("epsg", "6326_geocentric"));
    assert_eq!(derived.axes().len(), 3);
}

#[test]
fn test_vertical_needs_linear_unit() {
    let degrees = Axis::new("height", AxisOrientation::Up, Unit::Degree);
    assert!(VerticalCrs::new(id("test:vertical"), "NAP", degrees).is_err());
    let nap = VerticalCrs::new(id("epsg:5709"), "Normaal Amsterdams Peil", Axis::default_vertical()).unwrap();
    assert_eq!(nap.datum_name(), "Normaal Amsterdams Peil");
}

#[test]
fn test_compound_system() {
    let vertical = Arc::new(VerticalCrs::new(id("epsg:5709"), "NAP", Axis::default_vertical()).unwrap());
    let compound = CompoundCrs::new(id("test:compound"), WGS84_GEOGRAPHIC.clone(), vertical.clone(), 5.0).unwrap();
    let crs = CoordinateSystem::Compound(compound);

    assert_eq!(crs.crs_type(), CrsType::Compound);
    assert_eq!(crs.dimension(), 3);
    assert_eq!(crs.height_unit(), Some(Unit::Metre));
    assert!(crs.datum().unwrap().is_wgs84());
    assert_eq!(crs.underlying().code(), &CrsCode::epsg(4326));

    let nested = Arc::new(crs);
    assert!(CompoundCrs::new(id("test:nested"), nested, vertical, 0.0).is_err());
}

#[test]
fn test_projected_system_accessors() {
    let crs = CoordinateSystem::Projected(
        ProjectedCrs::new(id("epsg:32632"), wgs84_base(), utm32(), Axis::default_projected()).unwrap(),
    );
    assert_eq!(crs.crs_type(), CrsType::Projected);
    assert_eq!(crs.geographic_base().unwrap().id().code(), &CrsCode::epsg(4326));
    assert_eq!(crs.height_unit(), None);
    assert_eq!(crs.to_string(), "epsg:32632 (epsg:32632) [Projected]");
}

#[test]
fn test_same_definition_ignores_codes() {
    let a = CoordinateSystem::Projected(
        ProjectedCrs::new(id("epsg:32632"), wgs84_base(), utm32(), Axis::default_projected()).unwrap(),
    );
    let b = CoordinateSystem::Projected(
        ProjectedCrs::new(id("test:utm32"), wgs84_base(), utm32(), Axis::default_projected()).unwrap(),
    );
    assert!(a.same_definition(&b));
    assert!(!a.same_definition(&WGS84_GEOGRAPHIC));
}

#[test]
fn test_equal_with_flipped_axis() {
    let lat_lon = CoordinateSystem::Geographic(
        GeographicCrs::new(id("test:latlon"), WGS84_DATUM.clone(), lat_lon_axes()).unwrap(),
    );
    assert!(lat_lon.equal_with_flipped_axis(&WGS84_GEOGRAPHIC));
    assert!(WGS84_GEOGRAPHIC.equal_with_flipped_axis(&lat_lon));
    assert!(!WGS84_GEOGRAPHIC.equal_with_flipped_axis(&WGS84_GEOGRAPHIC));
    assert!(!lat_lon.same_definition(&WGS84_GEOGRAPHIC));
}
