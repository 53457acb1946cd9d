//! Tests for chain building and its simplifications

use approx::assert_abs_diff_eq;
use nalgebra::Point3;

use crate::transform::{concatenate, concatenate3, ProjectionTransform, Transformation};
use super::test_utils::*;

fn run(chain: &Transformation, point: Point3<f64>) -> Point3<f64> {
    let mut points = vec![point];
    chain.apply(&mut points).unwrap();
    points[0]
}

#[test]
fn test_identity_is_elided() {
    assert!(concatenate(None, None).is_none());

    let identity = Transformation::identity(wgs84());
    let chain = concatenate(Some(identity.clone()), Some(to_geocentric())).unwrap();
    assert_eq!(chain.steps().len(), 1);
    assert_eq!(chain.implementation_name(), "Geocentric");

    let chain = concatenate(Some(to_geocentric()), Some(identity)).unwrap();
    assert_eq!(chain.implementation_name(), "Geocentric");
}

#[test]
fn test_inverse_pair_cancels() {
    let helmert = dhdn_to_wgs84();
    let inverse = helmert.invert().unwrap();
    assert!(concatenate(Some(helmert), Some(inverse)).is_none());

    let projection = Transformation::Projection(ProjectionTransform::new(wgs84(), utm32()).unwrap());
    let unprojection = projection.invert().unwrap();
    assert!(concatenate(Some(unprojection), Some(projection)).is_none());
}

#[test]
fn test_cancellation_inside_chains() {
    let geocentric = to_geocentric();
    let back = geocentric.invert().unwrap();
    let first = concatenate(Some(scale(2.0)), Some(geocentric)).unwrap();
    let second = concatenate(Some(back), Some(translate(1.0, 0.0))).unwrap();

    // scale, geocentric, geocentric inverse, translate: the middle cancels
    // and the two matrices collapse
    let chain = concatenate(Some(first), Some(second)).unwrap();
    assert_eq!(chain.steps().len(), 1);
    let p = run(&chain, Point3::new(0.1, 0.2, 0.0));
    assert_abs_diff_eq!(p.x, 1.2, epsilon = 1e-12);
    assert_abs_diff_eq!(p.y, 0.4, epsilon = 1e-12);
}

#[test]
fn test_matrices_collapse_in_application_order() {
    let chain = concatenate(Some(scale(2.0)), Some(translate(1.0, 0.0))).unwrap();
    assert_eq!(chain.steps().len(), 1);
    assert_eq!(chain.implementation_name(), "Matrix");
    assert_eq!(run(&chain, Point3::new(3.0, 4.0, 0.0)), Point3::new(7.0, 8.0, 0.0));

    let reversed = concatenate(Some(translate(1.0, 0.0)), Some(scale(2.0))).unwrap();
    assert_eq!(run(&reversed, Point3::new(3.0, 4.0, 0.0)), Point3::new(8.0, 8.0, 0.0));
}

#[test]
fn test_matrices_collapsing_to_identity_vanish() {
    assert!(concatenate(Some(scale(2.0)), Some(scale(0.5))).is_none());
    assert!(concatenate(Some(translate(1.0, 2.0)), Some(translate(-1.0, -2.0))).is_none());
}

#[test]
fn test_concatenation_is_associative() {
    let left = concatenate(concatenate(Some(scale(2.0)), Some(to_geocentric())), Some(dhdn_to_wgs84().invert().unwrap()))
        .unwrap();
    let right = concatenate(Some(scale(2.0)), concatenate(Some(to_geocentric()), Some(dhdn_to_wgs84().invert().unwrap())))
        .unwrap();
    let three = concatenate3(Some(scale(2.0)), Some(to_geocentric()), Some(dhdn_to_wgs84().invert().unwrap())).unwrap();

    assert_eq!(left.describe(), right.describe());
    assert_eq!(left.describe(), three.describe());
    assert_eq!(left.steps().len(), 3);

    let point = Point3::new(0.08, 0.41, 120.0);
    let (a, b) = (run(&left, point), run(&right, point));
    assert_abs_diff_eq!(a.x, b.x, epsilon = 1e-6);
    assert_abs_diff_eq!(a.y, b.y, epsilon = 1e-6);
    assert_abs_diff_eq!(a.z, b.z, epsilon = 1e-6);
}

#[test]
fn test_nested_chains_are_flattened() {
    let nested = Transformation::concatenated(
        Transformation::concatenated(scale(2.0), to_geocentric()),
        dhdn_to_wgs84().invert().unwrap(),
    );
    let chain = concatenate(Some(nested), Some(Transformation::identity(wgs84_geocentric()))).unwrap();
    match &chain {
        Transformation::Concatenated(first, rest) => {
            assert_eq!(first.implementation_name(), "Matrix");
            assert!(matches!(rest.as_ref(), Transformation::Concatenated(..)));
        }
        other => panic!("expected a chain, got {}", other.implementation_name()),
    }
}

#[test]
fn test_invert_twice_restores_chain() {
    let chain = concatenate3(Some(scale(2.0)), Some(to_geocentric()), Some(dhdn_to_wgs84().invert().unwrap())).unwrap();
    let inverse = chain.invert().unwrap();
    let again = inverse.invert().unwrap();

    assert_eq!(again.describe(), chain.describe());
    assert_eq!(inverse.source().code(), chain.target().code());
    assert_eq!(inverse.target().code(), chain.source().code());
    assert!(chain.is_inverse_of(&inverse));
    assert_eq!(
        inverse.describe(),
        "Helmert epsg:1777 -> Geocentric epsg:7030 (inverse) -> Matrix 3x3"
    );

    let point = Point3::new(0.08, 0.41, 120.0);
    let there = run(&chain, point);
    let back = run(&inverse, there);
    assert_abs_diff_eq!(back.x, point.x, epsilon = 1e-12);
    assert_abs_diff_eq!(back.y, point.y, epsilon = 1e-12);
    assert_abs_diff_eq!(back.z, point.z, epsilon = 1e-5);
}

#[test]
fn test_contains_and_display() {
    let chain = concatenate(Some(to_geocentric()), Some(dhdn_to_wgs84().invert().unwrap())).unwrap();
    assert!(chain.contains(&wgs84()));
    assert!(chain.contains(&dhdn_geocentric()));
    assert!(!chain.contains(&utm32()));
    assert_eq!(
        chain.to_string(),
        "epsg:4326 => epsg:6314_geocentric: Geocentric epsg:7030 -> Helmert epsg:1777 (inverse)"
    );
}
