use crate::coordinate::{BoundingBox, Point};
use crate::model::CrsCode;

#[test]
fn test_point_from_string() {
    assert_eq!(Point::from_string("3532465.57, 5301523.49").unwrap(), Point::new(3532465.57, 5301523.49));
    let point = Point::from_string("9.43,47.85,817").unwrap();
    assert!(point.has_z());
    assert_eq!(point.dimension(), 3);
    assert_eq!(point.z_value(), 817.0);

    assert!(Point::from_string("1").is_err());
    assert!(Point::from_string("1,2,3,4").is_err());
    assert!(Point::from_string("1,north").is_err());
}

#[test]
fn test_point_display() {
    assert_eq!(Point::new(1.5, -2.0).to_string(), "1.5, -2");
    assert_eq!(Point::new_3d(1.0, 2.0, 3.25).to_string(), "1, 2, 3.25");
    assert_eq!(Point::new(1.0, 2.0).z_value(), 0.0);
}

#[test]
fn test_bbox_from_string() {
    let bbox = BoundingBox::from_string("5, 47, 15, 55").unwrap();
    assert_eq!(bbox, BoundingBox::new(5.0, 47.0, 15.0, 55.0));
    assert_eq!(bbox.width(), 10.0);
    assert_eq!(bbox.height(), 8.0);
    assert_eq!(bbox.center(), Point::new(10.0, 51.0));

    assert!(BoundingBox::from_string("5,47,15").is_err());
    assert!(BoundingBox::from_string("5,47,x,55").is_err());
    assert!(BoundingBox::from_string("15,47,5,55").is_err());
}

#[test]
fn test_bbox_from_points() {
    assert!(BoundingBox::from_points(&[]).is_none());
    let bbox = BoundingBox::from_points(&[Point::new(3.0, -1.0), Point::new(-2.0, 4.0), Point::new(0.0, 0.0)]).unwrap();
    assert_eq!(bbox, BoundingBox::new(-2.0, -1.0, 3.0, 4.0));
    assert!(bbox.contains(&Point::new(0.0, 0.0)));
    assert!(bbox.contains(&Point::new(3.0, 4.0)));
    assert!(!bbox.contains(&Point::new(3.1, 0.0)));
}

#[test]
fn test_boundary_points() {
    let bbox = BoundingBox::new(0.0, 0.0, 4.0, 2.0);
    let outline = bbox.boundary_points(4);
    assert_eq!(outline.len(), 16);
    for corner in [Point::new(0.0, 0.0), Point::new(4.0, 0.0), Point::new(4.0, 2.0), Point::new(0.0, 2.0)] {
        assert!(outline.contains(&corner), "corner {} missing", corner);
    }
    assert!(outline.iter().all(|p| bbox.contains(p)));
    assert_eq!(BoundingBox::from_points(&outline).unwrap(), bbox);

    assert_eq!(bbox.boundary_points(0).len(), 4);
}

#[test]
fn test_bbox_display() {
    let bbox = BoundingBox::new_with_crs(1.0, 2.0, 3.0, 4.0, CrsCode::epsg(25832));
    assert_eq!(bbox.to_string(), "1,2,3,4 (epsg:25832)");
    assert_eq!(BoundingBox::new(1.0, 2.0, 3.0, 4.0).to_string(), "1,2,3,4");
}
