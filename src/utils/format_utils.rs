//! Formatting of coordinates for display

use crate::coordinate::Point;
use crate::model::{CoordinateSystem, Unit};

/// Decimal places that resolve about a millimetre in `unit`
pub fn precision_for(unit: Unit) -> usize {
    match unit {
        Unit::Radian => 11,
        Unit::Degree | Unit::Grad => 9,
        Unit::ArcSecond => 5,
        Unit::Kilometre => 6,
        Unit::Metre | Unit::Foot | Unit::UsSurveyFoot => 3,
    }
}

/// Format a point using the units of the system it belongs to
pub fn format_point(point: &Point, crs: &CoordinateSystem) -> String {
    let axes = crs.axes();
    let digits = |index: usize| axes.get(index).map(|a| precision_for(a.units())).unwrap_or(3);
    match point.z {
        Some(z) => format!(
            "{:.*} {:.*} {:.*}",
            digits(0), point.x, digits(1), point.y, digits(2), z
        ),
        None => format!("{:.*} {:.*}", digits(0), point.x, digits(1), point.y),
    }
}

/// Axis summary such as "longitude (east, degree), latitude (north, degree)"
pub fn format_axes(crs: &CoordinateSystem) -> String {
    crs.axes()
        .iter()
        .map(|axis| format!("{} ({}, {})", axis.name(), axis.orientation().name(), axis.units()))
        .collect::<Vec<_>>()
        .join(", ")
}
