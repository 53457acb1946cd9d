//! Coordinate axes

use super::units::Unit;

/// Direction an axis points to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AxisOrientation {
    East,
    West,
    North,
    South,
    Up,
    Down,
    /// Geocentric X, towards the intersection of equator and prime meridian
    Front,
    Other,
}

impl AxisOrientation {
    pub fn from_name(name: &str) -> Option<AxisOrientation> {
        match name.trim().to_lowercase().as_str() {
            "east" => Some(AxisOrientation::East),
            "west" => Some(AxisOrientation::West),
            "north" => Some(AxisOrientation::North),
            "south" => Some(AxisOrientation::South),
            "up" => Some(AxisOrientation::Up),
            "down" => Some(AxisOrientation::Down),
            "front" => Some(AxisOrientation::Front),
            "other" => Some(AxisOrientation::Other),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AxisOrientation::East => "east",
            AxisOrientation::West => "west",
            AxisOrientation::North => "north",
            AxisOrientation::South => "south",
            AxisOrientation::Up => "up",
            AxisOrientation::Down => "down",
            AxisOrientation::Front => "front",
            AxisOrientation::Other => "other",
        }
    }

    /// Index of the standard ordinate this axis feeds and its sign
    ///
    /// East/west map to the first ordinate, north/south to the second and
    /// up/down to the third. Geocentric axes are handled separately.
    pub(crate) fn standard_slot(&self) -> Option<(usize, f64)> {
        match self {
            AxisOrientation::East => Some((0, 1.0)),
            AxisOrientation::West => Some((0, -1.0)),
            AxisOrientation::North => Some((1, 1.0)),
            AxisOrientation::South => Some((1, -1.0)),
            AxisOrientation::Up => Some((2, 1.0)),
            AxisOrientation::Down => Some((2, -1.0)),
            AxisOrientation::Front | AxisOrientation::Other => None,
        }
    }
}

/// A named axis with orientation and unit
#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    name: String,
    orientation: AxisOrientation,
    units: Unit,
}

impl Axis {
    pub fn new(name: &str, orientation: AxisOrientation, units: Unit) -> Self {
        Axis {
            name: name.to_string(),
            orientation,
            units,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn orientation(&self) -> AxisOrientation {
        self.orientation
    }

    pub fn units(&self) -> Unit {
        self.units
    }

    /// Longitude/latitude in degrees
    pub fn default_geographic() -> Vec<Axis> {
        vec![
            Axis::new("longitude", AxisOrientation::East, Unit::Degree),
            Axis::new("latitude", AxisOrientation::North, Unit::Degree),
        ]
    }

    /// Easting/northing in metres
    pub fn default_projected() -> Vec<Axis> {
        vec![
            Axis::new("x", AxisOrientation::East, Unit::Metre),
            Axis::new("y", AxisOrientation::North, Unit::Metre),
        ]
    }

    /// Cartesian X, Y, Z in metres
    pub fn default_geocentric() -> Vec<Axis> {
        vec![
            Axis::new("X", AxisOrientation::Front, Unit::Metre),
            Axis::new("Y", AxisOrientation::East, Unit::Metre),
            Axis::new("Z", AxisOrientation::North, Unit::Metre),
        ]
    }

    /// Gravity-related height in metres
    pub fn default_vertical() -> Axis {
        Axis::new("height", AxisOrientation::Up, Unit::Metre)
    }
}
