//! Point structure for representing coordinates

use std::fmt;
use nalgebra::Point3;

use crate::errors::{CrsError, CrsResult};

/// A point in the native units and axis order of some coordinate system
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    /// First ordinate (longitude or easting in most systems)
    pub x: f64,
    /// Second ordinate
    pub y: f64,
    /// Third ordinate (height or geocentric Z, optional)
    pub z: Option<f64>,
}

impl Point {
    /// Create a new 2D point
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y, z: None }
    }

    /// Create a new 3D point
    pub fn new_3d(x: f64, y: f64, z: f64) -> Self {
        Point { x, y, z: Some(z) }
    }

    /// Check if this point has a Z coordinate
    pub fn has_z(&self) -> bool {
        self.z.is_some()
    }

    /// Get the Z coordinate, or 0.0 if not present
    pub fn z_value(&self) -> f64 {
        self.z.unwrap_or(0.0)
    }

    /// Number of ordinates the point carries
    pub fn dimension(&self) -> usize {
        if self.has_z() { 3 } else { 2 }
    }

    /// Parse "x,y" or "x,y,z"
    pub fn from_string(text: &str) -> CrsResult<Self> {
        let values = text
            .split(',')
            .map(|part| {
                part.trim().parse::<f64>().map_err(|_| {
                    CrsError::GenericError(format!("Invalid ordinate '{}' in point '{}'", part.trim(), text))
                })
            })
            .collect::<CrsResult<Vec<f64>>>()?;
        match values.as_slice() {
            [x, y] => Ok(Point::new(*x, *y)),
            [x, y, z] => Ok(Point::new_3d(*x, *y, *z)),
            _ => Err(CrsError::GenericError(format!(
                "Point must have 2 or 3 comma-separated values, got '{}'", text
            ))),
        }
    }

    /// Promote to three ordinates, filling a missing height
    pub(crate) fn to_point3(&self, default_z: f64) -> Point3<f64> {
        Point3::new(self.x, self.y, self.z.unwrap_or(default_z))
    }

    /// Take the ordinates of `point`, keeping the dimensionality of `self`
    pub(crate) fn with_ordinates(&self, point: &Point3<f64>) -> Point {
        Point {
            x: point.x,
            y: point.y,
            z: self.z.map(|_| point.z),
        }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.z {
            Some(z) => write!(f, "{}, {}, {}", self.x, self.y, z),
            None => write!(f, "{}, {}", self.x, self.y),
        }
    }
}
