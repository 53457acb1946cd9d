//! Bounding box structure for envelopes

use std::fmt;

use crate::errors::{CrsError, CrsResult};
use crate::model::CrsCode;
use super::point::Point;

/// An axis-aligned envelope in a coordinate system
#[derive(Debug, Clone, PartialEq)]
pub struct BoundingBox {
    /// Minimum X coordinate
    pub min_x: f64,
    /// Minimum Y coordinate
    pub min_y: f64,
    /// Maximum X coordinate
    pub max_x: f64,
    /// Maximum Y coordinate
    pub max_y: f64,
    /// Code of the coordinate system
    pub crs: Option<CrsCode>,
}

impl BoundingBox {
    /// Create a new bounding box
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        BoundingBox {
            min_x,
            min_y,
            max_x,
            max_y,
            crs: None,
        }
    }

    /// Create a new bounding box with coordinate system
    pub fn new_with_crs(min_x: f64, min_y: f64, max_x: f64, max_y: f64, crs: CrsCode) -> Self {
        BoundingBox {
            crs: Some(crs),
            ..BoundingBox::new(min_x, min_y, max_x, max_y)
        }
    }

    /// Parse a bounding box from a string (format: "minx,miny,maxx,maxy")
    pub fn from_string(bbox_str: &str) -> CrsResult<Self> {
        let parts: Vec<&str> = bbox_str.split(',').collect();
        if parts.len() != 4 {
            return Err(CrsError::GenericError(
                "Bounding box must have 4 comma-separated values".to_string(),
            ));
        }

        let mut values = [0.0; 4];
        for (value, (part, name)) in values.iter_mut().zip(parts.iter().zip(["min_x", "min_y", "max_x", "max_y"])) {
            *value = part.trim().parse::<f64>()
                .map_err(|_| CrsError::GenericError(format!("Invalid {} value", name)))?;
        }
        if values[0] > values[2] || values[1] > values[3] {
            return Err(CrsError::GenericError(format!(
                "Bounding box minimum exceeds maximum: {}", bbox_str
            )));
        }

        Ok(BoundingBox::new(values[0], values[1], values[2], values[3]))
    }

    /// Smallest box holding all points, `None` for an empty slice
    pub fn from_points(points: &[Point]) -> Option<Self> {
        let first = points.first()?;
        let mut bbox = BoundingBox::new(first.x, first.y, first.x, first.y);
        for point in &points[1..] {
            bbox.expand_to_include(point);
        }
        Some(bbox)
    }

    /// Get the width of the bounding box
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Get the height of the bounding box
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Get the center point of the bounding box
    pub fn center(&self) -> Point {
        Point::new(
            self.min_x + self.width() / 2.0,
            self.min_y + self.height() / 2.0,
        )
    }

    /// Check if this bounding box contains a point
    pub fn contains(&self, point: &Point) -> bool {
        point.x >= self.min_x && point.x <= self.max_x &&
            point.y >= self.min_y && point.y <= self.max_y
    }

    pub fn expand_to_include(&mut self, point: &Point) {
        self.min_x = self.min_x.min(point.x);
        self.min_y = self.min_y.min(point.y);
        self.max_x = self.max_x.max(point.x);
        self.max_y = self.max_y.max(point.y);
    }

    /// Points along the outline, corners included
    ///
    /// Every edge is sampled at `per_edge` evenly spaced points, so a
    /// curved image of the edge still bounds the transformed envelope.
    pub fn boundary_points(&self, per_edge: usize) -> Vec<Point> {
        let steps = per_edge.max(1);
        let mut points = Vec::with_capacity(4 * steps);
        for i in 0..steps {
            let t = i as f64 / steps as f64;
            let x = self.min_x + t * self.width();
            let y = self.min_y + t * self.height();
            let x_back = self.max_x - t * self.width();
            let y_back = self.max_y - t * self.height();
            points.push(Point::new(x, self.min_y));
            points.push(Point::new(self.max_x, y));
            points.push(Point::new(x_back, self.max_y));
            points.push(Point::new(self.min_x, y_back));
        }
        points
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.min_x, self.min_y, self.max_x, self.max_y)?;
        if let Some(crs) = &self.crs {
            write!(f, " ({})", crs)?;
        }
        Ok(())
    }
}
