//! Coordinate handling on top of a CRS store
//!
//! Points and envelopes in native system units, and the transformer
//! that moves them between systems.

mod bbox;
mod point;
mod transform;

#[cfg(test)]
mod tests;

// Re-export key types
pub use self::bbox::BoundingBox;
pub use self::point::Point;
pub use self::transform::{CoordinateTransformer, ENVELOPE_EDGE_POINTS};
