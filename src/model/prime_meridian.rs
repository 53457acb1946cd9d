//! Prime meridians

use super::code::Identifiable;
use super::units::Unit;

/// Longitude offset of a prime meridian from Greenwich
#[derive(Debug, Clone, PartialEq)]
pub struct PrimeMeridian {
    id: Identifiable,
    longitude: f64,
    units: Unit,
}

impl PrimeMeridian {
    pub fn new(id: Identifiable, longitude: f64, units: Unit) -> Self {
        PrimeMeridian { id, longitude, units }
    }

    pub fn id(&self) -> &Identifiable {
        &self.id
    }

    /// Offset in the meridian's own unit
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn longitude_as_radian(&self) -> f64 {
        self.units.to_base(self.longitude)
    }

    pub fn units(&self) -> Unit {
        self.units
    }

    pub fn is_greenwich(&self) -> bool {
        self.longitude == 0.0
    }
}
