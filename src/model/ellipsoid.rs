//! Reference ellipsoids

use super::code::Identifiable;
use super::units::Unit;

/// Mathematical approximation of the earth's shape
///
/// Derived values (semi-minor axis, eccentricity) are computed once at
/// construction. Axis lengths are kept in their native unit; the
/// `*_in_metres` accessors are what the projection and geocentric math use.
#[derive(Debug, Clone, PartialEq)]
pub struct Ellipsoid {
    id: Identifiable,
    semi_major_axis: f64,
    semi_minor_axis: f64,
    inverse_flattening: f64,
    eccentricity_squared: f64,
    eccentricity: f64,
    units: Unit,
}

impl Ellipsoid {
    /// Create an ellipsoid from its semi-major axis and inverse flattening
    ///
    /// An inverse flattening of zero (or infinity) describes a sphere.
    pub fn from_inverse_flattening(id: Identifiable, semi_major_axis: f64, inverse_flattening: f64, units: Unit) -> Self {
        if inverse_flattening == 0.0 || inverse_flattening.is_infinite() {
            return Ellipsoid::sphere(id, semi_major_axis, units);
        }
        let flattening = 1.0 / inverse_flattening;
        let eccentricity_squared = 2.0 * flattening - flattening * flattening;
        Ellipsoid {
            id,
            semi_major_axis,
            semi_minor_axis: semi_major_axis * (1.0 - flattening),
            inverse_flattening,
            eccentricity_squared,
            eccentricity: eccentricity_squared.sqrt(),
            units,
        }
    }

    /// Create an ellipsoid from both axis lengths
    pub fn from_semi_minor_axis(id: Identifiable, semi_major_axis: f64, semi_minor_axis: f64, units: Unit) -> Self {
        if semi_major_axis == semi_minor_axis {
            return Ellipsoid::sphere(id, semi_major_axis, units);
        }
        let flattening = (semi_major_axis - semi_minor_axis) / semi_major_axis;
        let eccentricity_squared = 2.0 * flattening - flattening * flattening;
        Ellipsoid {
            id,
            semi_major_axis,
            semi_minor_axis,
            inverse_flattening: 1.0 / flattening,
            eccentricity_squared,
            eccentricity: eccentricity_squared.sqrt(),
            units,
        }
    }

    /// Create a sphere
    pub fn sphere(id: Identifiable, radius: f64, units: Unit) -> Self {
        Ellipsoid {
            id,
            semi_major_axis: radius,
            semi_minor_axis: radius,
            inverse_flattening: f64::INFINITY,
            eccentricity_squared: 0.0,
            eccentricity: 0.0,
            units,
        }
    }

    pub fn id(&self) -> &Identifiable {
        &self.id
    }

    pub fn semi_major_axis(&self) -> f64 {
        self.semi_major_axis
    }

    pub fn semi_minor_axis(&self) -> f64 {
        self.semi_minor_axis
    }

    pub fn semi_major_axis_in_metres(&self) -> f64 {
        self.units.to_base(self.semi_major_axis)
    }

    pub fn semi_minor_axis_in_metres(&self) -> f64 {
        self.units.to_base(self.semi_minor_axis)
    }

    pub fn inverse_flattening(&self) -> f64 {
        self.inverse_flattening
    }

    pub fn flattening(&self) -> f64 {
        if self.inverse_flattening.is_infinite() {
            0.0
        } else {
            1.0 / self.inverse_flattening
        }
    }

    pub fn eccentricity_squared(&self) -> f64 {
        self.eccentricity_squared
    }

    pub fn eccentricity(&self) -> f64 {
        self.eccentricity
    }

    pub fn units(&self) -> Unit {
        self.units
    }

    pub fn is_sphere(&self) -> bool {
        self.eccentricity_squared == 0.0
    }

    /// Compare the shape only, ignoring identification
    pub fn same_shape(&self, other: &Ellipsoid) -> bool {
        (self.semi_major_axis_in_metres() - other.semi_major_axis_in_metres()).abs() < 1e-6
            && (self.eccentricity_squared - other.eccentricity_squared).abs() < 1e-14
    }
}
