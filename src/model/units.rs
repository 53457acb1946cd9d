//! Linear and angular units

use std::f64::consts::PI;
use std::fmt;

/// Units used by axes, ellipsoids and projection parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    Metre,
    Kilometre,
    Foot,
    UsSurveyFoot,
    Radian,
    Degree,
    Grad,
    ArcSecond,
}

impl Unit {
    /// Factor converting a value in this unit to metres or radians
    pub fn to_base_factor(&self) -> f64 {
        match self {
            Unit::Metre => 1.0,
            Unit::Kilometre => 1000.0,
            Unit::Foot => 0.3048,
            Unit::UsSurveyFoot => 1200.0 / 3937.0,
            Unit::Radian => 1.0,
            Unit::Degree => PI / 180.0,
            Unit::Grad => PI / 200.0,
            Unit::ArcSecond => PI / 648_000.0,
        }
    }

    pub fn is_angular(&self) -> bool {
        matches!(self, Unit::Radian | Unit::Degree | Unit::Grad | Unit::ArcSecond)
    }

    pub fn is_linear(&self) -> bool {
        !self.is_angular()
    }

    /// Convert a value in this unit to the base unit
    pub fn to_base(&self, value: f64) -> f64 {
        value * self.to_base_factor()
    }

    /// Convert a value in the base unit to this unit
    pub fn from_base(&self, value: f64) -> f64 {
        value / self.to_base_factor()
    }

    /// Look up a unit by one of its usual names
    pub fn from_name(name: &str) -> Option<Unit> {
        match name.trim().to_lowercase().as_str() {
            "metre" | "meter" | "m" => Some(Unit::Metre),
            "kilometre" | "kilometer" | "km" => Some(Unit::Kilometre),
            "foot" | "ft" => Some(Unit::Foot),
            "us survey foot" | "us-ft" | "us_survey_foot" | "ftus" => Some(Unit::UsSurveyFoot),
            "radian" | "rad" => Some(Unit::Radian),
            "degree" | "deg" | "°" => Some(Unit::Degree),
            "grad" | "gon" | "grade" => Some(Unit::Grad),
            "arc-second" | "arcsecond" | "arcsec" | "\"" => Some(Unit::ArcSecond),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Unit::Metre => "metre",
            Unit::Kilometre => "kilometre",
            Unit::Foot => "foot",
            Unit::UsSurveyFoot => "us survey foot",
            Unit::Radian => "radian",
            Unit::Degree => "degree",
            Unit::Grad => "grad",
            Unit::ArcSecond => "arc-second",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
