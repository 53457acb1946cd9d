//! Coordinate reference systems
//!
//! The set of system kinds is closed, so they are modelled as one sum type
//! with a struct per variant. Every variant carries its own identification.

use std::fmt;
use std::sync::Arc;

use crate::errors::{CrsError, CrsResult};
use crate::projection::{Projection, Projector};
use super::axis::{Axis, AxisOrientation};
use super::code::{CrsCode, Identifiable};
use super::datum::GeodeticDatum;
use super::units::Unit;

/// Kind of a coordinate reference system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrsType {
    Geographic,
    Geocentric,
    Projected,
    Vertical,
    Compound,
}

impl fmt::Display for CrsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CrsType::Geographic => "Geographic",
            CrsType::Geocentric => "Geocentric",
            CrsType::Projected => "Projected",
            CrsType::Vertical => "Vertical",
            CrsType::Compound => "Compound",
        };
        f.write_str(name)
    }
}

/// Two-dimensional ellipsoidal system
#[derive(Debug, Clone, PartialEq)]
pub struct GeographicCrs {
    id: Identifiable,
    datum: Arc<GeodeticDatum>,
    axes: Vec<Axis>,
}

impl GeographicCrs {
    pub fn new(id: Identifiable, datum: Arc<GeodeticDatum>, axes: Vec<Axis>) -> CrsResult<Self> {
        check_axes(&id, &axes, 2, true)?;
        Ok(GeographicCrs { id, datum, axes })
    }

    /// Construct from axes known to be valid
    pub(crate) fn from_parts(id: Identifiable, datum: Arc<GeodeticDatum>, axes: Vec<Axis>) -> Self {
        GeographicCrs { id, datum, axes }
    }

    pub fn id(&self) -> &Identifiable {
        &self.id
    }

    pub fn datum(&self) -> &Arc<GeodeticDatum> {
        &self.datum
    }

    pub fn axes(&self) -> &[Axis] {
        &self.axes
    }
}

/// Earth-centred cartesian system
#[derive(Debug, Clone, PartialEq)]
pub struct GeocentricCrs {
    id: Identifiable,
    datum: Arc<GeodeticDatum>,
    axes: Vec<Axis>,
}

impl GeocentricCrs {
    pub fn new(id: Identifiable, datum: Arc<GeodeticDatum>, axes: Vec<Axis>) -> CrsResult<Self> {
        check_axes(&id, &axes, 3, false)?;
        Ok(GeocentricCrs { id, datum, axes })
    }

    /// The implicit geocentric system of a datum, used as a pivot
    pub fn for_datum(datum: Arc<GeodeticDatum>) -> Self {
        let id = Identifiable::new(
            datum.id().code().with_suffix("geocentric"),
            &format!("{} (geocentric)", datum.id().name()),
        );
        GeocentricCrs { id, datum, axes: Axis::default_geocentric() }
    }

    pub fn id(&self) -> &Identifiable {
        &self.id
    }

    pub fn datum(&self) -> &Arc<GeodeticDatum> {
        &self.datum
    }

    pub fn axes(&self) -> &[Axis] {
        &self.axes
    }
}

/// Map projection applied on top of a geographic system
#[derive(Debug, Clone)]
pub struct ProjectedCrs {
    id: Identifiable,
    base: GeographicCrs,
    projection: Arc<Projection>,
    projector: Arc<Projector>,
    axes: Vec<Axis>,
}

impl ProjectedCrs {
    /// Create the system and prepare its projection for the base ellipsoid
    pub fn new(id: Identifiable, base: GeographicCrs, projection: Arc<Projection>, axes: Vec<Axis>) -> CrsResult<Self> {
        check_axes(&id, &axes, 2, false)?;
        let projector = Projector::new(&projection, base.datum())?;
        Ok(ProjectedCrs {
            id,
            base,
            projection,
            projector: Arc::new(projector),
            axes,
        })
    }

    pub fn id(&self) -> &Identifiable {
        &self.id
    }

    pub fn base(&self) -> &GeographicCrs {
        &self.base
    }

    pub fn projection(&self) -> &Arc<Projection> {
        &self.projection
    }

    pub fn projector(&self) -> &Arc<Projector> {
        &self.projector
    }

    pub fn axes(&self) -> &[Axis] {
        &self.axes
    }
}

impl PartialEq for ProjectedCrs {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.base == other.base
            && self.projection == other.projection
            && self.axes == other.axes
    }
}

/// Gravity-related heights
#[derive(Debug, Clone, PartialEq)]
pub struct VerticalCrs {
    id: Identifiable,
    datum_name: String,
    axis: Axis,
}

impl VerticalCrs {
    pub fn new(id: Identifiable, datum_name: &str, axis: Axis) -> CrsResult<Self> {
        if !axis.units().is_linear() {
            return Err(CrsError::Configuration(format!(
                "vertical system {} needs a linear axis unit, got {}", id.code(), axis.units()
            )));
        }
        Ok(VerticalCrs { id, datum_name: datum_name.to_string(), axis })
    }

    pub fn id(&self) -> &Identifiable {
        &self.id
    }

    pub fn datum_name(&self) -> &str {
        &self.datum_name
    }

    pub fn axis(&self) -> &Axis {
        &self.axis
    }
}

/// Horizontal system combined with a vertical one
#[derive(Debug, Clone, PartialEq)]
pub struct CompoundCrs {
    id: Identifiable,
    horizontal: Arc<CoordinateSystem>,
    vertical: Arc<VerticalCrs>,
    default_height: f64,
    axes: Vec<Axis>,
}

impl CompoundCrs {
    pub fn new(
        id: Identifiable,
        horizontal: Arc<CoordinateSystem>,
        vertical: Arc<VerticalCrs>,
        default_height: f64,
    ) -> CrsResult<Self> {
        match horizontal.crs_type() {
            CrsType::Geographic | CrsType::Projected => {}
            other => {
                return Err(CrsError::Configuration(format!(
                    "compound system {} needs a geographic or projected horizontal part, got {}",
                    id.code(), other
                )));
            }
        }
        let mut axes = horizontal.axes().to_vec();
        axes.push(vertical.axis().clone());
        Ok(CompoundCrs { id, horizontal, vertical, default_height, axes })
    }

    pub fn id(&self) -> &Identifiable {
        &self.id
    }

    pub fn horizontal(&self) -> &Arc<CoordinateSystem> {
        &self.horizontal
    }

    pub fn vertical(&self) -> &Arc<VerticalCrs> {
        &self.vertical
    }

    /// Height assumed for points given without one
    pub fn default_height(&self) -> f64 {
        self.default_height
    }

    pub fn axes(&self) -> &[Axis] {
        &self.axes
    }
}

/// A coordinate reference system of any kind
#[derive(Debug, Clone, PartialEq)]
pub enum CoordinateSystem {
    Geographic(GeographicCrs),
    Geocentric(GeocentricCrs),
    Projected(ProjectedCrs),
    Vertical(VerticalCrs),
    Compound(CompoundCrs),
}

impl CoordinateSystem {
    pub fn id(&self) -> &Identifiable {
        match self {
            CoordinateSystem::Geographic(crs) => crs.id(),
            CoordinateSystem::Geocentric(crs) => crs.id(),
            CoordinateSystem::Projected(crs) => crs.id(),
            CoordinateSystem::Vertical(crs) => crs.id(),
            CoordinateSystem::Compound(crs) => crs.id(),
        }
    }

    /// Primary code
    pub fn code(&self) -> &CrsCode {
        self.id().code()
    }

    pub fn name(&self) -> &str {
        self.id().name()
    }

    pub fn crs_type(&self) -> CrsType {
        match self {
            CoordinateSystem::Geographic(_) => CrsType::Geographic,
            CoordinateSystem::Geocentric(_) => CrsType::Geocentric,
            CoordinateSystem::Projected(_) => CrsType::Projected,
            CoordinateSystem::Vertical(_) => CrsType::Vertical,
            CoordinateSystem::Compound(_) => CrsType::Compound,
        }
    }

    pub fn axes(&self) -> &[Axis] {
        match self {
            CoordinateSystem::Geographic(crs) => crs.axes(),
            CoordinateSystem::Geocentric(crs) => crs.axes(),
            CoordinateSystem::Projected(crs) => crs.axes(),
            CoordinateSystem::Vertical(crs) => std::slice::from_ref(crs.axis()),
            CoordinateSystem::Compound(crs) => crs.axes(),
        }
    }

    /// Number of ordinates a point in this system carries
    pub fn dimension(&self) -> usize {
        self.axes().len()
    }

    /// The geodetic datum, if the system has one
    pub fn datum(&self) -> Option<&Arc<GeodeticDatum>> {
        match self {
            CoordinateSystem::Geographic(crs) => Some(crs.datum()),
            CoordinateSystem::Geocentric(crs) => Some(crs.datum()),
            CoordinateSystem::Projected(crs) => Some(crs.base().datum()),
            CoordinateSystem::Vertical(_) => None,
            CoordinateSystem::Compound(crs) => crs.horizontal().datum(),
        }
    }

    /// The geographic system a position in this system refers to
    pub fn geographic_base(&self) -> Option<&GeographicCrs> {
        match self {
            CoordinateSystem::Geographic(crs) => Some(crs),
            CoordinateSystem::Projected(crs) => Some(crs.base()),
            CoordinateSystem::Compound(crs) => crs.horizontal().geographic_base(),
            CoordinateSystem::Geocentric(_) | CoordinateSystem::Vertical(_) => None,
        }
    }

    /// Strip the vertical part of a compound system
    pub fn underlying(&self) -> &CoordinateSystem {
        match self {
            CoordinateSystem::Compound(crs) => crs.horizontal(),
            other => other,
        }
    }

    /// Same definition apart from identification
    pub fn same_definition(&self, other: &CoordinateSystem) -> bool {
        match (self, other) {
            (CoordinateSystem::Geographic(a), CoordinateSystem::Geographic(b)) => {
                a.datum().same_reference_frame(b.datum()) && a.axes() == b.axes()
            }
            (CoordinateSystem::Geocentric(a), CoordinateSystem::Geocentric(b)) => {
                a.datum().same_reference_frame(b.datum()) && a.axes() == b.axes()
            }
            (CoordinateSystem::Projected(a), CoordinateSystem::Projected(b)) => {
                a.base().datum().same_reference_frame(b.base().datum())
                    && a.base().axes() == b.base().axes()
                    && a.projection().same_parameters(b.projection())
                    && a.axes() == b.axes()
            }
            (CoordinateSystem::Vertical(a), CoordinateSystem::Vertical(b)) => {
                a.datum_name().eq_ignore_ascii_case(b.datum_name()) && a.axis() == b.axis()
            }
            (CoordinateSystem::Compound(a), CoordinateSystem::Compound(b)) => {
                a.horizontal().same_definition(b.horizontal())
                    && a.vertical().datum_name().eq_ignore_ascii_case(b.vertical().datum_name())
                    && a.vertical().axis() == b.vertical().axis()
            }
            _ => false,
        }
    }

    /// True if both systems are the same two-dimensional definition with
    /// the first two axes swapped
    pub fn equal_with_flipped_axis(&self, other: &CoordinateSystem) -> bool {
        let (a, b) = (self.axes(), other.axes());
        if self.crs_type() != other.crs_type() || a.len() != 2 || b.len() != 2 {
            return false;
        }
        if a[0] != b[1] || a[1] != b[0] || a == b {
            return false;
        }
        match (self, other) {
            (CoordinateSystem::Geographic(x), CoordinateSystem::Geographic(y)) => {
                x.datum().same_reference_frame(y.datum())
            }
            (CoordinateSystem::Projected(x), CoordinateSystem::Projected(y)) => {
                x.base().datum().same_reference_frame(y.base().datum())
                    && x.base().axes() == y.base().axes()
                    && x.projection().same_parameters(y.projection())
            }
            _ => false,
        }
    }

    /// Height unit of the vertical part, if any
    pub fn height_unit(&self) -> Option<Unit> {
        match self {
            CoordinateSystem::Vertical(crs) => Some(crs.axis().units()),
            CoordinateSystem::Compound(crs) => Some(crs.vertical().axis().units()),
            _ => None,
        }
    }
}

impl fmt::Display for CoordinateSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.id(), self.crs_type())
    }
}

fn check_axes(id: &Identifiable, axes: &[Axis], expected: usize, angular: bool) -> CrsResult<()> {
    if axes.len() != expected {
        return Err(CrsError::Configuration(format!(
            "{} needs {} axes, got {}", id.code(), expected, axes.len()
        )));
    }
    for axis in axes {
        if axis.units().is_angular() != angular {
            return Err(CrsError::Configuration(format!(
                "axis {} of {} has unsuitable unit {}", axis.name(), id.code(), axis.units()
            )));
        }
        if expected == 2 && axis.orientation().standard_slot().map_or(true, |(slot, _)| slot > 1) {
            return Err(CrsError::Configuration(format!(
                "axis {} of {} must point east, west, north or south", axis.name(), id.code()
            )));
        }
    }
    if expected == 2 {
        let first = axes[0].orientation().standard_slot().map(|(slot, _)| slot);
        let second = axes[1].orientation().standard_slot().map(|(slot, _)| slot);
        if first == second {
            return Err(CrsError::Configuration(format!(
                "axes of {} are parallel", id.code()
            )));
        }
    }
    if expected == 3 && !axes.iter().any(|a| a.orientation() == AxisOrientation::Front) {
        return Err(CrsError::Configuration(format!(
            "geocentric system {} needs an X (front) axis", id.code()
        )));
    }
    Ok(())
}
