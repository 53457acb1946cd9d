//! The CRS store: loaded, linked and immutable definitions

use std::fs;
use std::path::Path;
use std::sync::Arc;
use log::{debug, info};

use crate::errors::{CrsError, CrsResult};
use crate::factory::TransformationFactory;
use crate::model::{
    CoordinateSystem, CrsCode, DatumShift, Ellipsoid, GeodeticDatum, HelmertParameters, PrimeMeridian,
};
use crate::projection::Projection;
use crate::transform::Transformation;
use super::config::RawDefinitions;
use super::linker::{link, LinkedComponents};

/// Definitions shipped with the crate
pub const DEFAULT_DEFINITIONS: &str = include_str!("../../crs_definitions.toml");

/// Immutable registry of coordinate systems and their components
///
/// Built once from a configuration source; afterwards every lookup is a
/// plain map read, so a store can be shared as `Arc<CrsStore>` without
/// locking.
#[derive(Debug)]
pub struct CrsStore {
    id: String,
    description: Option<String>,
    components: LinkedComponents,
}

impl CrsStore {
    /// Parse and link a TOML configuration
    ///
    /// Any malformed definition, duplicate code or unresolved reference
    /// fails the whole load.
    pub fn create(source: &str) -> CrsResult<Self> {
        let raw = RawDefinitions::from_str(source)?;
        debug!("Extracted {} raw definitions for provider {}", raw.len(), raw.provider_id);
        let id = raw.provider_id.clone();
        let description = raw.description.clone();
        let components = link(raw)?;
        info!("Loaded CRS store {} with {} coordinate systems", id, components.primary_codes.len());
        Ok(CrsStore { id, description, components })
    }

    /// Load a configuration file
    pub fn from_file<P: AsRef<Path>>(path: P) -> CrsResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::create(&content)
    }

    /// Load the definitions shipped with the crate
    pub fn from_default_definitions() -> CrsResult<Self> {
        Self::create(DEFAULT_DEFINITIONS)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Look up a system by any code notation; unknown codes give `None`
    ///
    /// A bare code without authority is also tried as an EPSG code.
    pub fn get_crs_by_code(&self, code: &str) -> Option<Arc<CoordinateSystem>> {
        let code = CrsCode::parse(code);
        self.get_crs(&code).or_else(|| {
            if code.codespace().is_empty() {
                self.get_crs(&CrsCode::new("epsg", code.code()))
            } else {
                None
            }
        })
    }

    pub fn get_crs(&self, code: &CrsCode) -> Option<Arc<CoordinateSystem>> {
        self.components.systems.get(code).cloned()
    }

    pub fn get_ellipsoid_for_id(&self, code: &str) -> Option<Arc<Ellipsoid>> {
        self.components.ellipsoids.get(&CrsCode::parse(code)).cloned()
    }

    pub fn get_geodetic_datum_for_id(&self, code: &str) -> Option<Arc<GeodeticDatum>> {
        self.components.datums.get(&CrsCode::parse(code)).cloned()
    }

    pub fn get_prime_meridian_for_id(&self, code: &str) -> Option<Arc<PrimeMeridian>> {
        self.components.prime_meridians.get(&CrsCode::parse(code)).cloned()
    }

    pub fn get_projection_for_id(&self, code: &str) -> Option<Arc<Projection>> {
        self.components.projections.get(&CrsCode::parse(code)).cloned()
    }

    pub fn get_helmert_for_id(&self, code: &str) -> Option<Arc<HelmertParameters>> {
        self.components.helmerts.get(&CrsCode::parse(code)).cloned()
    }

    /// Helmert parameters configured directly between two datums
    pub fn datum_shifts(&self) -> &[DatumShift] {
        &self.components.datum_shifts
    }

    /// Datum shift linking the geodetic bases of two systems
    ///
    /// Returns `None` if the datums cannot be related, directly or through
    /// WGS84, or if either system has no geodetic datum. Systems on the
    /// same reference frame get an identity.
    pub fn get_transformation(&self, source: &Arc<CoordinateSystem>, target: &Arc<CoordinateSystem>) -> Option<Transformation> {
        let source_base = geodetic_base(source)?;
        let target_base = geodetic_base(target)?;
        let factory = TransformationFactory::with_datum_shifts(self.datum_shifts().to_vec());
        match factory.datum_shift(&source_base, &target_base) {
            Ok(Some(shift)) => Some(shift),
            Ok(None) => Some(Transformation::Identity { source: source_base, target: target_base }),
            Err(e) => {
                debug!("No datum shift between {} and {}: {}", source.code(), target.code(), e);
                None
            }
        }
    }

    /// Primary codes of all systems, sorted
    pub fn available_codes(&self) -> Vec<CrsCode> {
        let mut codes = self.components.primary_codes.clone();
        codes.sort();
        codes
    }

    /// All systems grouped by kind, in definition order within each kind
    pub fn systems(&self) -> Vec<Arc<CoordinateSystem>> {
        self.components
            .primary_codes
            .iter()
            .filter_map(|code| self.get_crs(code))
            .collect()
    }

    /// Number of coordinate systems
    pub fn len(&self) -> usize {
        self.components.primary_codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.primary_codes.is_empty()
    }

    /// Resolve a code or fail with `UnknownCrs`
    pub fn require(&self, code: &str) -> CrsResult<Arc<CoordinateSystem>> {
        self.get_crs_by_code(code).ok_or_else(|| CrsError::UnknownCrs(code.to_string()))
    }
}

/// The geographic or geocentric system a system's positions refer to
fn geodetic_base(crs: &Arc<CoordinateSystem>) -> Option<Arc<CoordinateSystem>> {
    match crs.as_ref() {
        CoordinateSystem::Geographic(_) | CoordinateSystem::Geocentric(_) => Some(crs.clone()),
        CoordinateSystem::Projected(projected) => {
            Some(Arc::new(CoordinateSystem::Geographic(projected.base().clone())))
        }
        CoordinateSystem::Compound(compound) => geodetic_base(compound.horizontal()),
        CoordinateSystem::Vertical(_) => None,
    }
}
