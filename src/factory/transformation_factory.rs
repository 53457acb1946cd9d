//! Building transformation chains between two coordinate systems

use std::sync::Arc;
use dashmap::DashMap;
use log::debug;

use crate::errors::{CrsError, CrsResult};
use crate::model::wgs84::WGS84_DATUM;
use crate::model::{CoordinateSystem, CrsCode, CrsType, DatumShift, GeocentricCrs, GeodeticDatum};
use crate::transform::{
    concatenate, concatenate3, same_system, GeocentricTransform, HelmertTransform, MatrixTransform,
    ProjectionTransform, Transformation,
};

/// Finds or builds the transformation between two systems
///
/// Built chains are cached per ordered code pair. `None` in the cache means
/// the pair needs no transformation at all.
pub struct TransformationFactory {
    cache: DashMap<(CrsCode, CrsCode), Option<Arc<Transformation>>>,
    datum_shifts: Vec<DatumShift>,
}

impl TransformationFactory {
    /// A factory relating datums through WGS84 only
    pub fn new() -> Self {
        Self::with_datum_shifts(Vec::new())
    }

    /// A factory preferring the given direct datum shifts over the WGS84 detour
    pub fn with_datum_shifts(datum_shifts: Vec<DatumShift>) -> Self {
        TransformationFactory { cache: DashMap::new(), datum_shifts }
    }

    /// Cached or freshly built chain from `source` to `target`
    ///
    /// Concurrent callers may build the same chain twice; the first one
    /// published wins and everyone gets that value.
    pub fn create(&self, source: &Arc<CoordinateSystem>, target: &Arc<CoordinateSystem>) -> CrsResult<Option<Arc<Transformation>>> {
        let key = (source.code().clone(), target.code().clone());
        if let Some(cached) = self.cache.get(&key) {
            debug!("Using cached transformation {} => {}", key.0, key.1);
            return Ok(cached.value().clone());
        }

        let built = self.build(source, target)?.map(Arc::new);
        match &built {
            Some(chain) => debug!("Built transformation {}", chain),
            None => debug!("No transformation needed from {} to {}", key.0, key.1),
        }
        let entry = self.cache.entry(key).or_insert(built);
        Ok(entry.value().clone())
    }

    /// Like [`create`](Self::create), but a transformation in `preferred`
    /// leading from `source` to `target` (or back) is used as given
    ///
    /// Chains built this way bypass the cache, so a caller's choice never
    /// leaks into later calls.
    pub fn create_with(
        &self,
        source: &Arc<CoordinateSystem>,
        target: &Arc<CoordinateSystem>,
        preferred: &[Transformation],
    ) -> CrsResult<Option<Arc<Transformation>>> {
        for candidate in preferred {
            if same_system(candidate.source(), source) && same_system(candidate.target(), target) {
                debug!("Using supplied transformation {}", candidate);
                return Ok(Some(Arc::new(candidate.clone())));
            }
            if same_system(candidate.source(), target) && same_system(candidate.target(), source) {
                debug!("Using inverse of supplied transformation {}", candidate);
                return Ok(Some(Arc::new(candidate.invert()?)));
            }
        }
        self.create(source, target)
    }

    /// Number of cached pairs
    pub fn cached_pairs(&self) -> usize {
        self.cache.len()
    }

    pub fn clear(&self) {
        self.cache.clear();
    }

    /// Build the chain without consulting the cache
    ///
    /// The chain starts at `source` and ends at `target`, even where the
    /// steps touching them were simplified away.
    pub fn build(&self, source: &Arc<CoordinateSystem>, target: &Arc<CoordinateSystem>) -> CrsResult<Option<Transformation>> {
        if source.code() == target.code() || source.same_definition(target) {
            return Ok(None);
        }
        if source.equal_with_flipped_axis(target) {
            debug!("{} and {} differ only in axis order", source.code(), target.code());
            let swap = MatrixTransform::axis_swap(source.clone(), target.clone())?;
            return Ok(Some(Transformation::Matrix(swap)));
        }

        let chain = match (source.crs_type(), target.crs_type()) {
            (CrsType::Vertical, CrsType::Vertical) => Self::vertical(source, target)?,
            (CrsType::Vertical, _) | (_, CrsType::Vertical) => {
                return Err(CrsError::path(
                    source.code(), target.code(), "vertical systems only relate to vertical systems",
                ));
            }
            _ => self.horizontal(source, target)?,
        };
        Ok(chain.map(|chain| chain.between(source.clone(), target.clone())))
    }

    /// Datum shift between two geographic or geocentric systems
    ///
    /// `Ok(None)` if both share a reference frame and representation.
    /// A configured direct shift between the two datums wins over the
    /// detour through WGS84.
    pub fn datum_shift(&self, source: &Arc<CoordinateSystem>, target: &Arc<CoordinateSystem>) -> CrsResult<Option<Transformation>> {
        let (source_datum, target_datum) = match (source.datum(), target.datum()) {
            (Some(s), Some(t)) => (s.clone(), t.clone()),
            _ => {
                return Err(CrsError::path(source.code(), target.code(), "missing geodetic datum"));
            }
        };
        let source_geocentric = source.crs_type() == CrsType::Geocentric;
        let target_geocentric = target.crs_type() == CrsType::Geocentric;

        if source_datum.same_reference_frame(&target_datum) {
            return Ok(match (source_geocentric, target_geocentric) {
                (false, true) => Some(Transformation::Geocentric(GeocentricTransform::new(
                    source.clone(), target.clone(), source_datum.ellipsoid().clone(),
                ))),
                (true, false) => Some(Transformation::Geocentric(GeocentricTransform::new(
                    target.clone(), source.clone(), target_datum.ellipsoid().clone(),
                ).invert())),
                _ => None,
            });
        }

        let source_pivot = if source_geocentric { source.clone() } else { geocentric_pivot(&source_datum) };
        let target_pivot = if target_geocentric { target.clone() } else { geocentric_pivot(&target_datum) };

        let to_geocentric = if source_geocentric {
            None
        } else {
            Some(Transformation::Geocentric(GeocentricTransform::new(
                source.clone(), source_pivot.clone(), source_datum.ellipsoid().clone(),
            )))
        };
        let from_geocentric = if target_geocentric {
            None
        } else {
            Some(Transformation::Geocentric(GeocentricTransform::new(
                target.clone(), target_pivot.clone(), target_datum.ellipsoid().clone(),
            ).invert()))
        };

        let shift = match self.direct_shift(&source_datum, &target_datum, &source_pivot, &target_pivot)? {
            Some(direct) => Some(direct),
            None => Self::shift_through_wgs84(source, target, &source_datum, &target_datum, source_pivot, target_pivot)?,
        };
        Ok(concatenate3(to_geocentric, shift, from_geocentric))
    }

    /// Configured Helmert step between two geocentric pivots, if any
    fn direct_shift(
        &self,
        source_datum: &GeodeticDatum,
        target_datum: &GeodeticDatum,
        source_pivot: &Arc<CoordinateSystem>,
        target_pivot: &Arc<CoordinateSystem>,
    ) -> CrsResult<Option<Transformation>> {
        for shift in &self.datum_shifts {
            if shift.connects(source_datum, target_datum) {
                debug!("Using direct datum shift {}", shift.parameters().id().code());
                return Ok(Some(Transformation::Helmert(HelmertTransform::new(
                    source_pivot.clone(), target_pivot.clone(), shift.parameters().clone(),
                ))));
            }
            if shift.connects(target_datum, source_datum) {
                debug!("Using inverse of direct datum shift {}", shift.parameters().id().code());
                return Ok(Some(Transformation::Helmert(HelmertTransform::new(
                    target_pivot.clone(), source_pivot.clone(), shift.parameters().clone(),
                ).invert()?)));
            }
        }
        Ok(None)
    }

    /// Helmert into WGS84 followed by the inverse Helmert out of it
    fn shift_through_wgs84(
        source: &Arc<CoordinateSystem>,
        target: &Arc<CoordinateSystem>,
        source_datum: &Arc<GeodeticDatum>,
        target_datum: &Arc<GeodeticDatum>,
        source_pivot: Arc<CoordinateSystem>,
        target_pivot: Arc<CoordinateSystem>,
    ) -> CrsResult<Option<Transformation>> {
        for datum in [source_datum, target_datum] {
            if !datum.has_wgs84_relation() {
                return Err(CrsError::path(
                    source.code(),
                    target.code(),
                    format!("datum {} has no shift parameters to WGS84", datum.id().code()),
                ));
            }
        }

        // a WGS84 endpoint is its own pivot
        let wgs84_pivot = if target_datum.is_wgs84() {
            target_pivot.clone()
        } else if source_datum.is_wgs84() {
            source_pivot.clone()
        } else {
            geocentric_pivot(&WGS84_DATUM)
        };

        let source_shift = source_datum.to_wgs84().map(|helmert| {
            Transformation::Helmert(HelmertTransform::new(source_pivot, wgs84_pivot.clone(), helmert.clone()))
        });
        let target_shift = match target_datum.to_wgs84() {
            Some(helmert) => Some(Transformation::Helmert(
                HelmertTransform::new(target_pivot, wgs84_pivot, helmert.clone()).invert()?,
            )),
            None => None,
        };
        Ok(concatenate(source_shift, target_shift))
    }

    fn horizontal(&self, source: &Arc<CoordinateSystem>, target: &Arc<CoordinateSystem>) -> CrsResult<Option<Transformation>> {
        let source_horizontal = horizontal_part(source);
        let target_horizontal = horizontal_part(target);

        let mut chain = Some(Transformation::Matrix(MatrixTransform::to_standard(source)?));

        let source_base = match source_horizontal.as_ref() {
            CoordinateSystem::Projected(projected) => {
                let base = Arc::new(CoordinateSystem::Geographic(projected.base().clone()));
                let unproject = ProjectionTransform::new(base.clone(), source_horizontal.clone())?.invert();
                chain = concatenate(chain, Some(Transformation::Projection(unproject)));
                base
            }
            _ => source_horizontal.clone(),
        };
        let target_base = match target_horizontal.as_ref() {
            CoordinateSystem::Projected(projected) => Arc::new(CoordinateSystem::Geographic(projected.base().clone())),
            _ => target_horizontal.clone(),
        };

        chain = concatenate(chain, self.datum_shift(&source_base, &target_base)?);

        if let CoordinateSystem::Projected(_) = target_horizontal.as_ref() {
            let project = ProjectionTransform::new(target_base, target_horizontal.clone())?;
            chain = concatenate(chain, Some(Transformation::Projection(project)));
        }

        let from_standard = MatrixTransform::to_standard(target)?.invert()?;
        Ok(concatenate(chain, Some(Transformation::Matrix(from_standard))))
    }

    fn vertical(source: &Arc<CoordinateSystem>, target: &Arc<CoordinateSystem>) -> CrsResult<Option<Transformation>> {
        if let (CoordinateSystem::Vertical(s), CoordinateSystem::Vertical(t)) = (source.as_ref(), target.as_ref()) {
            if !s.datum_name().eq_ignore_ascii_case(t.datum_name()) {
                return Err(CrsError::path(
                    source.code(),
                    target.code(),
                    format!("no relation between vertical datums {} and {}", s.datum_name(), t.datum_name()),
                ));
            }
        }
        let to_standard = MatrixTransform::to_standard(source)?;
        let from_standard = MatrixTransform::to_standard(target)?.invert()?;
        Ok(concatenate(
            Some(Transformation::Matrix(to_standard)),
            Some(Transformation::Matrix(from_standard)),
        ))
    }
}

impl Default for TransformationFactory {
    fn default() -> Self {
        TransformationFactory::new()
    }
}

fn horizontal_part(crs: &Arc<CoordinateSystem>) -> Arc<CoordinateSystem> {
    match crs.as_ref() {
        CoordinateSystem::Compound(compound) => compound.horizontal().clone(),
        _ => crs.clone(),
    }
}

fn geocentric_pivot(datum: &Arc<GeodeticDatum>) -> Arc<CoordinateSystem> {
    Arc::new(CoordinateSystem::Geocentric(GeocentricCrs::for_datum(datum.clone())))
}
