//! Coordinate transformation functionality

use std::sync::Arc;
use log::debug;
use nalgebra::Point3;

use crate::errors::{CrsError, CrsResult};
use crate::factory::TransformationFactory;
use crate::model::CoordinateSystem;
use crate::store::CrsStore;
use crate::transform::Transformation;
use super::bbox::BoundingBox;
use super::point::Point;

/// Points sampled along every envelope edge
pub const ENVELOPE_EDGE_POINTS: usize = 10;

/// Transforms points between systems known to one store
///
/// Chains are built on first use and cached, so repeated calls for the
/// same pair only pay for applying the chain. Safe to share between
/// threads.
pub struct CoordinateTransformer {
    store: Arc<CrsStore>,
    factory: TransformationFactory,
}

impl CoordinateTransformer {
    pub fn new(store: Arc<CrsStore>) -> Self {
        let factory = TransformationFactory::with_datum_shifts(store.datum_shifts().to_vec());
        CoordinateTransformer { store, factory }
    }

    pub fn store(&self) -> &Arc<CrsStore> {
        &self.store
    }

    /// Resolve a code in the store or fail with `UnknownCrs`
    pub fn lookup(&self, code: &str) -> CrsResult<Arc<CoordinateSystem>> {
        self.store.require(code)
    }

    /// Transform points from `source` to `target`, given as codes
    ///
    /// # Arguments
    /// * `source` - Code of the system the points are in
    /// * `target` - Code of the wanted system
    /// * `points` - Points in the source system's axis order and units
    ///
    /// # Returns
    /// One point per input point, each with the dimensionality it came in
    pub fn transform(&self, source: &str, target: &str, points: &[Point]) -> CrsResult<Vec<Point>> {
        let source_crs = self.lookup(source)?;
        let target_crs = self.lookup(target)?;
        self.transform_crs(&source_crs, &target_crs, points)
    }

    /// Transform points between two resolved systems
    pub fn transform_crs(
        &self,
        source: &Arc<CoordinateSystem>,
        target: &Arc<CoordinateSystem>,
        points: &[Point],
    ) -> CrsResult<Vec<Point>> {
        if source.code() == target.code() || points.is_empty() {
            return Ok(points.to_vec());
        }
        match self.factory.create(source, target)? {
            Some(chain) => apply_chain(&chain, source, points),
            None => Ok(points.to_vec()),
        }
    }

    /// Transform a single point
    pub fn transform_point(&self, source: &str, target: &str, point: &Point) -> CrsResult<Point> {
        let mut result = self.transform(source, target, std::slice::from_ref(point))?;
        result.pop().ok_or_else(|| CrsError::GenericError("transformation returned no point".to_string()))
    }

    /// Transform points given as `[x, y]` pairs
    pub fn transform_points(&self, source: &str, target: &str, coordinates: &[[f64; 2]]) -> CrsResult<Vec<[f64; 2]>> {
        let points: Vec<Point> = coordinates.iter().map(|c| Point::new(c[0], c[1])).collect();
        let transformed = self.transform(source, target, &points)?;
        Ok(transformed.iter().map(|p| [p.x, p.y]).collect())
    }

    /// Envelope of the image of `envelope` in the target system
    ///
    /// The outline is densified before transforming, so the result also
    /// covers edges that curve in the target system.
    pub fn transform_envelope(&self, source: &str, target: &str, envelope: &BoundingBox) -> CrsResult<BoundingBox> {
        let source_crs = self.lookup(source)?;
        let target_crs = self.lookup(target)?;
        self.transform_envelope_crs(&source_crs, &target_crs, envelope)
    }

    /// Envelope transformation between two resolved systems
    pub fn transform_envelope_crs(
        &self,
        source: &Arc<CoordinateSystem>,
        target: &Arc<CoordinateSystem>,
        envelope: &BoundingBox,
    ) -> CrsResult<BoundingBox> {
        let outline = envelope.boundary_points(ENVELOPE_EDGE_POINTS);
        let transformed = self.transform_crs(source, target, &outline)?;
        let mut result = BoundingBox::from_points(&transformed)
            .ok_or_else(|| CrsError::GenericError("empty envelope outline".to_string()))?;
        result.crs = Some(target.code().clone());
        debug!("Transformed envelope {} to {}", envelope, result);
        Ok(result)
    }

    /// Chain used between two systems; `None` if nothing needs to happen
    pub fn transformation(&self, source: &str, target: &str) -> CrsResult<Option<Arc<Transformation>>> {
        let source_crs = self.lookup(source)?;
        let target_crs = self.lookup(target)?;
        self.transformation_between(&source_crs, &target_crs)
    }

    /// Chain between two resolved systems
    pub fn transformation_between(
        &self,
        source: &Arc<CoordinateSystem>,
        target: &Arc<CoordinateSystem>,
    ) -> CrsResult<Option<Arc<Transformation>>> {
        if source.code() == target.code() {
            return Ok(None);
        }
        self.factory.create(source, target)
    }

    /// Transform points, preferring the supplied transformations
    ///
    /// A transformation in `preferred` that leads from `source` to `target`
    /// (or back) replaces the chain the factory would build.
    pub fn transform_with(
        &self,
        source: &str,
        target: &str,
        points: &[Point],
        preferred: &[Transformation],
    ) -> CrsResult<Vec<Point>> {
        let source_crs = self.lookup(source)?;
        let target_crs = self.lookup(target)?;
        if source_crs.code() == target_crs.code() || points.is_empty() {
            return Ok(points.to_vec());
        }
        match self.factory.create_with(&source_crs, &target_crs, preferred)? {
            Some(chain) => apply_chain(&chain, &source_crs, points),
            None => Ok(points.to_vec()),
        }
    }

    /// Readable description of the chain between two systems
    pub fn transformation_path(&self, source: &str, target: &str) -> CrsResult<String> {
        Ok(match self.transformation(source, target)? {
            Some(chain) => chain.describe(),
            None => "Identity".to_string(),
        })
    }

    /// Number of chains built so far
    pub fn cached_transformations(&self) -> usize {
        self.factory.cached_pairs()
    }
}

/// Run `points` through `chain`, keeping each point's dimensionality
fn apply_chain(chain: &Transformation, source: &CoordinateSystem, points: &[Point]) -> CrsResult<Vec<Point>> {
    let default_z = match source {
        CoordinateSystem::Compound(compound) => compound.default_height(),
        _ => 0.0,
    };
    let mut buffer: Vec<Point3<f64>> = points.iter().map(|p| p.to_point3(default_z)).collect();
    chain.apply(&mut buffer)?;

    Ok(points
        .iter()
        .zip(buffer.iter())
        .map(|(original, transformed)| original.with_ordinates(transformed))
        .collect())
}
