//! Transformation wrapping a map projection

use std::sync::Arc;
use nalgebra::Point3;

use crate::errors::{CrsError, CrsResult};
use crate::model::{CoordinateSystem, ProjectedCrs};
use crate::projection::{Projection, Projector};

/// Forward (geographic to projected) or inverse projection step
#[derive(Debug, Clone)]
pub struct ProjectionTransform {
    source: Arc<CoordinateSystem>,
    target: Arc<CoordinateSystem>,
    projection: Arc<Projection>,
    projector: Arc<Projector>,
    inverse: bool,
}

impl ProjectionTransform {
    /// Forward step from the base geographic system into `projected`
    pub fn new(base: Arc<CoordinateSystem>, projected: Arc<CoordinateSystem>) -> CrsResult<Self> {
        let crs: &ProjectedCrs = match projected.as_ref() {
            CoordinateSystem::Projected(crs) => crs,
            other => {
                return Err(CrsError::GenericError(format!(
                    "{} is not a projected system", other.code()
                )));
            }
        };
        Ok(ProjectionTransform {
            projection: crs.projection().clone(),
            projector: crs.projector().clone(),
            source: base,
            target: projected,
            inverse: false,
        })
    }

    pub fn source(&self) -> &Arc<CoordinateSystem> {
        &self.source
    }

    pub fn target(&self) -> &Arc<CoordinateSystem> {
        &self.target
    }

    /// Same step, starting at another system
    pub(crate) fn with_source(mut self, source: Arc<CoordinateSystem>) -> Self {
        self.source = source;
        self
    }

    /// Same step, ending at another system
    pub(crate) fn with_target(mut self, target: Arc<CoordinateSystem>) -> Self {
        self.target = target;
        self
    }

    pub fn projection(&self) -> &Arc<Projection> {
        &self.projection
    }

    pub fn name(&self) -> &'static str {
        self.projector.name()
    }

    pub fn is_inverse(&self) -> bool {
        self.inverse
    }

    /// Same projection with forward and inverse roles swapped
    pub fn invert(&self) -> Self {
        ProjectionTransform {
            source: self.target.clone(),
            target: self.source.clone(),
            projection: self.projection.clone(),
            projector: self.projector.clone(),
            inverse: !self.inverse,
        }
    }

    pub fn is_inverse_of(&self, other: &ProjectionTransform) -> bool {
        self.inverse != other.inverse
            && (Arc::ptr_eq(&self.projector, &other.projector)
                || (self.projection.same_parameters(&other.projection)
                    && self.source.datum() == other.target.datum()))
    }

    pub fn transform(&self, points: &mut [Point3<f64>]) -> CrsResult<()> {
        for point in points.iter_mut() {
            let (x, y) = if self.inverse {
                self.projector.inverse(point.x, point.y)?
            } else {
                self.projector.forward(point.x, point.y)?
            };
            point.x = x;
            point.y = y;
        }
        Ok(())
    }
}
