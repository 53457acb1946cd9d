//! Seven-parameter datum shift in geocentric space

use std::sync::Arc;
use nalgebra::{Matrix4, Point3, Vector4};

use crate::errors::{CrsError, CrsResult};
use crate::model::{CoordinateSystem, HelmertParameters};

/// Helmert shift between two datums, usually into WGS84, or back when inverted
///
/// The endpoints are geocentric systems on the two datums.
#[derive(Debug, Clone)]
pub struct HelmertTransform {
    source: Arc<CoordinateSystem>,
    target: Arc<CoordinateSystem>,
    parameters: Arc<HelmertParameters>,
    matrix: Matrix4<f64>,
    inverse: bool,
}

impl HelmertTransform {
    pub fn new(source: Arc<CoordinateSystem>, target: Arc<CoordinateSystem>, parameters: Arc<HelmertParameters>) -> Self {
        let matrix = parameters.to_affine();
        HelmertTransform { source, target, parameters, matrix, inverse: false }
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

    pub fn parameters(&self) -> &Arc<HelmertParameters> {
        &self.parameters
    }

    pub fn is_inverse(&self) -> bool {
        self.inverse
    }

    /// The affine matrix currently applied
    pub fn matrix(&self) -> &Matrix4<f64> {
        &self.matrix
    }

    pub fn is_identity(&self) -> bool {
        self.parameters.is_identity()
    }

    pub fn transform(&self, points: &mut [Point3<f64>]) {
        for point in points.iter_mut() {
            let shifted = self.matrix * Vector4::new(point.x, point.y, point.z, 1.0);
            point.x = shifted.x;
            point.y = shifted.y;
            point.z = shifted.z;
        }
    }

    pub fn invert(&self) -> CrsResult<Self> {
        let matrix = self.matrix.try_inverse().ok_or_else(|| {
            CrsError::path(self.source.code(), self.target.code(), "Helmert matrix is singular")
        })?;
        Ok(HelmertTransform {
            source: self.target.clone(),
            target: self.source.clone(),
            parameters: self.parameters.clone(),
            matrix,
            inverse: !self.inverse,
        })
    }

    pub fn is_inverse_of(&self, other: &HelmertTransform) -> bool {
        self.inverse != other.inverse && self.parameters.same_values(&other.parameters)
    }
}
