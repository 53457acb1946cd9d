//! Affine transforms: axis order, axis direction, unit scale and prime meridian

use std::sync::Arc;
use nalgebra::{DMatrix, Point3};

use crate::errors::{CrsError, CrsResult};
use crate::model::{AxisOrientation, CoordinateSystem};

/// Tolerance for recognizing identity and inverse matrices
pub const MATRIX_EPSILON: f64 = 1e-12;

/// Homogeneous affine matrix between two systems
///
/// A matrix with `n + 1` columns consumes the first `n` ordinates of a
/// point and one with `m + 1` rows writes the first `m`; remaining
/// ordinates pass through unchanged.
#[derive(Debug, Clone)]
pub struct MatrixTransform {
    source: Arc<CoordinateSystem>,
    target: Arc<CoordinateSystem>,
    matrix: DMatrix<f64>,
}

impl MatrixTransform {
    pub fn new(source: Arc<CoordinateSystem>, target: Arc<CoordinateSystem>, matrix: DMatrix<f64>) -> CrsResult<Self> {
        let (rows, cols) = matrix.shape();
        if !(2..=4).contains(&rows) || !(2..=4).contains(&cols) {
            return Err(CrsError::GenericError(format!(
                "unsupported matrix size {}x{}", rows, cols
            )));
        }
        let last = matrix.row(rows - 1);
        let affine = (0..cols).all(|c| {
            let expected = if c == cols - 1 { 1.0 } else { 0.0 };
            (last[c] - expected).abs() < MATRIX_EPSILON
        });
        if !affine {
            return Err(CrsError::GenericError("matrix is not affine".to_string()));
        }
        Ok(MatrixTransform { source, target, matrix })
    }

    /// Normalization of a system's native coordinates into the standard form
    ///
    /// Geographic: Greenwich longitude, latitude (radians), height (metres).
    /// Projected: easting, northing (metres). Geocentric: X, Y, Z (metres).
    pub fn to_standard(crs: &Arc<CoordinateSystem>) -> CrsResult<Self> {
        let axes = crs.axes();
        let dim = match crs.as_ref() {
            CoordinateSystem::Geographic(_) | CoordinateSystem::Projected(_) => 2,
            _ => 3,
        };
        let mut matrix = DMatrix::<f64>::zeros(dim + 1, dim + 1);
        matrix[(dim, dim)] = 1.0;
        // a vertical system only carries the third ordinate
        let offset = dim - axes.len();
        for column in 0..offset {
            matrix[(column, column)] = 1.0;
        }
        for (index, axis) in axes.iter().enumerate() {
            let (slot, sign) = match crs.as_ref() {
                CoordinateSystem::Geocentric(_) => geocentric_slot(axis.orientation()),
                _ => axis.orientation().standard_slot(),
            }
            .filter(|(slot, _)| *slot < dim)
            .ok_or_else(|| CrsError::Configuration(format!(
                "axis {} of {} cannot be normalized", axis.name(), crs.code()
            )))?;
            matrix[(slot, index + offset)] = sign * axis.units().to_base_factor();
        }
        if (0..dim).any(|slot| (0..dim).all(|c| matrix[(slot, c)] == 0.0)) {
            return Err(CrsError::Configuration(format!(
                "axes of {} do not span the coordinate space", crs.code()
            )));
        }

        let prime_meridian = match crs.as_ref() {
            CoordinateSystem::Geographic(g) => Some(g.datum().prime_meridian().longitude_as_radian()),
            CoordinateSystem::Compound(c) => match c.horizontal().as_ref() {
                CoordinateSystem::Geographic(g) => Some(g.datum().prime_meridian().longitude_as_radian()),
                _ => None,
            },
            _ => None,
        };
        if let Some(offset) = prime_meridian {
            matrix[(0, dim)] += offset;
        }

        MatrixTransform::new(crs.clone(), crs.clone(), matrix)
    }

    /// Swap of the first two ordinates between two flipped systems
    pub fn axis_swap(source: Arc<CoordinateSystem>, target: Arc<CoordinateSystem>) -> CrsResult<Self> {
        let matrix = DMatrix::from_row_slice(3, 3, &[
            0.0, 1.0, 0.0,
            1.0, 0.0, 0.0,
            0.0, 0.0, 1.0,
        ]);
        MatrixTransform::new(source, target, matrix)
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

    pub fn matrix(&self) -> &DMatrix<f64> {
        &self.matrix
    }

    pub fn source_dimension(&self) -> usize {
        self.matrix.ncols() - 1
    }

    pub fn target_dimension(&self) -> usize {
        self.matrix.nrows() - 1
    }

    pub fn is_identity(&self) -> bool {
        self.matrix.is_square() && is_identity_matrix(&self.matrix)
    }

    /// Apply the matrix to every point in place
    pub fn transform(&self, points: &mut [Point3<f64>]) {
        let source_dim = self.source_dimension();
        let target_dim = self.target_dimension();
        for point in points.iter_mut() {
            let input = [point.x, point.y, point.z];
            let mut output = input;
            for (row, value) in output.iter_mut().enumerate().take(target_dim) {
                let mut sum = self.matrix[(row, source_dim)];
                for (col, coordinate) in input.iter().enumerate().take(source_dim) {
                    sum += self.matrix[(row, col)] * coordinate;
                }
                *value = sum;
            }
            point.x = output[0];
            point.y = output[1];
            point.z = output[2];
        }
    }

    pub fn invert(&self) -> CrsResult<Self> {
        if !self.matrix.is_square() {
            return Err(CrsError::GenericError(format!(
                "cannot invert a {}x{} matrix", self.matrix.nrows(), self.matrix.ncols()
            )));
        }
        let inverse = self.matrix.clone().try_inverse().ok_or_else(|| {
            CrsError::path(self.source.code(), self.target.code(), "matrix is singular")
        })?;
        Ok(MatrixTransform {
            source: self.target.clone(),
            target: self.source.clone(),
            matrix: inverse,
        })
    }

    /// Compose with a following matrix into one: `next · self`
    ///
    /// Returns `None` if the dimensions do not line up.
    pub fn then(&self, next: &MatrixTransform) -> Option<MatrixTransform> {
        if next.source_dimension() != self.target_dimension() {
            return None;
        }
        Some(MatrixTransform {
            source: self.source.clone(),
            target: next.target.clone(),
            matrix: &next.matrix * &self.matrix,
        })
    }

    /// True if applying `other` after `self` gives the identity
    pub fn is_inverse_of(&self, other: &MatrixTransform) -> bool {
        self.matrix.is_square()
            && other.matrix.shape() == self.matrix.shape()
            && is_identity_matrix(&(&other.matrix * &self.matrix))
    }
}

fn geocentric_slot(orientation: AxisOrientation) -> Option<(usize, f64)> {
    match orientation {
        AxisOrientation::Front => Some((0, 1.0)),
        AxisOrientation::East => Some((1, 1.0)),
        AxisOrientation::West => Some((1, -1.0)),
        AxisOrientation::North => Some((2, 1.0)),
        AxisOrientation::South => Some((2, -1.0)),
        _ => None,
    }
}

fn is_identity_matrix(matrix: &DMatrix<f64>) -> bool {
    let (rows, cols) = matrix.shape();
    rows == cols
        && (0..rows).all(|r| {
            (0..cols).all(|c| {
                let expected = if r == c { 1.0 } else { 0.0 };
                (matrix[(r, c)] - expected).abs() < MATRIX_EPSILON
            })
        })
}
