//! Transformation algebra
//!
//! A [`Transformation`] is an immutable directed edge between two
//! coordinate systems. Chains are built with [`concatenate`], which keeps
//! them flat and collapses what can be collapsed. Inverting always yields
//! a new value.

mod matrix;
mod helmert;
mod geocentric;
mod projection;
mod concatenate;

#[cfg(test)]
mod tests;

use std::fmt;
use std::sync::Arc;
use nalgebra::Point3;

use crate::errors::CrsResult;
use crate::model::CoordinateSystem;

pub use self::matrix::{MatrixTransform, MATRIX_EPSILON};
pub use self::helmert::HelmertTransform;
pub use self::geocentric::GeocentricTransform;
pub use self::projection::ProjectionTransform;
pub use self::concatenate::{concatenate, concatenate3};

/// A transformation step or chain
#[derive(Debug, Clone)]
pub enum Transformation {
    Identity {
        source: Arc<CoordinateSystem>,
        target: Arc<CoordinateSystem>,
    },
    Matrix(MatrixTransform),
    Helmert(HelmertTransform),
    Geocentric(GeocentricTransform),
    Projection(ProjectionTransform),
    /// First step, then second step
    Concatenated(Box<Transformation>, Box<Transformation>),
}

impl Transformation {
    /// Identity on one system
    pub fn identity(crs: Arc<CoordinateSystem>) -> Self {
        Transformation::Identity { source: crs.clone(), target: crs }
    }

    /// Plain pairing of two steps, without simplification
    pub fn concatenated(first: Transformation, second: Transformation) -> Self {
        Transformation::Concatenated(Box::new(first), Box::new(second))
    }

    pub fn source(&self) -> &Arc<CoordinateSystem> {
        match self {
            Transformation::Identity { source, .. } => source,
            Transformation::Matrix(t) => t.source(),
            Transformation::Helmert(t) => t.source(),
            Transformation::Geocentric(t) => t.source(),
            Transformation::Projection(t) => t.source(),
            Transformation::Concatenated(first, _) => first.source(),
        }
    }

    pub fn target(&self) -> &Arc<CoordinateSystem> {
        match self {
            Transformation::Identity { target, .. } => target,
            Transformation::Matrix(t) => t.target(),
            Transformation::Helmert(t) => t.target(),
            Transformation::Geocentric(t) => t.target(),
            Transformation::Projection(t) => t.target(),
            Transformation::Concatenated(_, second) => second.target(),
        }
    }

    /// The same chain, starting at `source` and ending at `target`
    ///
    /// Simplification can drop the step touching an endpoint and leave an
    /// intermediate system at the edge of a chain; this binds the edges
    /// back to the systems the chain was built for.
    pub fn between(self, source: Arc<CoordinateSystem>, target: Arc<CoordinateSystem>) -> Transformation {
        self.with_source(source).with_target(target)
    }

    fn with_source(self, source: Arc<CoordinateSystem>) -> Transformation {
        match self {
            Transformation::Identity { target, .. } => Transformation::Identity { source, target },
            Transformation::Matrix(t) => Transformation::Matrix(t.with_source(source)),
            Transformation::Helmert(t) => Transformation::Helmert(t.with_source(source)),
            Transformation::Geocentric(t) => Transformation::Geocentric(t.with_source(source)),
            Transformation::Projection(t) => Transformation::Projection(t.with_source(source)),
            Transformation::Concatenated(first, second) => {
                Transformation::Concatenated(Box::new(first.with_source(source)), second)
            }
        }
    }

    fn with_target(self, target: Arc<CoordinateSystem>) -> Transformation {
        match self {
            Transformation::Identity { source, .. } => Transformation::Identity { source, target },
            Transformation::Matrix(t) => Transformation::Matrix(t.with_target(target)),
            Transformation::Helmert(t) => Transformation::Helmert(t.with_target(target)),
            Transformation::Geocentric(t) => Transformation::Geocentric(t.with_target(target)),
            Transformation::Projection(t) => Transformation::Projection(t.with_target(target)),
            Transformation::Concatenated(first, second) => {
                Transformation::Concatenated(first, Box::new(second.with_target(target)))
            }
        }
    }

    /// True if applying the transformation changes nothing
    pub fn is_identity(&self) -> bool {
        match self {
            Transformation::Identity { .. } => true,
            Transformation::Matrix(t) => t.is_identity(),
            Transformation::Helmert(t) => t.is_identity(),
            Transformation::Geocentric(_) | Transformation::Projection(_) => false,
            Transformation::Concatenated(first, second) => first.is_identity() && second.is_identity(),
        }
    }

    /// True if `other` exactly undoes `self`
    pub fn is_inverse_of(&self, other: &Transformation) -> bool {
        if !same_system(self.source(), other.target()) || !same_system(self.target(), other.source()) {
            return false;
        }
        match (self, other) {
            (Transformation::Matrix(a), Transformation::Matrix(b)) => a.is_inverse_of(b),
            (Transformation::Helmert(a), Transformation::Helmert(b)) => a.is_inverse_of(b),
            (Transformation::Geocentric(a), Transformation::Geocentric(b)) => a.is_inverse_of(b),
            (Transformation::Projection(a), Transformation::Projection(b)) => a.is_inverse_of(b),
            (Transformation::Concatenated(a1, a2), Transformation::Concatenated(b1, b2)) => {
                a1.is_inverse_of(b2) && a2.is_inverse_of(b1)
            }
            (a, b) => a.is_identity() && b.is_identity(),
        }
    }

    /// Transform the points in place
    ///
    /// On error the content of `points` is unspecified.
    pub fn apply(&self, points: &mut [Point3<f64>]) -> CrsResult<()> {
        match self {
            Transformation::Identity { .. } => {}
            Transformation::Matrix(t) => {
                if !t.is_identity() {
                    t.transform(points);
                }
            }
            Transformation::Helmert(t) => {
                if !t.is_identity() {
                    t.transform(points);
                }
            }
            Transformation::Geocentric(t) => t.transform(points)?,
            Transformation::Projection(t) => t.transform(points)?,
            Transformation::Concatenated(first, second) => {
                first.apply(points)?;
                second.apply(points)?;
            }
        }
        Ok(())
    }

    /// A new transformation going the other way
    pub fn invert(&self) -> CrsResult<Transformation> {
        Ok(match self {
            Transformation::Identity { source, target } => Transformation::Identity {
                source: target.clone(),
                target: source.clone(),
            },
            Transformation::Matrix(t) => Transformation::Matrix(t.invert()?),
            Transformation::Helmert(t) => Transformation::Helmert(t.invert()?),
            Transformation::Geocentric(t) => Transformation::Geocentric(t.invert()),
            Transformation::Projection(t) => Transformation::Projection(t.invert()),
            Transformation::Concatenated(first, second) => {
                Transformation::concatenated(second.invert()?, first.invert()?)
            }
        })
    }

    /// True if `crs` is a source or target anywhere in the chain
    pub fn contains(&self, crs: &CoordinateSystem) -> bool {
        match self {
            Transformation::Concatenated(first, second) => first.contains(crs) || second.contains(crs),
            step => same_system(step.source(), crs) || same_system(step.target(), crs),
        }
    }

    /// The atomic steps in application order
    pub fn steps(&self) -> Vec<&Transformation> {
        match self {
            Transformation::Concatenated(first, second) => {
                let mut steps = first.steps();
                steps.extend(second.steps());
                steps
            }
            step => vec![step],
        }
    }

    pub fn implementation_name(&self) -> &'static str {
        match self {
            Transformation::Identity { .. } => "Identity",
            Transformation::Matrix(_) => "Matrix",
            Transformation::Helmert(_) => "Helmert",
            Transformation::Geocentric(_) => "Geocentric",
            Transformation::Projection(t) => t.name(),
            Transformation::Concatenated(..) => "Concatenated",
        }
    }

    /// Human readable chain, one entry per atomic step
    pub fn describe(&self) -> String {
        self.steps()
            .iter()
            .map(|step| step.describe_step())
            .collect::<Vec<_>>()
            .join(" -> ")
    }

    fn describe_step(&self) -> String {
        match self {
            Transformation::Matrix(t) => {
                let (rows, cols) = t.matrix().shape();
                format!("Matrix {}x{}", rows, cols)
            }
            Transformation::Helmert(t) => format!(
                "Helmert {}{}", t.parameters().id().code(), inverse_marker(t.is_inverse())
            ),
            Transformation::Geocentric(t) => format!(
                "Geocentric {}{}", t.ellipsoid().id().code(), inverse_marker(t.is_inverse())
            ),
            Transformation::Projection(t) => format!(
                "{} {}{}", t.name(), t.projection().id().code(), inverse_marker(t.is_inverse())
            ),
            other => other.implementation_name().to_string(),
        }
    }
}

impl fmt::Display for Transformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} => {}: {}", self.source().code(), self.target().code(), self.describe())
    }
}

fn inverse_marker(inverse: bool) -> &'static str {
    if inverse { " (inverse)" } else { "" }
}

/// Same code or same definition
pub(crate) fn same_system(a: &CoordinateSystem, b: &CoordinateSystem) -> bool {
    a.code() == b.code() || a == b
}
