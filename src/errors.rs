//! Custom error types for CRS handling

use std::fmt;
use std::io;

/// CRS-specific error types
#[derive(Debug)]
pub enum CrsError {
    /// I/O error
    IoError(io::Error),
    /// Malformed or unresolvable definitions, fatal at load time
    Configuration(String),
    /// A code that no store can resolve
    UnknownCrs(String),
    /// No transformation chain could be built between two systems
    TransformationPath {
        source: String,
        target: String,
        reason: String,
    },
    /// Projection math undefined for the given input
    ProjectionDomain {
        projection: String,
        reason: String,
    },
    /// Generic error with message
    GenericError(String),
}

impl CrsError {
    /// Shorthand for a path error between two codes
    pub fn path(source: impl fmt::Display, target: impl fmt::Display, reason: impl Into<String>) -> Self {
        CrsError::TransformationPath {
            source: source.to_string(),
            target: target.to_string(),
            reason: reason.into(),
        }
    }

    /// Shorthand for a projection domain error
    pub fn domain(projection: &str, reason: impl Into<String>) -> Self {
        CrsError::ProjectionDomain {
            projection: projection.to_string(),
            reason: reason.into(),
        }
    }

    /// Whether this error must abort store initialization
    pub fn is_fatal(&self) -> bool {
        matches!(self, CrsError::Configuration(_) | CrsError::IoError(_))
    }
}

impl fmt::Display for CrsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CrsError::IoError(e) => write!(f, "I/O error: {}", e),
            CrsError::Configuration(msg) => write!(f, "CRS configuration error: {}", msg),
            CrsError::UnknownCrs(code) => write!(f, "Unknown CRS: {}", code),
            CrsError::TransformationPath { source, target, reason } => {
                write!(f, "No transformation from {} to {}: {}", source, target, reason)
            }
            CrsError::ProjectionDomain { projection, reason } => {
                write!(f, "Projection {} undefined for input: {}", projection, reason)
            }
            CrsError::GenericError(msg) => write!(f, "CRS error: {}", msg),
        }
    }
}

impl std::error::Error for CrsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CrsError::IoError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for CrsError {
    fn from(error: io::Error) -> Self {
        CrsError::IoError(error)
    }
}

/// Result type for CRS operations
pub type CrsResult<T> = Result<T, CrsError>;

impl From<String> for CrsError {
    fn from(msg: String) -> Self {
        CrsError::GenericError(msg)
    }
}
