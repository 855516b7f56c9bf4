//! Error types for mesh generation and plate partitioning

use std::fmt;

/// Errors that can occur while building a mesh, growing plates or querying them
#[derive(Debug, Clone, PartialEq)]
pub enum MeshError {
    /// Configuration validation failed
    InvalidConfig(String),
    /// Three collinear points have no circumcircle
    DegenerateGeometry,
    /// Triangulation input was not sorted by x (first offending index)
    UnsortedPoints {
        /// Index of the first point smaller than its predecessor
        index: usize,
    },
    /// More plates were requested than there are points to seed them
    ExhaustedPoints {
        /// Number of seeds requested
        requested: usize,
        /// Number of points available
        available: usize,
    },
    /// A weighted pick value exceeded the cumulative share of all candidates
    OverflowSelection(f64),
    /// A weighted pick was attempted over candidates with zero total weight
    EmptySelection,
    /// Requested point index does not exist
    PointNotFound(usize),
}

impl fmt::Display for MeshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeshError::InvalidConfig(msg) => write!(f, "invalid configuration: {}", msg),
            MeshError::DegenerateGeometry => {
                write!(f, "degenerate geometry: collinear triangle has no circumcircle")
            }
            MeshError::UnsortedPoints { index } => {
                write!(f, "points must be sorted by x (point {} is out of order)", index)
            }
            MeshError::ExhaustedPoints { requested, available } => write!(
                f,
                "cannot seed {} plates from {} points",
                requested, available
            ),
            MeshError::OverflowSelection(value) => {
                write!(f, "selection value {} is outside the valid range [0, 1]", value)
            }
            MeshError::EmptySelection => {
                write!(f, "cannot pick from candidates with zero total area")
            }
            MeshError::PointNotFound(id) => write!(f, "point not found: {}", id),
        }
    }
}

impl std::error::Error for MeshError {}

/// Result type alias for mesh operations
pub type Result<T> = std::result::Result<T, MeshError>;
