mod flatten;
mod holes;

pub use flatten::{flatten_hierarchy, EliminateHoles};
pub use holes::BridgeHoleEliminator;

use crate::error::ConfigurationError;
use crate::math::Point3;

/// A closed polygon boundary: at least three ordered 3D points.
///
/// Insertion order defines the winding. The first point is not repeated at
/// the end; closure is implied.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryLoop {
    points: Vec<Point3>,
}

impl BoundaryLoop {
    /// Creates a boundary loop from an ordered point sequence.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::TooFewPoints`] if `points` has fewer
    /// than 3 entries.
    pub fn new(points: Vec<Point3>) -> Result<Self, ConfigurationError> {
        if points.len() < 3 {
            return Err(ConfigurationError::TooFewPoints {
                count: points.len(),
            });
        }
        Ok(Self { points })
    }

    /// Returns the ordered boundary points.
    #[must_use]
    pub fn points(&self) -> &[Point3] {
        &self.points
    }
}

/// A recursive outer-boundary-plus-holes structure.
///
/// Each hole's own children are "islands": full polygon hierarchies that
/// re-enter flattening as independent top-level outer boundaries. The outer
/// ring is stored raw; the ≥3-point rule is checked lazily when the
/// flattener dequeues the node.
#[derive(Debug, Clone)]
pub struct PolygonHierarchy {
    outer: Vec<Point3>,
    holes: Vec<PolygonHierarchy>,
}

impl PolygonHierarchy {
    /// Creates a hierarchy node with no holes (a simple polygon).
    #[must_use]
    pub fn new(outer: Vec<Point3>) -> Self {
        Self {
            outer,
            holes: Vec::new(),
        }
    }

    /// Creates a hierarchy node with the given holes.
    #[must_use]
    pub fn with_holes(outer: Vec<Point3>, holes: Vec<Self>) -> Self {
        Self { outer, holes }
    }

    /// Returns the outer boundary points.
    #[must_use]
    pub fn outer(&self) -> &[Point3] {
        &self.outer
    }

    /// Returns the direct holes of this node.
    #[must_use]
    pub fn holes(&self) -> &[Self] {
        &self.holes
    }
}
