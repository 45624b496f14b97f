mod tessellate_polygon;

pub use tessellate_polygon::tessellate_polygon;

use crate::boundary::BoundaryLoop;
use crate::ellipsoid::Ellipsoid;
use crate::math::{Point2, Point3, Vector3};

/// Vertex attributes a geometry build must produce.
///
/// Positions are always present; the rest is dictated by the material.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexFormat {
    /// Per-vertex surface normals.
    pub normal: bool,
    /// Per-vertex texture coordinates.
    pub uv: bool,
}

impl VertexFormat {
    /// Positions and normals only.
    pub const POSITION_NORMAL: Self = Self {
        normal: true,
        uv: false,
    };

    /// Positions, normals and texture coordinates.
    pub const POSITION_NORMAL_UV: Self = Self {
        normal: true,
        uv: true,
    };
}

/// Everything the geometry-construction step needs for one build.
///
/// Borrows the primitive's configuration for the duration of the call.
#[derive(Debug)]
pub struct GeometryRequest<'a> {
    /// Hole-free boundary loops to triangulate.
    pub loops: &'a [BoundaryLoop],
    /// Height offset above the ellipsoid surface.
    pub height: f64,
    /// Optional rotation of texture coordinates, in radians.
    pub texture_rotation: Option<f64>,
    /// Reference ellipsoid the boundary points lie on.
    pub ellipsoid: &'a Ellipsoid,
    /// Angular sampling granularity in radians.
    pub granularity: f64,
    /// Attributes the build must produce.
    pub vertex_format: VertexFormat,
}

/// A triangle mesh approximation of a surface.
#[derive(Debug, Clone, Default)]
pub struct TriangleMesh {
    /// Vertex positions.
    pub vertices: Vec<Point3>,
    /// Vertex normals.
    pub normals: Vec<Vector3>,
    /// UV coordinates.
    pub uvs: Vec<Point2>,
    /// Triangle indices (each triple defines a triangle).
    pub indices: Vec<[u32; 3]>,
}
