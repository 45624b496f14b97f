use tracing::{debug, trace};

use crate::error::Result;
use crate::tessellation::{tessellate_polygon, GeometryRequest, TriangleMesh, VertexFormat};

use super::{FrameState, Material, RenderContext, Renderable};

/// In-process reference backend.
///
/// Tessellates on the CPU and keeps the resulting meshes in ordinary memory,
/// so lifecycle behavior can be exercised (and tested) without a GPU. A real
/// backend would upload vertex buffers instead.
#[derive(Debug, Default)]
pub struct MeshContext {
    geometry_builds: u64,
}

impl MeshContext {
    /// Creates a new context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of geometry builds performed so far.
    #[must_use]
    pub fn geometry_builds(&self) -> u64 {
        self.geometry_builds
    }
}

impl RenderContext for MeshContext {
    type Geometry = TriangleMesh;
    type Renderable = MeshRenderable;

    fn build_geometry(&mut self, request: &GeometryRequest<'_>) -> Result<TriangleMesh> {
        self.geometry_builds += 1;
        let mesh = tessellate_polygon(request)?;
        debug!(
            loops = request.loops.len(),
            vertices = mesh.vertices.len(),
            triangles = mesh.indices.len(),
            "built polygon geometry"
        );
        Ok(mesh)
    }

    fn build_renderable(
        &mut self,
        geometry: TriangleMesh,
        format: VertexFormat,
    ) -> Result<MeshRenderable> {
        Ok(MeshRenderable {
            mesh: Some(geometry),
            format,
            material: Material::default(),
            draw_count: 0,
        })
    }
}

/// Renderable that owns its mesh directly.
#[derive(Debug)]
pub struct MeshRenderable {
    mesh: Option<TriangleMesh>,
    format: VertexFormat,
    material: Material,
    draw_count: u64,
}

impl MeshRenderable {
    /// The held mesh, or `None` once disposed.
    #[must_use]
    pub fn mesh(&self) -> Option<&TriangleMesh> {
        self.mesh.as_ref()
    }

    /// The vertex format the mesh was built with.
    #[must_use]
    pub fn format(&self) -> VertexFormat {
        self.format
    }

    /// The currently assigned material.
    #[must_use]
    pub fn material(&self) -> &Material {
        &self.material
    }

    /// Number of draws submitted so far.
    #[must_use]
    pub fn draw_count(&self) -> u64 {
        self.draw_count
    }
}

impl Renderable for MeshRenderable {
    fn set_material(&mut self, material: &Material) {
        self.material = material.clone();
    }

    fn draw(&mut self, frame: &FrameState) {
        if self.mesh.is_some() {
            self.draw_count += 1;
            trace!(frame = frame.frame_number, "drew polygon mesh");
        }
    }

    fn dispose(&mut self) {
        self.mesh = None;
    }
}
