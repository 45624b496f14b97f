mod mesh;

pub use mesh::{MeshContext, MeshRenderable};

use crate::error::Result;
use crate::tessellation::{GeometryRequest, VertexFormat};

/// Per-frame state handed through to draw calls by the frame driver.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameState {
    /// Monotonically increasing frame counter.
    pub frame_number: u64,
}

impl FrameState {
    /// Creates the state for a given frame.
    #[must_use]
    pub fn new(frame_number: u64) -> Self {
        Self { frame_number }
    }
}

/// Surface appearance of a primitive.
///
/// Swapping the material never forces a geometry rebuild; it is reassigned
/// onto the renderable every tick.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// What kind of surface this material produces.
    pub kind: MaterialKind,
}

/// The supported material kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum MaterialKind {
    /// Flat RGBA color.
    Color([f32; 4]),
    /// Textured surface; requires texture coordinates.
    Textured,
}

impl Material {
    /// A flat color material.
    #[must_use]
    pub fn color(rgba: [f32; 4]) -> Self {
        Self {
            kind: MaterialKind::Color(rgba),
        }
    }

    /// A textured material.
    #[must_use]
    pub fn textured() -> Self {
        Self {
            kind: MaterialKind::Textured,
        }
    }

    /// The vertex attributes geometry must provide for this material.
    #[must_use]
    pub fn vertex_format(&self) -> VertexFormat {
        match self.kind {
            MaterialKind::Color(_) => VertexFormat::POSITION_NORMAL,
            MaterialKind::Textured => VertexFormat::POSITION_NORMAL_UV,
        }
    }
}

impl Default for Material {
    /// Opaque white.
    fn default() -> Self {
        Self::color([1.0, 1.0, 1.0, 1.0])
    }
}

/// Builds geometry and draw-ready renderables for polygon primitives.
///
/// Implemented by the rendering backend; the primitive only ever talks to
/// this seam.
pub trait RenderContext {
    /// Tessellated geometry prior to appearance wrapping.
    type Geometry;
    /// Draw-ready representation, exclusively owned by the primitive.
    type Renderable: Renderable;

    /// Constructs a tessellated, GPU-ready representation from boundary data
    /// plus height, rotation, ellipsoid, granularity and vertex format.
    ///
    /// # Errors
    ///
    /// Returns an error if the boundary cannot be tessellated.
    fn build_geometry(&mut self, request: &GeometryRequest<'_>) -> Result<Self::Geometry>;

    /// Wraps geometry with draw-time appearance state.
    ///
    /// # Errors
    ///
    /// Returns an error if the renderable cannot be created.
    fn build_renderable(
        &mut self,
        geometry: Self::Geometry,
        format: VertexFormat,
    ) -> Result<Self::Renderable>;
}

/// A GPU-resident representation of tessellated geometry plus appearance.
///
/// Single-owner resource: replaced wholesale on rebuild, never mutated in
/// place. `dispose` must release the underlying resources synchronously;
/// the owner calls it exactly once, on replace or on destroy.
pub trait Renderable {
    /// Assigns the material used for subsequent draws.
    fn set_material(&mut self, material: &Material);

    /// Submits the draw for this frame.
    fn draw(&mut self, frame: &FrameState);

    /// Releases the underlying resources.
    fn dispose(&mut self);
}
