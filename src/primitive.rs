use std::sync::Arc;

use tracing::{debug, trace};

use crate::boundary::{
    flatten_hierarchy, BoundaryLoop, BridgeHoleEliminator, EliminateHoles, PolygonHierarchy,
};
use crate::ellipsoid::Ellipsoid;
use crate::error::{GeoprimError, InvariantViolation, Result};
use crate::math::Point3;
use crate::render::{FrameState, Material, RenderContext, Renderable};
use crate::tessellation::GeometryRequest;

/// Default angular sampling granularity: one degree, in radians.
pub const DEFAULT_GRANULARITY: f64 = std::f64::consts::PI / 180.0;

/// Where the primitive's boundary data currently comes from.
#[derive(Debug, Clone, Default)]
enum BoundarySource {
    /// Nothing to draw; a valid terminal state.
    #[default]
    Unset,
    /// A single flat ring set via [`PolygonPrimitive::set_flat_boundary`].
    Flat(BoundaryLoop),
    /// Hole-free loops flattened from a hierarchy.
    Hierarchy(Vec<BoundaryLoop>),
}

impl BoundarySource {
    fn loops(&self) -> &[BoundaryLoop] {
        match self {
            Self::Unset => &[],
            Self::Flat(ring) => std::slice::from_ref(ring),
            Self::Hierarchy(set) => set,
        }
    }
}

/// Snapshot of the geometry-affecting fields at the last rebuild.
#[derive(Debug, Clone)]
struct RebuildSnapshot {
    ellipsoid: Arc<Ellipsoid>,
    granularity: f64,
    height: f64,
    texture_rotation: Option<f64>,
}

impl RebuildSnapshot {
    /// Exact comparison is intentional: any numeric change, however small,
    /// invalidates the geometry. The ellipsoid is compared by pointer
    /// identity, so a value-equal but distinct instance counts as changed.
    #[allow(clippy::float_cmp)]
    fn differs(
        &self,
        ellipsoid: &Arc<Ellipsoid>,
        granularity: f64,
        height: f64,
        texture_rotation: Option<f64>,
    ) -> bool {
        !Arc::ptr_eq(&self.ellipsoid, ellipsoid)
            || self.granularity != granularity
            || self.height != height
            || self.texture_rotation != texture_rotation
    }
}

/// A renderable filled polygon on an ellipsoid surface.
///
/// The boundary is either a single flat ring or an arbitrarily nested
/// hierarchy of outer rings and holes, flattened up front into hole-free
/// loops. Configuration fields are public and freely mutable between frames;
/// [`tick`](Self::tick) lazily rebuilds the backend renderable only when a
/// geometry-affecting field changed since the last rebuild, and reuses it
/// otherwise. Single-threaded and frame-driven: one `tick` per frame, no
/// internal locking.
pub struct PolygonPrimitive<C: RenderContext> {
    /// Whether the primitive is drawn at all.
    pub show: bool,
    /// Height offset above the ellipsoid surface.
    pub height: f64,
    /// Angular sampling granularity in radians; must stay positive.
    pub granularity: f64,
    /// Optional rotation of texture coordinates, in radians.
    pub texture_rotation: Option<f64>,
    /// Reference ellipsoid. Compared by identity across ticks: assigning a
    /// value-equal but distinct instance forces a rebuild.
    pub ellipsoid: Option<Arc<Ellipsoid>>,
    /// Surface material, reassigned onto the renderable every tick.
    pub material: Option<Material>,

    boundary: BoundarySource,
    snapshot: Option<RebuildSnapshot>,
    rebuild_requested: bool,
    renderable: Option<C::Renderable>,
    destroyed: bool,
}

impl<C: RenderContext> PolygonPrimitive<C> {
    /// Creates a primitive with default configuration (WGS84 ellipsoid,
    /// white color material, one-degree granularity, no boundary).
    #[must_use]
    pub fn new() -> Self {
        Self {
            show: true,
            height: 0.0,
            granularity: DEFAULT_GRANULARITY,
            texture_rotation: None,
            ellipsoid: Some(Arc::new(Ellipsoid::wgs84())),
            material: Some(Material::default()),
            boundary: BoundarySource::Unset,
            snapshot: None,
            rebuild_requested: false,
            renderable: None,
            destroyed: false,
        }
    }

    /// Sets the boundary to a single flat ring, replacing any stored
    /// hierarchy. An empty list clears the boundary ("nothing to draw").
    ///
    /// A rebuild is requested unconditionally — the point sequence is never
    /// compared against the previous one.
    ///
    /// # Errors
    ///
    /// [`ConfigurationError`](crate::error::ConfigurationError) if `points`
    /// is non-empty with fewer than 3 entries; the stored configuration is
    /// left untouched. [`GeoprimError::UseAfterDestroy`] after `destroy`.
    pub fn set_flat_boundary(&mut self, points: Vec<Point3>) -> Result<()> {
        self.ensure_alive()?;
        if points.is_empty() {
            self.boundary = BoundarySource::Unset;
        } else {
            self.boundary = BoundarySource::Flat(BoundaryLoop::new(points)?);
        }
        self.rebuild_requested = true;
        Ok(())
    }

    /// Sets the boundary from a nested hierarchy, flattened with the default
    /// [`BridgeHoleEliminator`].
    ///
    /// # Errors
    ///
    /// See [`set_hierarchy_with`](Self::set_hierarchy_with).
    pub fn set_hierarchy(&mut self, root: &PolygonHierarchy) -> Result<()> {
        self.set_hierarchy_with(root, &BridgeHoleEliminator)
    }

    /// Sets the boundary from a nested hierarchy using a caller-supplied
    /// hole eliminator, replacing any stored flat ring.
    ///
    /// # Errors
    ///
    /// Propagates flattening errors unchanged
    /// ([`ConfigurationError`](crate::error::ConfigurationError) for a ring
    /// with fewer than 3 points at any depth, or any eliminator error); the
    /// stored configuration is left untouched on error.
    /// [`GeoprimError::UseAfterDestroy`] after `destroy`.
    pub fn set_hierarchy_with<E: EliminateHoles>(
        &mut self,
        root: &PolygonHierarchy,
        eliminator: &E,
    ) -> Result<()> {
        self.ensure_alive()?;
        let flattened = flatten_hierarchy(root, eliminator)?;
        self.boundary = BoundarySource::Hierarchy(flattened);
        self.rebuild_requested = true;
        Ok(())
    }

    /// Per-frame evaluation: validates invariants, rebuilds the renderable
    /// if a geometry-affecting field changed since the last rebuild, then
    /// assigns the material and submits the draw.
    ///
    /// # Errors
    ///
    /// [`InvariantViolation`] if the ellipsoid or material is unassigned or
    /// the granularity is not positive — programmer errors, surfaced rather
    /// than silently skipped. [`GeoprimError::UseAfterDestroy`] after
    /// `destroy`. Geometry build errors are propagated from the context.
    pub fn tick(&mut self, ctx: &mut C, frame: &FrameState) -> Result<()> {
        self.ensure_alive()?;
        let ellipsoid = self
            .ellipsoid
            .clone()
            .ok_or(InvariantViolation::MissingEllipsoid)?;
        let material = self
            .material
            .clone()
            .ok_or(InvariantViolation::MissingMaterial)?;
        if self.granularity <= 0.0 {
            return Err(InvariantViolation::NonPositiveGranularity(self.granularity).into());
        }

        if !self.show {
            return Ok(());
        }
        if !self.rebuild_requested && self.renderable.is_none() {
            // Nothing configured yet.
            return Ok(());
        }

        let dirty = self.rebuild_requested
            || self.snapshot.as_ref().map_or(true, |snapshot| {
                snapshot.differs(
                    &ellipsoid,
                    self.granularity,
                    self.height,
                    self.texture_rotation,
                )
            });

        if dirty {
            self.snapshot = Some(RebuildSnapshot {
                ellipsoid: Arc::clone(&ellipsoid),
                granularity: self.granularity,
                height: self.height,
                texture_rotation: self.texture_rotation,
            });
            if let Some(mut stale) = self.renderable.take() {
                stale.dispose();
            }
            self.rebuild_requested = false;

            let loops = self.boundary.loops();
            if loops.is_empty() {
                // Cleared boundary: a valid terminal state, not an error.
                return Ok(());
            }
            debug!(loops = loops.len(), "rebuilding polygon renderable");
            let request = GeometryRequest {
                loops,
                height: self.height,
                texture_rotation: self.texture_rotation,
                ellipsoid: &ellipsoid,
                granularity: self.granularity,
                vertex_format: material.vertex_format(),
            };
            let geometry = ctx.build_geometry(&request)?;
            self.renderable = Some(ctx.build_renderable(geometry, material.vertex_format())?);
        } else {
            trace!("reusing polygon renderable");
        }

        if let Some(renderable) = &mut self.renderable {
            // Material can change without touching geometry, so it is
            // reassigned every tick regardless of dirtiness.
            renderable.set_material(&material);
            renderable.draw(frame);
        }
        Ok(())
    }

    /// Disposes the held renderable and marks the primitive destroyed.
    /// Every subsequent contract call, including a second `destroy`, fails
    /// with [`GeoprimError::UseAfterDestroy`]; only
    /// [`is_destroyed`](Self::is_destroyed) stays callable.
    ///
    /// # Errors
    ///
    /// [`GeoprimError::UseAfterDestroy`] if already destroyed.
    pub fn destroy(&mut self) -> Result<()> {
        self.ensure_alive()?;
        if let Some(mut renderable) = self.renderable.take() {
            renderable.dispose();
        }
        self.destroyed = true;
        Ok(())
    }

    /// Whether `destroy` has been called.
    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// The currently held renderable, if one has been built.
    #[must_use]
    pub fn renderable(&self) -> Option<&C::Renderable> {
        self.renderable.as_ref()
    }

    fn ensure_alive(&self) -> Result<()> {
        if self.destroyed {
            return Err(GeoprimError::UseAfterDestroy);
        }
        Ok(())
    }
}

impl<C: RenderContext> Default for PolygonPrimitive<C> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::error::ConfigurationError;

    fn p(x: f64, y: f64) -> Point3 {
        Point3::new(x, y, 0.0)
    }

    fn square(x0: f64, y0: f64, size: f64) -> Vec<Point3> {
        vec![
            p(x0, y0),
            p(x0 + size, y0),
            p(x0 + size, y0 + size),
            p(x0, y0 + size),
        ]
    }

    #[derive(Default)]
    struct Stats {
        geometry_builds: usize,
        renderable_builds: usize,
        material_sets: usize,
        draws: usize,
        disposals: usize,
        last_loops: Vec<Vec<Point3>>,
        last_material: Option<Material>,
    }

    /// Backend double that only counts calls and records the last request.
    struct FakeContext {
        stats: Rc<RefCell<Stats>>,
    }

    impl FakeContext {
        fn new() -> (Self, Rc<RefCell<Stats>>) {
            let stats = Rc::new(RefCell::new(Stats::default()));
            (
                Self {
                    stats: Rc::clone(&stats),
                },
                stats,
            )
        }
    }

    struct FakeRenderable {
        stats: Rc<RefCell<Stats>>,
        disposed: bool,
    }

    impl RenderContext for FakeContext {
        type Geometry = ();
        type Renderable = FakeRenderable;

        fn build_geometry(&mut self, request: &GeometryRequest<'_>) -> Result<()> {
            let mut stats = self.stats.borrow_mut();
            stats.geometry_builds += 1;
            stats.last_loops = request
                .loops
                .iter()
                .map(|l| l.points().to_vec())
                .collect();
            Ok(())
        }

        fn build_renderable(
            &mut self,
            (): (),
            _format: crate::tessellation::VertexFormat,
        ) -> Result<FakeRenderable> {
            self.stats.borrow_mut().renderable_builds += 1;
            Ok(FakeRenderable {
                stats: Rc::clone(&self.stats),
                disposed: false,
            })
        }
    }

    impl Renderable for FakeRenderable {
        fn set_material(&mut self, material: &Material) {
            let mut stats = self.stats.borrow_mut();
            stats.material_sets += 1;
            stats.last_material = Some(material.clone());
        }

        fn draw(&mut self, _frame: &FrameState) {
            self.stats.borrow_mut().draws += 1;
        }

        fn dispose(&mut self) {
            assert!(!self.disposed, "renderable disposed twice");
            self.disposed = true;
            self.stats.borrow_mut().disposals += 1;
        }
    }

    fn frame() -> FrameState {
        FrameState::new(0)
    }

    #[test]
    fn flat_boundary_builds_once_with_the_input() {
        let (mut ctx, stats) = FakeContext::new();
        let mut primitive = PolygonPrimitive::<FakeContext>::new();
        primitive.set_flat_boundary(square(0.0, 0.0, 1.0)).unwrap();
        primitive.tick(&mut ctx, &frame()).unwrap();

        let stats = stats.borrow();
        assert_eq!(stats.geometry_builds, 1);
        assert_eq!(stats.renderable_builds, 1);
        assert_eq!(stats.last_loops, vec![square(0.0, 0.0, 1.0)]);
        assert_eq!(stats.material_sets, 1);
        assert_eq!(stats.draws, 1);
    }

    #[test]
    fn latest_boundary_wins_before_tick() {
        let (mut ctx, stats) = FakeContext::new();
        let mut primitive = PolygonPrimitive::<FakeContext>::new();
        primitive.set_flat_boundary(square(0.0, 0.0, 1.0)).unwrap();
        primitive.set_flat_boundary(square(5.0, 5.0, 2.0)).unwrap();
        primitive.tick(&mut ctx, &frame()).unwrap();

        let stats = stats.borrow();
        assert_eq!(stats.geometry_builds, 1);
        assert_eq!(stats.last_loops, vec![square(5.0, 5.0, 2.0)]);
    }

    #[test]
    fn repeated_ticks_reuse_the_renderable() {
        let (mut ctx, stats) = FakeContext::new();
        let mut primitive = PolygonPrimitive::<FakeContext>::new();
        primitive.set_flat_boundary(square(0.0, 0.0, 1.0)).unwrap();
        for i in 0..3 {
            primitive.tick(&mut ctx, &FrameState::new(i)).unwrap();
        }

        let stats = stats.borrow();
        assert_eq!(stats.geometry_builds, 1);
        assert_eq!(stats.disposals, 0);
        // Material is still assigned on every tick.
        assert_eq!(stats.material_sets, 3);
        assert_eq!(stats.draws, 3);
    }

    #[test]
    fn resetting_the_same_boundary_still_rebuilds() {
        // The point sequence is never compared, so an identical boundary
        // rebuilds unconditionally.
        let (mut ctx, stats) = FakeContext::new();
        let mut primitive = PolygonPrimitive::<FakeContext>::new();
        primitive.set_flat_boundary(square(0.0, 0.0, 1.0)).unwrap();
        primitive.tick(&mut ctx, &frame()).unwrap();
        primitive.set_flat_boundary(square(0.0, 0.0, 1.0)).unwrap();
        primitive.tick(&mut ctx, &frame()).unwrap();

        let stats = stats.borrow();
        assert_eq!(stats.geometry_builds, 2);
        assert_eq!(stats.disposals, 1);
    }

    #[test]
    fn too_few_points_rejected_and_previous_state_kept() {
        let (mut ctx, stats) = FakeContext::new();
        let mut primitive = PolygonPrimitive::<FakeContext>::new();
        primitive.set_flat_boundary(square(0.0, 0.0, 1.0)).unwrap();
        primitive.tick(&mut ctx, &frame()).unwrap();

        let err = primitive
            .set_flat_boundary(vec![p(0.0, 0.0), p(1.0, 0.0)])
            .unwrap_err();
        assert!(matches!(
            err,
            GeoprimError::Configuration(ConfigurationError::TooFewPoints { count: 2 })
        ));

        primitive.tick(&mut ctx, &frame()).unwrap();
        let stats = stats.borrow();
        // No rebuild happened; the old renderable kept drawing.
        assert_eq!(stats.geometry_builds, 1);
        assert_eq!(stats.draws, 2);
    }

    #[test]
    fn failed_hierarchy_keeps_previous_boundary() {
        let (mut ctx, stats) = FakeContext::new();
        let mut primitive = PolygonPrimitive::<FakeContext>::new();
        primitive.set_flat_boundary(square(0.0, 0.0, 1.0)).unwrap();

        let bad = PolygonHierarchy::with_holes(
            square(0.0, 0.0, 4.0),
            vec![PolygonHierarchy::new(vec![p(1.0, 1.0), p(2.0, 1.0)])],
        );
        assert!(primitive.set_hierarchy(&bad).is_err());

        primitive.tick(&mut ctx, &frame()).unwrap();
        assert_eq!(stats.borrow().last_loops, vec![square(0.0, 0.0, 1.0)]);
    }

    #[test]
    fn hierarchy_with_island_builds_two_loops() {
        let (mut ctx, stats) = FakeContext::new();
        let mut primitive = PolygonPrimitive::<FakeContext>::new();
        let island = PolygonHierarchy::new(square(1.5, 1.5, 0.5));
        let hole = PolygonHierarchy::with_holes(square(1.0, 1.0, 2.0), vec![island]);
        let root = PolygonHierarchy::with_holes(square(0.0, 0.0, 4.0), vec![hole]);

        primitive.set_hierarchy(&root).unwrap();
        primitive.tick(&mut ctx, &frame()).unwrap();

        let stats = stats.borrow();
        assert_eq!(stats.geometry_builds, 1);
        assert_eq!(stats.last_loops.len(), 2);
        // Merged outer-with-hole first, the untouched island second.
        assert_eq!(stats.last_loops[1], square(1.5, 1.5, 0.5));
        assert!(stats.last_loops[0].len() > 8);
    }

    #[test]
    fn hidden_primitive_skips_build_and_draw() {
        let (mut ctx, stats) = FakeContext::new();
        let mut primitive = PolygonPrimitive::<FakeContext>::new();
        primitive.set_flat_boundary(square(0.0, 0.0, 1.0)).unwrap();
        primitive.show = false;
        primitive.tick(&mut ctx, &frame()).unwrap();

        let stats = stats.borrow();
        assert_eq!(stats.geometry_builds, 0);
        assert_eq!(stats.draws, 0);
    }

    #[test]
    fn unconfigured_tick_is_a_noop() {
        let (mut ctx, stats) = FakeContext::new();
        let mut primitive = PolygonPrimitive::<FakeContext>::new();
        primitive.tick(&mut ctx, &frame()).unwrap();
        assert_eq!(stats.borrow().geometry_builds, 0);
    }

    #[test]
    fn cleared_boundary_disposes_and_goes_quiet() {
        let (mut ctx, stats) = FakeContext::new();
        let mut primitive = PolygonPrimitive::<FakeContext>::new();
        primitive.set_flat_boundary(square(0.0, 0.0, 1.0)).unwrap();
        primitive.tick(&mut ctx, &frame()).unwrap();

        primitive.set_flat_boundary(Vec::new()).unwrap();
        primitive.tick(&mut ctx, &frame()).unwrap();
        primitive.tick(&mut ctx, &frame()).unwrap();

        let stats = stats.borrow();
        assert_eq!(stats.disposals, 1);
        assert_eq!(stats.geometry_builds, 1);
        assert_eq!(stats.draws, 1);
        assert!(primitive.renderable().is_none());
    }

    #[test]
    fn texture_rotation_change_triggers_exactly_one_rebuild() {
        let (mut ctx, stats) = FakeContext::new();
        let mut primitive = PolygonPrimitive::<FakeContext>::new();
        primitive.set_flat_boundary(square(0.0, 0.0, 1.0)).unwrap();
        primitive.tick(&mut ctx, &frame()).unwrap();

        primitive.texture_rotation = Some(0.3);
        primitive.tick(&mut ctx, &frame()).unwrap();
        primitive.tick(&mut ctx, &frame()).unwrap();

        let stats = stats.borrow();
        assert_eq!(stats.geometry_builds, 2);
        assert_eq!(stats.disposals, 1);
    }

    #[test]
    fn height_and_granularity_changes_trigger_rebuilds() {
        let (mut ctx, stats) = FakeContext::new();
        let mut primitive = PolygonPrimitive::<FakeContext>::new();
        primitive.set_flat_boundary(square(0.0, 0.0, 1.0)).unwrap();
        primitive.tick(&mut ctx, &frame()).unwrap();

        primitive.height = 100.0;
        primitive.tick(&mut ctx, &frame()).unwrap();
        primitive.granularity = DEFAULT_GRANULARITY / 2.0;
        primitive.tick(&mut ctx, &frame()).unwrap();

        assert_eq!(stats.borrow().geometry_builds, 3);
    }

    #[test]
    fn material_swap_rebuilds_nothing() {
        let (mut ctx, stats) = FakeContext::new();
        let mut primitive = PolygonPrimitive::<FakeContext>::new();
        primitive.set_flat_boundary(square(0.0, 0.0, 1.0)).unwrap();
        primitive.tick(&mut ctx, &frame()).unwrap();

        primitive.material = Some(Material::color([1.0, 0.0, 0.0, 1.0]));
        primitive.tick(&mut ctx, &frame()).unwrap();

        let stats = stats.borrow();
        assert_eq!(stats.geometry_builds, 1);
        assert_eq!(stats.material_sets, 2);
        assert_eq!(
            stats.last_material,
            Some(Material::color([1.0, 0.0, 0.0, 1.0]))
        );
    }

    #[test]
    fn value_equal_ellipsoid_still_counts_as_changed() {
        // Deliberately conservative: identity comparison, not value equality.
        let (mut ctx, stats) = FakeContext::new();
        let mut primitive = PolygonPrimitive::<FakeContext>::new();
        primitive.set_flat_boundary(square(0.0, 0.0, 1.0)).unwrap();
        primitive.tick(&mut ctx, &frame()).unwrap();

        primitive.ellipsoid = Some(Arc::new(Ellipsoid::wgs84()));
        primitive.tick(&mut ctx, &frame()).unwrap();

        assert_eq!(stats.borrow().geometry_builds, 2);
    }

    #[test]
    fn reassigning_the_same_ellipsoid_instance_does_not_rebuild() {
        let (mut ctx, stats) = FakeContext::new();
        let mut primitive = PolygonPrimitive::<FakeContext>::new();
        primitive.set_flat_boundary(square(0.0, 0.0, 1.0)).unwrap();
        primitive.tick(&mut ctx, &frame()).unwrap();

        let same = primitive.ellipsoid.clone();
        primitive.ellipsoid = same;
        primitive.tick(&mut ctx, &frame()).unwrap();

        assert_eq!(stats.borrow().geometry_builds, 1);
    }

    #[test]
    fn missing_material_is_an_invariant_violation() {
        let (mut ctx, _stats) = FakeContext::new();
        let mut primitive = PolygonPrimitive::<FakeContext>::new();
        primitive.set_flat_boundary(square(0.0, 0.0, 1.0)).unwrap();
        primitive.material = None;
        let err = primitive.tick(&mut ctx, &frame()).unwrap_err();
        assert!(matches!(
            err,
            GeoprimError::Invariant(InvariantViolation::MissingMaterial)
        ));
    }

    #[test]
    fn missing_ellipsoid_is_an_invariant_violation() {
        let (mut ctx, _stats) = FakeContext::new();
        let mut primitive = PolygonPrimitive::<FakeContext>::new();
        primitive.ellipsoid = None;
        let err = primitive.tick(&mut ctx, &frame()).unwrap_err();
        assert!(matches!(
            err,
            GeoprimError::Invariant(InvariantViolation::MissingEllipsoid)
        ));
    }

    #[test]
    fn non_positive_granularity_is_an_invariant_violation() {
        let (mut ctx, _stats) = FakeContext::new();
        let mut primitive = PolygonPrimitive::<FakeContext>::new();
        primitive.granularity = 0.0;
        let err = primitive.tick(&mut ctx, &frame()).unwrap_err();
        assert!(matches!(
            err,
            GeoprimError::Invariant(InvariantViolation::NonPositiveGranularity(_))
        ));
    }

    #[test]
    fn destroy_disposes_exactly_once_and_poisons_the_primitive() {
        let (mut ctx, stats) = FakeContext::new();
        let mut primitive = PolygonPrimitive::<FakeContext>::new();
        primitive.set_flat_boundary(square(0.0, 0.0, 1.0)).unwrap();
        primitive.tick(&mut ctx, &frame()).unwrap();

        primitive.destroy().unwrap();
        assert!(primitive.is_destroyed());
        assert_eq!(stats.borrow().disposals, 1);

        assert!(matches!(
            primitive.tick(&mut ctx, &frame()),
            Err(GeoprimError::UseAfterDestroy)
        ));
        assert!(matches!(
            primitive.set_flat_boundary(square(0.0, 0.0, 1.0)),
            Err(GeoprimError::UseAfterDestroy)
        ));
        assert!(matches!(
            primitive.destroy(),
            Err(GeoprimError::UseAfterDestroy)
        ));
        // The renderable was disposed once, not once per failed call.
        assert_eq!(stats.borrow().disposals, 1);
    }

    #[test]
    fn destroy_before_any_build_is_fine() {
        let (_ctx, stats) = FakeContext::new();
        let mut primitive = PolygonPrimitive::<FakeContext>::new();
        primitive.destroy().unwrap();
        assert!(primitive.is_destroyed());
        assert_eq!(stats.borrow().disposals, 0);
    }
}
