use std::cmp::Ordering;

use crate::error::Result;
use crate::math::plane::{signed_area_2d, ProjectionPlane};
use crate::math::Point3;

use super::{BoundaryLoop, EliminateHoles};

/// Default hole-merging collaborator.
///
/// Projects the outer ring and all holes onto the outer ring's best-fit
/// plane, then splices each hole into the outer ring through a zero-width
/// bridge: from the outer vertex nearest the hole's rightmost projected
/// vertex, around the hole (wound opposite to the outer ring), and back along
/// the same bridge. Holes are merged rightmost-first, mirroring the usual
/// ear-clipping preparation. Because both bridge endpoints are duplicated,
/// the merged ring's signed area is exactly outer minus holes.
///
/// Holes are assumed disjoint and contained in the outer ring; the nearest
/// vertex is used as the bridge target without a full visibility test, which
/// is sufficient for well-separated holes. Swap in another [`EliminateHoles`]
/// implementation when stronger guarantees are needed.
#[derive(Debug, Clone, Copy, Default)]
pub struct BridgeHoleEliminator;

impl EliminateHoles for BridgeHoleEliminator {
    fn eliminate(&self, outer: &BoundaryLoop, holes: &[BoundaryLoop]) -> Result<BoundaryLoop> {
        let plane = ProjectionPlane::fit(outer.points())?;
        let outer_ccw = ring_is_ccw(&plane, outer.points());

        // Merge the hole with the largest projected u first.
        let mut order: Vec<usize> = (0..holes.len()).collect();
        order.sort_by(|&a, &b| {
            let ua = rightmost_u(&plane, holes[a].points());
            let ub = rightmost_u(&plane, holes[b].points());
            ub.partial_cmp(&ua).unwrap_or(Ordering::Equal)
        });

        let mut merged = outer.points().to_vec();
        for &h in &order {
            let mut hole = holes[h].points().to_vec();
            if ring_is_ccw(&plane, &hole) == outer_ccw {
                hole.reverse();
            }
            merged = splice(&plane, &merged, &hole);
        }
        Ok(BoundaryLoop::new(merged)?)
    }
}

/// Largest projected u coordinate over the ring.
fn rightmost_u(plane: &ProjectionPlane, ring: &[Point3]) -> f64 {
    ring.iter()
        .map(|p| plane.project(p).0)
        .fold(f64::NEG_INFINITY, f64::max)
}

fn ring_is_ccw(plane: &ProjectionPlane, ring: &[Point3]) -> bool {
    let uvs: Vec<(f64, f64)> = ring.iter().map(|p| plane.project(p)).collect();
    signed_area_2d(&uvs) > 0.0
}

/// Splices `hole` into `ring` through a zero-width bridge between the hole's
/// rightmost projected vertex and the nearest ring vertex.
fn splice(plane: &ProjectionPlane, ring: &[Point3], hole: &[Point3]) -> Vec<Point3> {
    let mut hole_start = 0;
    let mut best_u = f64::NEG_INFINITY;
    for (i, p) in hole.iter().enumerate() {
        let (u, _) = plane.project(p);
        if u > best_u {
            best_u = u;
            hole_start = i;
        }
    }

    let anchor = &hole[hole_start];
    let mut ring_at = 0;
    let mut best_dist = f64::INFINITY;
    for (i, p) in ring.iter().enumerate() {
        let d = (p - anchor).norm_squared();
        if d < best_dist {
            best_dist = d;
            ring_at = i;
        }
    }

    let mut out = Vec::with_capacity(ring.len() + hole.len() + 2);
    out.extend_from_slice(&ring[..=ring_at]);
    out.extend_from_slice(&hole[hole_start..]);
    out.extend_from_slice(&hole[..=hole_start]);
    out.push(ring[ring_at]);
    out.extend_from_slice(&ring[ring_at + 1..]);
    out
}
