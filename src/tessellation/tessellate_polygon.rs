use std::collections::HashMap;

use spade::{DelaunayTriangulation, Point2 as SpadePoint2, Triangulation};

use crate::boundary::BoundaryLoop;
use crate::error::{Result, TessellationError};
use crate::math::plane::{winding_number_2d, ProjectionPlane};
use crate::math::{Point2, Point3, TOLERANCE};

use super::{GeometryRequest, TriangleMesh};

/// Tessellates flattened boundary loops into a single triangle mesh.
///
/// Each loop is handled independently: its edges are subdivided so no
/// segment subtends more than `granularity` radians from the ellipsoid
/// center, the ring is projected onto its best-fit plane, triangulated with
/// a Delaunay triangulation, and triangles whose centroid falls outside the
/// ring (by winding number) are discarded. This keeps concavities and the
/// zero-width bridges produced by hole elimination out of the result.
/// Vertices are offset by `height` along the geodetic surface normal.
///
/// # Errors
///
/// Returns `TessellationError` if a loop has no well-defined plane or a
/// vertex cannot be inserted into the triangulation.
pub fn tessellate_polygon(request: &GeometryRequest<'_>) -> Result<TriangleMesh> {
    let mut mesh = TriangleMesh::default();
    for boundary in request.loops {
        tessellate_loop(request, boundary, &mut mesh)?;
    }
    Ok(mesh)
}

#[allow(clippy::cast_possible_truncation)]
fn tessellate_loop(
    request: &GeometryRequest<'_>,
    boundary: &BoundaryLoop,
    mesh: &mut TriangleMesh,
) -> Result<()> {
    let ring = subdivide_ring(boundary.points(), request.granularity);
    let plane = ProjectionPlane::fit(&ring)?;
    let uvs: Vec<(f64, f64)> = ring.iter().map(|p| plane.project(p)).collect();

    let mut cdt: DelaunayTriangulation<SpadePoint2<f64>> = DelaunayTriangulation::new();
    let mut handle_to_ring: HashMap<usize, usize> = HashMap::with_capacity(ring.len());
    for (i, &(u, v)) in uvs.iter().enumerate() {
        let handle = cdt
            .insert(SpadePoint2::new(u, v))
            .map_err(|e| TessellationError::Failed(format!("vertex insertion: {e:?}")))?;
        // Duplicate points (hole-elimination bridges) merge into one handle;
        // the first ring index wins.
        handle_to_ring.entry(handle.index()).or_insert(i);
    }

    let base = mesh.vertices.len() as u32;
    push_vertices(request, &ring, &uvs, mesh);

    for face in cdt.inner_faces() {
        let [va, vb, vc] = face.vertices();
        let (Some(&a), Some(&b), Some(&c)) = (
            handle_to_ring.get(&va.fix().index()),
            handle_to_ring.get(&vb.fix().index()),
            handle_to_ring.get(&vc.fix().index()),
        ) else {
            continue;
        };

        let (ua, vva) = uvs[a];
        let (ub, vvb) = uvs[b];
        let (uc, vvc) = uvs[c];
        let cx = (ua + ub + uc) / 3.0;
        let cy = (vva + vvb + vvc) / 3.0;
        if winding_number_2d(cx, cy, &uvs) == 0 {
            continue;
        }

        // Consistent counter-clockwise orientation in plane space.
        let cross = (ub - ua) * (vvc - vva) - (vvb - vva) * (uc - ua);
        let triangle = if cross >= 0.0 {
            [base + a as u32, base + b as u32, base + c as u32]
        } else {
            [base + a as u32, base + c as u32, base + b as u32]
        };
        mesh.indices.push(triangle);
    }
    Ok(())
}

/// Appends ring vertices (with height offset) and their attributes.
fn push_vertices(
    request: &GeometryRequest<'_>,
    ring: &[Point3],
    uvs: &[(f64, f64)],
    mesh: &mut TriangleMesh,
) {
    for point in ring {
        let normal = request.ellipsoid.geodetic_surface_normal(point);
        mesh.vertices.push(point + normal * request.height);
        if request.vertex_format.normal {
            mesh.normals.push(normal);
        }
    }
    if request.vertex_format.uv {
        let rotation = request.texture_rotation.unwrap_or(0.0);
        let (sin, cos) = rotation.sin_cos();
        let rotated: Vec<(f64, f64)> = uvs
            .iter()
            .map(|&(u, v)| (u * cos + v * sin, v * cos - u * sin))
            .collect();

        let mut min_u = f64::INFINITY;
        let mut max_u = f64::NEG_INFINITY;
        let mut min_v = f64::INFINITY;
        let mut max_v = f64::NEG_INFINITY;
        for &(u, v) in &rotated {
            min_u = min_u.min(u);
            max_u = max_u.max(u);
            min_v = min_v.min(v);
            max_v = max_v.max(v);
        }
        let extent_u = (max_u - min_u).max(TOLERANCE);
        let extent_v = (max_v - min_v).max(TOLERANCE);
        for (u, v) in rotated {
            mesh.uvs
                .push(Point2::new((u - min_u) / extent_u, (v - min_v) / extent_v));
        }
    }
}

/// Inserts intermediate points so no edge subtends more than `granularity`
/// radians from the ellipsoid center.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn subdivide_ring(points: &[Point3], granularity: f64) -> Vec<Point3> {
    let n = points.len();
    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        out.push(a);

        let denom = a.coords.norm() * b.coords.norm();
        if denom < TOLERANCE {
            continue;
        }
        let angle = (a.coords.dot(&b.coords) / denom).clamp(-1.0, 1.0).acos();
        if angle <= granularity {
            continue;
        }
        let segments = (angle / granularity).ceil() as usize;
        for s in 1..segments {
            let t = s as f64 / segments as f64;
            out.push(Point3::from(a.coords.lerp(&b.coords, t)));
        }
    }
    out
}
