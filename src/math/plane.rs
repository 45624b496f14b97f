use crate::error::{Result, TessellationError};

use super::{Point3, Vector3, TOLERANCE};

/// A best-fit projection plane for a closed ring of roughly coplanar points.
///
/// The normal is computed with Newell's method, so rings that are only
/// approximately planar (e.g. sampled from an ellipsoid surface) still get a
/// stable, deterministic plane.
#[derive(Debug, Clone)]
pub struct ProjectionPlane {
    origin: Point3,
    u_dir: Vector3,
    v_dir: Vector3,
    normal: Vector3,
}

impl ProjectionPlane {
    /// Fits a plane to a closed ring of points.
    ///
    /// # Errors
    ///
    /// Returns `TessellationError::Degenerate` if the ring has no
    /// well-defined plane (collinear or coincident points).
    #[allow(clippy::cast_precision_loss)]
    pub fn fit(points: &[Point3]) -> Result<Self> {
        let n = points.len();
        if n < 3 {
            return Err(
                TessellationError::Degenerate("fewer than 3 points for plane fit".into()).into(),
            );
        }

        let mut normal = Vector3::zeros();
        let mut centroid = Vector3::zeros();
        for i in 0..n {
            let a = &points[i];
            let b = &points[(i + 1) % n];
            normal.x += (a.y - b.y) * (a.z + b.z);
            normal.y += (a.z - b.z) * (a.x + b.x);
            normal.z += (a.x - b.x) * (a.y + b.y);
            centroid += a.coords;
        }

        let len = normal.norm();
        if len < TOLERANCE {
            return Err(TessellationError::Degenerate(
                "ring has no well-defined plane".into(),
            )
            .into());
        }
        let normal = normal / len;
        let origin = Point3::from(centroid / n as f64);

        // Choose a reference vector not parallel to the normal
        let reference = if normal.x.abs() < 0.9 {
            Vector3::new(1.0, 0.0, 0.0)
        } else {
            Vector3::new(0.0, 1.0, 0.0)
        };
        let u_dir = normal.cross(&reference).normalize();
        let v_dir = normal.cross(&u_dir);

        Ok(Self {
            origin,
            u_dir,
            v_dir,
            normal,
        })
    }

    /// Projects a 3D point into the plane's UV coordinate system.
    #[must_use]
    pub fn project(&self, point: &Point3) -> (f64, f64) {
        let diff = point - self.origin;
        (diff.dot(&self.u_dir), diff.dot(&self.v_dir))
    }

    /// Returns the plane normal.
    #[must_use]
    pub fn normal(&self) -> &Vector3 {
        &self.normal
    }
}

/// Winding number of point `(px, py)` with respect to polygon `verts`.
///
/// Non-zero => inside, zero => outside.
#[must_use]
pub fn winding_number_2d(px: f64, py: f64, verts: &[(f64, f64)]) -> i32 {
    let n = verts.len();
    let mut winding = 0i32;
    for i in 0..n {
        let (x0, y0) = verts[i];
        let (x1, y1) = verts[(i + 1) % n];

        if y0 <= py {
            if y1 > py && cross_2d(x1 - x0, y1 - y0, px - x0, py - y0) > 0.0 {
                winding += 1;
            }
        } else if y1 <= py && cross_2d(x1 - x0, y1 - y0, px - x0, py - y0) < 0.0 {
            winding -= 1;
        }
    }
    winding
}

/// Signed area of a 2D polygon (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise.
#[must_use]
pub fn signed_area_2d(verts: &[(f64, f64)]) -> f64 {
    let n = verts.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let (x0, y0) = verts[i];
        let (x1, y1) = verts[(i + 1) % n];
        sum += x0 * y1 - x1 * y0;
    }
    sum * 0.5
}

/// 2D cross product: `(ax * by - ay * bx)`.
#[inline]
fn cross_2d(ax: f64, ay: f64, bx: f64, by: f64) -> f64 {
    ax * by - ay * bx
}
