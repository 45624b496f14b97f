use crate::math::{Point3, Vector3};

/// A reference ellipsoid centered at the origin with axis-aligned radii.
///
/// Dirty tracking in [`PolygonPrimitive`](crate::primitive::PolygonPrimitive)
/// compares ellipsoids by identity (`Arc::ptr_eq`), never by value, so two
/// value-equal instances still count as a change. `PartialEq` exists for
/// tests and diagnostics only.
#[derive(Debug, Clone, PartialEq)]
pub struct Ellipsoid {
    radii: Vector3,
    one_over_radii_squared: Vector3,
}

impl Ellipsoid {
    /// Creates an ellipsoid from three radii.
    ///
    /// # Panics
    ///
    /// Panics if any radius is not strictly positive.
    #[must_use]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        assert!(
            x > 0.0 && y > 0.0 && z > 0.0,
            "ellipsoid radii must be positive"
        );
        Self {
            radii: Vector3::new(x, y, z),
            one_over_radii_squared: Vector3::new(1.0 / (x * x), 1.0 / (y * y), 1.0 / (z * z)),
        }
    }

    /// The WGS84 reference ellipsoid, radii in meters.
    #[must_use]
    pub fn wgs84() -> Self {
        Self::new(6_378_137.0, 6_378_137.0, 6_356_752.314_245_179_3)
    }

    /// A unit sphere. Mostly useful for tests and toy scenes.
    #[must_use]
    pub fn unit_sphere() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }

    /// Returns the three radii.
    #[must_use]
    pub fn radii(&self) -> &Vector3 {
        &self.radii
    }

    /// Returns the largest of the three radii.
    #[must_use]
    pub fn maximum_radius(&self) -> f64 {
        self.radii.x.max(self.radii.y).max(self.radii.z)
    }

    /// Outward unit normal of the ellipsoid surface at (or near) `point`.
    ///
    /// The gradient of `x²/a² + y²/b² + z²/c²`, normalized. For points not
    /// exactly on the surface this is the normal of the scaled ellipsoid
    /// through the point, which is what surface-offset extrusion wants.
    #[must_use]
    pub fn geodetic_surface_normal(&self, point: &Point3) -> Vector3 {
        point
            .coords
            .component_mul(&self.one_over_radii_squared)
            .normalize()
    }
}
