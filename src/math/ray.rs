//! Ray type and picking intersections

use crate::core::types::{DMat4, DVec2, DVec3};
use super::aabb::Aabb;

/// A ray defined by origin and direction
#[derive(Clone, Copy, Debug)]
pub struct Ray {
    pub origin: DVec3,
    pub direction: DVec3,
    /// Precomputed 1/direction for fast AABB intersection
    pub inv_direction: DVec3,
}

impl Ray {
    /// Create a new ray (direction should be normalized)
    pub fn new(origin: DVec3, direction: DVec3) -> Self {
        Self {
            origin,
            direction,
            inv_direction: DVec3::new(
                1.0 / direction.x,
                1.0 / direction.y,
                1.0 / direction.z,
            ),
        }
    }

    /// Build a picking ray from normalized device coordinates.
    ///
    /// `ndc` is in [-1, 1] on both axes with +Y up; `inv_view_proj` is the
    /// inverse of the camera's view-projection matrix.
    pub fn from_ndc(ndc: DVec2, inv_view_proj: &DMat4) -> Self {
        let near = inv_view_proj.project_point3(DVec3::new(ndc.x, ndc.y, -1.0));
        let far = inv_view_proj.project_point3(DVec3::new(ndc.x, ndc.y, 1.0));
        Ray::new(near, (far - near).normalize())
    }

    /// Get point along ray at parameter t
    pub fn at(&self, t: f64) -> DVec3 {
        self.origin + self.direction * t
    }

    /// Intersect with the plane `dot(normal, p) == distance`.
    ///
    /// Returns the hit parameter if the plane is in front of the ray.
    pub fn intersect_plane(&self, normal: DVec3, distance: f64) -> Option<f64> {
        let denom = normal.dot(self.direction);
        if denom.abs() < 1e-12 {
            return None;
        }
        let t = (distance - normal.dot(self.origin)) / denom;
        (t >= 0.0).then_some(t)
    }

    /// Ray-AABB intersection using slab method
    /// Returns Some((t_near, t_far)) if intersection, None otherwise
    pub fn intersects_aabb(&self, aabb: &Aabb) -> Option<(f64, f64)> {
        let t1 = (aabb.min - self.origin) * self.inv_direction;
        let t2 = (aabb.max - self.origin) * self.inv_direction;

        let t_min = t1.min(t2);
        let t_max = t1.max(t2);

        let t_near = t_min.x.max(t_min.y).max(t_min.z);
        let t_far = t_max.x.min(t_max.y).min(t_max.z);

        if t_near <= t_far && t_far >= 0.0 {
            Some((t_near.max(0.0), t_far))
        } else {
            None
        }
    }
}
