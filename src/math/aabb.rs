//! Axis-aligned bounding box

use crate::core::types::DVec3;

/// Axis-aligned bounding box defined by min and max corners
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Aabb {
    pub min: DVec3,
    pub max: DVec3,
}

impl Aabb {
    /// Create AABB from min and max corners
    pub fn new(min: DVec3, max: DVec3) -> Self {
        Self { min, max }
    }

    /// Check if point is inside AABB (boundary inclusive)
    pub fn contains_point(&self, p: DVec3) -> bool {
        p.x >= self.min.x && p.x <= self.max.x &&
        p.y >= self.min.y && p.y <= self.max.y &&
        p.z >= self.min.z && p.z <= self.max.z
    }

    /// Check if two AABBs share interior volume.
    ///
    /// Boxes that only touch on a face, edge or corner do not overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        !(self.max.x <= other.min.x || self.min.x >= other.max.x ||
          self.max.y <= other.min.y || self.min.y >= other.max.y ||
          self.max.z <= other.min.z || self.min.z >= other.max.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_point() {
        let aabb = Aabb::new(DVec3::ZERO, DVec3::ONE);
        assert!(aabb.contains_point(DVec3::splat(0.5)));
        assert!(aabb.contains_point(DVec3::ONE));
        assert!(!aabb.contains_point(DVec3::splat(2.0)));
    }

    #[test]
    fn test_overlaps() {
        let a = Aabb::new(DVec3::ZERO, DVec3::ONE);
        let b = Aabb::new(DVec3::splat(0.5), DVec3::splat(1.5));
        let c = Aabb::new(DVec3::splat(2.0), DVec3::splat(3.0));
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_touching_faces_do_not_overlap() {
        let a = Aabb::new(DVec3::ZERO, DVec3::ONE);
        let right = Aabb::new(DVec3::new(1.0, 0.0, 0.0), DVec3::new(2.0, 1.0, 1.0));
        let above = Aabb::new(DVec3::new(0.0, 1.0, 0.0), DVec3::new(1.0, 2.0, 1.0));
        assert!(!a.overlaps(&right));
        assert!(!a.overlaps(&above));
    }

    #[test]
    fn test_overlap_is_symmetric() {
        let boxes = [
            Aabb::new(DVec3::ZERO, DVec3::ONE),
            Aabb::new(DVec3::splat(0.5), DVec3::splat(1.5)),
            Aabb::new(DVec3::new(1.0, 0.0, 0.0), DVec3::new(2.0, 1.0, 1.0)),
            Aabb::new(DVec3::new(-3.0, -1.0, 0.25), DVec3::new(0.1, 0.5, 0.75)),
        ];
        for a in &boxes {
            for b in &boxes {
                assert_eq!(a.overlaps(b), b.overlaps(a));
            }
        }
    }
}
