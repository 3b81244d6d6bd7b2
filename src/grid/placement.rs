//! Occupancy and support checks for candidate brick placements

use std::sync::Arc;

use crate::core::types::{DVec3, Footprint};
use crate::math::Aabb;

/// Vertical extent of every brick in grid units
pub const BRICK_HEIGHT: f64 = 1.0;

/// Tolerance when comparing layer heights
const LAYER_EPSILON: f64 = 1e-9;

/// Anything that occupies grid cells: a position plus a footprint.
pub trait Placed {
    fn position(&self) -> DVec3;
    fn footprint(&self) -> Footprint;

    /// Bounding box occupied by this brick
    fn bounds(&self) -> Aabb {
        brick_bounds(self.position(), self.footprint(), BRICK_HEIGHT)
    }
}

impl<T: Placed + ?Sized> Placed for Arc<T> {
    fn position(&self) -> DVec3 {
        (**self).position()
    }

    fn footprint(&self) -> Footprint {
        (**self).footprint()
    }
}

/// Bounding box of a brick centered on `position` in X/Z.
///
/// Spans `position.y .. position.y + height` vertically.
pub fn brick_bounds(position: DVec3, footprint: Footprint, height: f64) -> Aabb {
    let half_width = footprint.width() as f64 / 2.0;
    let half_length = footprint.length() as f64 / 2.0;
    Aabb::new(
        DVec3::new(position.x - half_width, position.y, position.z - half_length),
        DVec3::new(position.x + half_width, position.y + height, position.z + half_length),
    )
}

/// Whether two placed bricks share interior volume
pub fn bricks_overlap<A: Placed, B: Placed>(a: &A, b: &B) -> bool {
    a.bounds().overlaps(&b.bounds())
}

/// Whether a candidate brick would overlap any existing brick
pub fn is_occupied<T: Placed>(position: DVec3, footprint: Footprint, existing: &[T]) -> bool {
    let candidate = brick_bounds(position, footprint, BRICK_HEIGHT);
    existing.iter().any(|brick| candidate.overlaps(&brick.bounds()))
}

/// Whether a candidate brick rests fully on the layer below.
///
/// Ground-level placements (`y == 0`) are always supported. Above ground,
/// every unit cell under the footprint must be covered by some brick one
/// layer down; several smaller bricks may share the load.
pub fn has_support<T: Placed>(position: DVec3, footprint: Footprint, existing: &[T]) -> bool {
    if position.y == 0.0 {
        return true;
    }

    let support_y = position.y - BRICK_HEIGHT;
    let bounds = brick_bounds(position, footprint, BRICK_HEIGHT);
    let supports: Vec<Aabb> = existing
        .iter()
        .filter(|brick| (brick.position().y - support_y).abs() < LAYER_EPSILON)
        .map(|brick| brick.bounds())
        .collect();

    unit_cells(&bounds).all(|(gx, gz)| {
        let covered = supports.iter().any(|b| {
            gx >= b.min.x && gx < b.max.x && gz >= b.min.z && gz < b.max.z
        });
        if !covered {
            log::trace!("No support under cell ({}, {}) at y={}", gx, gz, support_y);
        }
        covered
    })
}

/// Not occupied and fully supported
pub fn is_valid_placement<T: Placed>(position: DVec3, footprint: Footprint, existing: &[T]) -> bool {
    !is_occupied(position, footprint, existing) && has_support(position, footprint, existing)
}

/// First brick whose bounds contain `point` (boundary inclusive)
pub fn brick_at<T: Placed>(point: DVec3, existing: &[T]) -> Option<&T> {
    existing.iter().find(|brick| brick.bounds().contains_point(point))
}

/// Integer grid points inside the half-open X/Z extent of `bounds`
fn unit_cells(bounds: &Aabb) -> impl Iterator<Item = (f64, f64)> {
    let (min_x, max_x) = (bounds.min.x, bounds.max.x);
    let (min_z, max_z) = (bounds.min.z, bounds.max.z);
    // Shave the upper edge so a boundary that is exactly integral is excluded
    let start_x = min_x.floor() as i64;
    let end_x = (max_x - 0.001).ceil() as i64;
    let start_z = min_z.floor() as i64;
    let end_z = (max_z - 0.001).ceil() as i64;

    (start_x..=end_x)
        .flat_map(move |gx| (start_z..=end_z).map(move |gz| (gx as f64, gz as f64)))
        .filter(move |&(gx, gz)| gx >= min_x && gx < max_x && gz >= min_z && gz < max_z)
}
