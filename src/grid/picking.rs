//! Turning picking rays and surface hits into snapped brick positions

use crate::core::types::DVec3;
use crate::math::Ray;
use super::placement::Placed;
use super::snap::snap_to_grid;

/// Snap a point and move it to the center of its grid cell in X/Z
fn cell_center(point: DVec3, grid_size: f64) -> DVec3 {
    let snapped = snap_to_grid(point, grid_size);
    DVec3::new(
        snapped.x + grid_size / 2.0,
        snapped.y,
        snapped.z + grid_size / 2.0,
    )
}

/// Cell on the ground plane (`y = 0`) hit by `ray`, if any
pub fn ground_cell(ray: &Ray, grid_size: f64) -> Option<DVec3> {
    let t = ray.intersect_plane(DVec3::Y, 0.0)?;
    Some(cell_center(ray.at(t), grid_size))
}

/// Cell adjacent to a surface hit, on the side the normal points to
pub fn placement_from_hit(point: DVec3, normal: DVec3, grid_size: f64) -> DVec3 {
    cell_center(point + normal * (grid_size / 2.0), grid_size)
}

/// Nearest brick whose bounds the ray enters, with the hit distance
pub fn pick_brick<'a, T: Placed>(ray: &Ray, existing: &'a [T]) -> Option<(&'a T, f64)> {
    existing
        .iter()
        .filter_map(|brick| ray.intersects_aabb(&brick.bounds()).map(|(t, _)| (brick, t)))
        .min_by(|a, b| a.1.total_cmp(&b.1))
}
