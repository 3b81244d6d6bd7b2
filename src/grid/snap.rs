//! Grid snapping

use crate::core::types::{DVec3, Footprint};

/// Distance under which a coordinate counts as lying on the grid
pub const ON_GRID_TOLERANCE: f64 = 0.01;

/// Round each coordinate to the nearest multiple of `grid_size`.
///
/// Idempotent. A non-positive grid size leaves the position untouched.
pub fn snap_to_grid(position: DVec3, grid_size: f64) -> DVec3 {
    if grid_size <= 0.0 {
        return position;
    }
    (position / grid_size).round() * grid_size
}

/// Snap, then shift so a multi-cell brick is centered over the cells it covers.
pub fn snap_to_grid_center(position: DVec3, grid_size: f64, footprint: Footprint) -> DVec3 {
    let snapped = snap_to_grid(position, grid_size);
    let offset_x = (footprint.width() as f64 - 1.0) * grid_size / 2.0;
    let offset_z = (footprint.length() as f64 - 1.0) * grid_size / 2.0;
    snapped + DVec3::new(offset_x, 0.0, offset_z)
}

/// Whether every coordinate is within [`ON_GRID_TOLERANCE`] of its snapped value
pub fn is_on_grid(position: DVec3, grid_size: f64) -> bool {
    let delta = (position - snap_to_grid(position, grid_size)).abs();
    delta.max_element() < ON_GRID_TOLERANCE
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_multiple(v: f64, g: f64) -> bool {
        let q = v / g;
        (q - q.round()).abs() < 1e-9
    }

    #[test]
    fn test_snap_rounds_to_nearest() {
        let p = snap_to_grid(DVec3::new(1.4, 2.6, -0.7), 1.0);
        assert_eq!(p, DVec3::new(1.0, 3.0, -1.0));

        let p = snap_to_grid(DVec3::new(0.26, 0.74, 1.1), 0.5);
        assert_eq!(p, DVec3::new(0.5, 0.5, 1.0));
    }

    #[test]
    fn test_snap_is_idempotent_and_on_multiples() {
        let samples = [
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(3.33, -7.71, 12.49),
            DVec3::new(-0.51, 0.49, 100.01),
            DVec3::new(1e-6, 5.5, -5.5),
        ];
        for grid in [1.0, 0.5, 0.25, 2.0, 0.02] {
            for p in samples {
                let once = snap_to_grid(p, grid);
                assert_eq!(snap_to_grid(once, grid), once);
                assert!(is_multiple(once.x, grid));
                assert!(is_multiple(once.y, grid));
                assert!(is_multiple(once.z, grid));
            }
        }
    }

    #[test]
    fn test_snap_non_positive_grid_is_identity() {
        let p = DVec3::new(1.23, 4.56, 7.89);
        assert_eq!(snap_to_grid(p, 0.0), p);
        assert_eq!(snap_to_grid(p, -1.0), p);
    }

    #[test]
    fn test_snap_center_offsets_wide_bricks() {
        let p = snap_to_grid_center(DVec3::new(2.2, 1.0, 3.9), 1.0, Footprint::new(2, 3));
        assert_eq!(p, DVec3::new(2.5, 1.0, 5.0));

        let unit = snap_to_grid_center(DVec3::new(2.2, 1.0, 3.9), 1.0, Footprint::UNIT);
        assert_eq!(unit, DVec3::new(2.0, 1.0, 4.0));
    }

    #[test]
    fn test_is_on_grid() {
        assert!(is_on_grid(DVec3::new(1.0, 2.0, 3.0), 1.0));
        assert!(is_on_grid(DVec3::new(1.005, 2.0, 2.995), 1.0));
        assert!(!is_on_grid(DVec3::new(1.5, 2.0, 3.0), 1.0));
    }
}
