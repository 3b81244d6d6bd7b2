//! Spatial grid model: snapping, occupancy and support validation.
//!
//! Bricks sit on a horizontal grid and occupy exactly one vertical unit,
//! regardless of their visual thickness. All checks here return booleans;
//! whether a failed check blocks an edit is up to the caller.

pub mod snap;
pub mod placement;
pub mod picking;

pub use snap::{snap_to_grid, snap_to_grid_center, is_on_grid, ON_GRID_TOLERANCE};
pub use placement::{
    Placed, BRICK_HEIGHT,
    brick_bounds, bricks_overlap, is_occupied, has_support, is_valid_placement, brick_at,
};
pub use picking::{ground_cell, pick_brick, placement_from_hit};
