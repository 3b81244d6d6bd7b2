//! Brick orientation and rotation derivation

use crate::core::types::DVec3;

/// Fixed yaw applied to every brick.
///
/// Source data is authored with a coordinate convention a quarter turn off
/// from the render convention.
pub const BASE_ROTATION_Y_DEG: f64 = 90.0;

/// Cardinal facing of a brick about the vertical axis
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Orientation {
    North,
    #[default]
    East,
    South,
    West,
}

impl Orientation {
    pub const ALL: [Orientation; 4] = [
        Orientation::North,
        Orientation::East,
        Orientation::South,
        Orientation::West,
    ];

    /// Yaw in degrees
    pub fn degrees(self) -> f64 {
        match self {
            Orientation::North => 0.0,
            Orientation::East => 90.0,
            Orientation::South => 180.0,
            Orientation::West => 270.0,
        }
    }

    /// Match a yaw in degrees (any multiple of 360 apart) to a cardinal facing
    pub fn from_degrees(degrees: f64) -> Option<Self> {
        let normalized = degrees.rem_euclid(360.0);
        Self::ALL
            .into_iter()
            .find(|o| (o.degrees() - normalized).abs() < 1e-9)
    }

    pub fn name(self) -> &'static str {
        match self {
            Orientation::North => "North",
            Orientation::East => "East",
            Orientation::South => "South",
            Orientation::West => "West",
        }
    }
}

/// Rotation axis for explicit overrides
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Derive a render rotation (radians) from an orientation and explicit
/// per-axis overrides, all given in degrees.
pub fn compute_rotation(orientation_deg: f64, explicit_deg: DVec3) -> DVec3 {
    DVec3::new(
        explicit_deg.x.to_radians(),
        (BASE_ROTATION_Y_DEG + orientation_deg + explicit_deg.y).to_radians(),
        explicit_deg.z.to_radians(),
    )
}
