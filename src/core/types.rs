//! Core type aliases and re-exports

use std::fmt;

use serde::{Deserialize, Serialize};

pub use glam::{DVec2, DVec3, DMat4, Vec3, Mat4, Quat, EulerRot};

/// Standard Result type for the crate
pub type Result<T> = std::result::Result<T, crate::core::error::Error>;

/// Brick footprint in grid units: (width along X, length along Z).
///
/// Serialized as a two-element array, e.g. `[2, 4]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Footprint(pub u32, pub u32);

impl Footprint {
    /// Single-cell footprint
    pub const UNIT: Footprint = Footprint(1, 1);

    pub fn new(width: u32, length: u32) -> Self {
        Self(width, length)
    }

    /// Extent along X
    pub fn width(&self) -> u32 {
        self.0
    }

    /// Extent along Z
    pub fn length(&self) -> u32 {
        self.1
    }

    /// Both extents are non-zero
    pub fn is_valid(&self) -> bool {
        self.0 > 0 && self.1 > 0
    }
}

impl Default for Footprint {
    fn default() -> Self {
        Self::UNIT
    }
}

impl fmt::Display for Footprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.0, self.1)
    }
}
