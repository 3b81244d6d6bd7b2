//! Brick entity model: a classified, render-ready brick built from a viewer record.

pub mod kind;
pub mod orientation;

pub use kind::BrickKind;
pub use orientation::{Axis, Orientation, compute_rotation, BASE_ROTATION_Y_DEG};

use serde::Serialize;

use crate::core::types::{DVec3, Footprint};
use crate::format::ViewerBrick;

/// A single brick ready for rendering
#[derive(Clone, Debug, PartialEq)]
pub struct Brick {
    pub kind: BrickKind,
    /// Center in world units
    pub position: DVec3,
    /// Euler rotation in radians (XYZ order)
    pub rotation: DVec3,
    /// RGB, each channel in [0, 1]
    pub color: [f64; 3],
    pub size: f64,
    pub thickness: f64,
    pub shape: Footprint,
    /// Yaw in degrees, nominally a cardinal value
    pub orientation: f64,
}

/// What a renderer needs to build one visual primitive
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MeshData {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub position: DVec3,
    pub rotation: DVec3,
    pub color: [f64; 3],
    pub size: f64,
    pub thickness: f64,
    pub shape: Footprint,
    pub orientation: f64,
}

impl Brick {
    /// Classify a record and derive its rotation.
    ///
    /// Records without an orientation face East.
    pub fn from_record(record: &ViewerBrick) -> Self {
        let orientation = record
            .orientation
            .unwrap_or_else(|| Orientation::default().degrees());
        let rotation = compute_rotation(orientation, record.explicit_rotation());

        Self {
            kind: BrickKind::classify(record),
            position: record.center,
            rotation,
            color: record.color,
            size: record.size,
            thickness: record.thickness,
            shape: record.shape,
            orientation,
        }
    }

    /// Face a new direction, re-deriving the rotation with the current
    /// rotation as the explicit overrides.
    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation.degrees();
        self.rotation = compute_rotation(self.orientation, self.rotation_degrees());
    }

    /// Overwrite one rotation component
    pub fn set_rotation(&mut self, axis: Axis, degrees: f64) {
        let radians = degrees.to_radians();
        match axis {
            Axis::X => self.rotation.x = radians,
            Axis::Y => self.rotation.y = radians,
            Axis::Z => self.rotation.z = radians,
        }
    }

    /// Orientation as a cardinal facing, when it is one
    pub fn cardinal_orientation(&self) -> Option<Orientation> {
        Orientation::from_degrees(self.orientation)
    }

    pub fn orientation_name(&self) -> &'static str {
        self.cardinal_orientation().map_or("Unknown", Orientation::name)
    }

    /// Rotation converted to degrees
    pub fn rotation_degrees(&self) -> DVec3 {
        DVec3::new(
            self.rotation.x.to_degrees(),
            self.rotation.y.to_degrees(),
            self.rotation.z.to_degrees(),
        )
    }

    pub fn mesh_data(&self) -> MeshData {
        MeshData {
            kind: self.kind.tag(),
            position: self.position,
            rotation: self.rotation,
            color: self.color,
            size: self.size,
            thickness: self.thickness,
            shape: self.shape,
            orientation: self.orientation,
        }
    }
}

impl From<&ViewerBrick> for Brick {
    fn from(record: &ViewerBrick) -> Self {
        Brick::from_record(record)
    }
}
