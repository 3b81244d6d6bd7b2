//! Viewer format: compact brick records used for bulk rendering

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::types::{DVec3, Footprint};
use super::color::hex_to_rgb;

/// Linear dimension of a standard brick
pub const STANDARD_SIZE: f64 = 0.008;
/// Body thickness of a standard brick
pub const STANDARD_THICKNESS: f64 = 0.008;
/// Stud height of a standard brick
pub const STANDARD_CYLINDER_THICKNESS: f64 = 0.002;
/// Radius used when a standard brick is made round
pub const STANDARD_CIRCLE_RADIUS: f64 = 0.001625;

/// One brick in the viewer format
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewerBrick {
    pub center: DVec3,
    pub shape: Footprint,
    pub size: f64,
    pub thickness: f64,
    /// Positive radius marks the brick as a cylinder
    pub circle_radius: f64,
    pub cylinder_thickness: f64,
    /// RGB, each channel in [0, 1]
    pub color: [f64; 3],
    /// Yaw in degrees
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orientation: Option<f64>,
    #[serde(rename = "rotationX", default, skip_serializing_if = "Option::is_none")]
    pub rotation_x: Option<f64>,
    #[serde(rename = "rotationY", default, skip_serializing_if = "Option::is_none")]
    pub rotation_y: Option<f64>,
    #[serde(rename = "rotationZ", default, skip_serializing_if = "Option::is_none")]
    pub rotation_z: Option<f64>,
}

impl ViewerBrick {
    /// Explicit per-axis rotation overrides in degrees (absent axes are 0)
    pub fn explicit_rotation(&self) -> DVec3 {
        DVec3::new(
            self.rotation_x.unwrap_or(0.0),
            self.rotation_y.unwrap_or(0.0),
            self.rotation_z.unwrap_or(0.0),
        )
    }
}

/// One layer of the multi-layer viewer format
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewerLayer {
    pub bricks: Vec<ViewerBrick>,
}

/// Multi-layer viewer document: `{ "layers": [{ "bricks": [...] }, ...] }`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewerLayers {
    pub layers: Vec<ViewerLayer>,
}

impl ViewerLayers {
    /// Total bricks across all layers
    pub fn brick_count(&self) -> usize {
        self.layers.iter().map(|l| l.bricks.len()).sum()
    }
}

/// Build a standard-dimension brick for editor-originated data
pub fn standard_brick(center: DVec3, shape: Footprint, color: &str, has_cylinder: bool) -> ViewerBrick {
    ViewerBrick {
        center,
        shape,
        size: STANDARD_SIZE,
        thickness: STANDARD_THICKNESS,
        circle_radius: if has_cylinder { STANDARD_CIRCLE_RADIUS } else { 0.0 },
        cylinder_thickness: STANDARD_CYLINDER_THICKNESS,
        color: hex_to_rgb(color),
        orientation: None,
        rotation_x: None,
        rotation_y: None,
        rotation_z: None,
    }
}

/// Structural check that a JSON value looks like a viewer brick record
pub fn validate_viewer_brick_data(value: &Value) -> bool {
    let array_of_len = |key: &str, len: usize| {
        value.get(key).and_then(Value::as_array).is_some_and(|a| a.len() == len)
    };
    let number = |key: &str| value.get(key).is_some_and(Value::is_number);

    array_of_len("center", 3)
        && array_of_len("shape", 2)
        && number("size")
        && number("thickness")
        && number("circle_radius")
        && number("cylinder_thickness")
        && array_of_len("color", 3)
}
