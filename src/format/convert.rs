//! Conversion between viewer and editor brick formats.
//!
//! The editor format carries no shape-detail fields, so going through it
//! resets size, thickness and cylinder data to the standard constants.

use std::collections::BTreeMap;

use crate::core::types::DVec3;
use super::clock::generate_id;
use super::color::{hex_to_rgb, rgb_to_hex};
use super::editor::EditorBrick;
use super::viewer::{
    ViewerBrick, ViewerLayer, ViewerLayers,
    STANDARD_SIZE, STANDARD_THICKNESS, STANDARD_CYLINDER_THICKNESS,
};

/// Vertical distance between consecutive viewer layers in world units
pub const LAYER_SPACING: f64 = 0.02;

/// Viewer record to editor brick with a fresh id
pub fn viewer_to_editor(brick: &ViewerBrick) -> EditorBrick {
    EditorBrick {
        id: generate_id(),
        position: brick.center,
        rotation: brick.orientation.unwrap_or(0.0),
        size: brick.shape,
        color: rgb_to_hex(brick.color),
    }
}

/// Editor brick to a standard-dimension viewer record
pub fn editor_to_viewer(brick: &EditorBrick) -> ViewerBrick {
    ViewerBrick {
        center: brick.position,
        shape: brick.size,
        size: STANDARD_SIZE,
        thickness: STANDARD_THICKNESS,
        circle_radius: 0.0,
        cylinder_thickness: STANDARD_CYLINDER_THICKNESS,
        color: hex_to_rgb(&brick.color),
        orientation: Some(brick.rotation),
        rotation_x: None,
        rotation_y: None,
        rotation_z: None,
    }
}

pub fn viewer_array_to_editor(bricks: &[ViewerBrick]) -> Vec<EditorBrick> {
    bricks.iter().map(viewer_to_editor).collect()
}

pub fn editor_to_viewer_array(bricks: &[EditorBrick]) -> Vec<ViewerBrick> {
    bricks.iter().map(editor_to_viewer).collect()
}

/// Flatten layers, encoding each brick's layer into its Y coordinate
pub fn viewer_layers_to_editor(data: &ViewerLayers) -> Vec<EditorBrick> {
    let mut bricks = Vec::with_capacity(data.brick_count());
    for (layer_index, layer) in data.layers.iter().enumerate() {
        let offset = layer_index as f64 * LAYER_SPACING;
        for brick in &layer.bricks {
            let mut editor = viewer_to_editor(brick);
            editor.position.y += offset;
            bricks.push(editor);
        }
    }
    bricks
}

/// Group bricks into layers by `round(y / LAYER_SPACING)`.
///
/// Layers come out in ascending index order with the layer offset removed
/// from each center. Indices with no bricks produce no layer.
pub fn editor_to_viewer_layers(bricks: &[EditorBrick]) -> ViewerLayers {
    let mut by_layer: BTreeMap<i64, Vec<ViewerBrick>> = BTreeMap::new();
    for brick in bricks {
        let layer_index = layer_index_for(brick.position.y);
        let mut viewer = editor_to_viewer(brick);
        viewer.center = DVec3::new(
            brick.position.x,
            brick.position.y - layer_index as f64 * LAYER_SPACING,
            brick.position.z,
        );
        by_layer.entry(layer_index).or_default().push(viewer);
    }

    ViewerLayers {
        layers: by_layer
            .into_values()
            .map(|bricks| ViewerLayer { bricks })
            .collect(),
    }
}

/// Layer a world Y coordinate belongs to
pub fn layer_index_for(y: f64) -> i64 {
    (y / LAYER_SPACING).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Footprint;
    use crate::format::viewer::standard_brick;

    fn layered() -> ViewerLayers {
        let layer = |n: usize, color: &str| ViewerLayer {
            bricks: (0..n)
                .map(|i| standard_brick(DVec3::new(i as f64 * 0.008, 0.004, 0.016), Footprint::new(1, 2), color, i % 2 == 0))
                .collect(),
        };
        ViewerLayers {
            layers: vec![layer(3, "#ff0000"), layer(1, "#00ff00"), layer(4, "#0000ff")],
        }
    }

    #[test]
    fn test_viewer_to_editor() {
        let mut viewer = standard_brick(DVec3::new(1.0, 2.0, 3.0), Footprint::new(2, 2), "#ff0000", false);
        viewer.orientation = Some(270.0);
        let editor = viewer_to_editor(&viewer);
        assert!(editor.id.starts_with("brick_"));
        assert_eq!(editor.position, DVec3::new(1.0, 2.0, 3.0));
        assert_eq!(editor.rotation, 270.0);
        assert_eq!(editor.size, Footprint::new(2, 2));
        assert_eq!(editor.color, "#ff0000");
    }

    #[test]
    fn test_conversion_never_reuses_ids() {
        let viewer = standard_brick(DVec3::ZERO, Footprint::UNIT, "#ffffff", false);
        assert_ne!(viewer_to_editor(&viewer).id, viewer_to_editor(&viewer).id);
    }

    #[test]
    fn test_editor_to_viewer_resets_details() {
        let editor = EditorBrick {
            id: "x".into(),
            position: DVec3::new(0.5, 0.0, 0.5),
            rotation: 90.0,
            size: Footprint::new(2, 1),
            color: "#00ff00".into(),
        };
        let viewer = editor_to_viewer(&editor);
        assert_eq!(viewer.size, 0.008);
        assert_eq!(viewer.thickness, 0.008);
        assert_eq!(viewer.circle_radius, 0.0);
        assert_eq!(viewer.cylinder_thickness, 0.002);
        assert_eq!(viewer.orientation, Some(90.0));
        assert_eq!(viewer.color, [0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_layers_encode_y_offset() {
        let editor = viewer_layers_to_editor(&layered());
        assert_eq!(editor.len(), 8);
        assert!((editor[0].position.y - 0.004).abs() < 1e-12);
        assert!((editor[3].position.y - 0.024).abs() < 1e-12);
        assert!((editor[4].position.y - 0.044).abs() < 1e-12);
    }

    #[test]
    fn test_layer_round_trip() {
        let input = layered();
        let back = editor_to_viewer_layers(&viewer_layers_to_editor(&input));

        assert_eq!(back.layers.len(), input.layers.len());
        for (a, b) in input.layers.iter().zip(&back.layers) {
            assert_eq!(a.bricks.len(), b.bricks.len());
            for (x, y) in a.bricks.iter().zip(&b.bricks) {
                assert!((x.center - y.center).abs().max_element() < 1e-9);
                assert_eq!(x.shape, y.shape);
            }
        }
    }

    #[test]
    fn test_layers_sorted_ascending() {
        let mk = |y: f64| EditorBrick {
            id: String::new(),
            position: DVec3::new(0.0, y, 0.0),
            rotation: 0.0,
            size: Footprint::UNIT,
            color: "#123456".into(),
        };
        let layers = editor_to_viewer_layers(&[mk(0.04), mk(0.0), mk(0.041), mk(0.02)]);
        let counts: Vec<usize> = layers.layers.iter().map(|l| l.bricks.len()).collect();
        assert_eq!(counts, vec![1, 1, 2]);
        assert!((layers.layers[2].bricks[1].center.y - 0.001).abs() < 1e-9);
    }
}
