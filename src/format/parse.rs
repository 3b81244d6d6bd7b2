//! Format auto-detection on import, and JSON exporters

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::core::error::Error;
use crate::core::types::Result;
use super::convert::{
    editor_to_viewer_array, editor_to_viewer_layers, viewer_array_to_editor,
    viewer_layers_to_editor,
};
use super::editor::EditorBrick;
use super::viewer::{validate_viewer_brick_data, ViewerBrick, ViewerLayers};

/// Recognized shapes of brick JSON documents
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataFormat {
    /// Bare array of viewer records
    ViewerArray,
    /// Bare array of editor bricks
    EditorArray,
    /// `{ "layers": [...] }`
    ViewerLayers,
    /// `{ "bricks": [...], "metadata": {...} }`
    EditorExport,
}

/// Decide which format a parsed document uses.
///
/// Arrays are classified by their first element only; an empty array is
/// treated as an (empty) editor array.
pub fn detect_format(value: &Value) -> Option<DataFormat> {
    match value {
        Value::Array(items) => Some(match items.first() {
            Some(first) if validate_viewer_brick_data(first) => DataFormat::ViewerArray,
            _ => DataFormat::EditorArray,
        }),
        Value::Object(map) => {
            if map.get("layers").is_some_and(Value::is_array) {
                Some(DataFormat::ViewerLayers)
            } else if map.get("bricks").is_some_and(Value::is_array) {
                Some(DataFormat::EditorExport)
            } else {
                None
            }
        }
        _ => None,
    }
}

/// Parse any supported brick document into editor bricks.
///
/// Viewer input gets fresh ids; editor input keeps its ids. Arrays mixing
/// viewer and editor records are rejected.
pub fn parse_brick_data(json: &str) -> Result<Vec<EditorBrick>> {
    let value: Value = serde_json::from_str(json)?;
    let format = detect_format(&value).ok_or_else(|| {
        Error::Format("expected a brick array or an object with `layers` or `bricks`".into())
    })?;
    log::debug!("Detected brick data format: {:?}", format);

    let bricks = match format {
        DataFormat::ViewerArray => {
            let viewer: Vec<ViewerBrick> = structured(value, "viewer brick array")?;
            check_viewer_footprints(viewer.iter())?;
            viewer_array_to_editor(&viewer)
        }
        DataFormat::EditorArray => structured(value, "editor brick array")?,
        DataFormat::ViewerLayers => {
            let layers: ViewerLayers = structured(value, "viewer layers")?;
            check_viewer_footprints(layers.layers.iter().flat_map(|l| l.bricks.iter()))?;
            viewer_layers_to_editor(&layers)
        }
        DataFormat::EditorExport => {
            let bricks = match value {
                Value::Object(mut map) => map.remove("bricks").unwrap_or(Value::Null),
                _ => Value::Null,
            };
            structured(bricks, "editor export")?
        }
    };

    if let Some(bad) = bricks.iter().find(|b| !b.size.is_valid()) {
        return Err(Error::Format(format!("brick {:?} has an empty footprint {}", bad.id, bad.size)));
    }
    Ok(bricks)
}

/// Bare viewer array JSON
pub fn export_viewer_json(bricks: &[EditorBrick]) -> Result<String> {
    Ok(serde_json::to_string_pretty(&editor_to_viewer_array(bricks))?)
}

/// Multi-layer viewer JSON
pub fn export_viewer_layers_json(bricks: &[EditorBrick]) -> Result<String> {
    Ok(serde_json::to_string_pretty(&editor_to_viewer_layers(bricks))?)
}

fn structured<T: DeserializeOwned>(value: Value, what: &str) -> Result<T> {
    serde_json::from_value(value).map_err(|e| Error::Format(format!("invalid {}: {}", what, e)))
}

fn check_viewer_footprints<'a>(mut bricks: impl Iterator<Item = &'a ViewerBrick>) -> Result<()> {
    match bricks.find(|b| !b.shape.is_valid()) {
        Some(bad) => Err(Error::Format(format!("viewer brick at {} has an empty shape", bad.center))),
        None => Ok(()),
    }
}
